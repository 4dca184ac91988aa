use super::{bearing_between, meters_between, offset_point};
use float_eq::float_eq;
use geo::{MapCoords, Point};

/// Rotates a geometry about a pivot by the given angle, in degrees.
///
/// The rotation is geographic: each vertex keeps its great-circle distance to
/// the pivot while its bearing from the pivot is shifted by `angle`. Positive
/// angles therefore turn clockwise in compass space, and rotating by the
/// negated bearing of an edge makes that edge point true north. (A raw
/// degree-space rotation would not commute with geographic bearings away from
/// the equator.)
pub(crate) fn rotate_about<G>(geometry: &G, angle: f64, pivot: Point) -> G
where
    G: MapCoords<f64, f64, Output = G>,
{
    geometry.map_coords(|coord| {
        let point = Point::from(coord);
        let meters = meters_between(pivot, point);
        // The pivot itself has no bearing.
        if float_eq!(meters, 0., abs <= f64::EPSILON) {
            return coord;
        }
        let bearing = bearing_between(pivot, point);
        offset_point(pivot, bearing + angle, meters).0
    })
}

#[cfg(test)]
#[path = "./rotate_tests.rs"]
mod tests;
