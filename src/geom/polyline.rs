use super::{meters_between, PointKey};
use crate::error::GeometryPrecision;
use geo::{Closest, ClosestPoint, EuclideanDistance, LineString, Point};

/// Nearest point on the polyline to the given point.
///
/// # Errors
///
/// [`GeometryPrecision`] when the closest-point query is indeterminate
/// (degenerate polyline).
pub(crate) fn nearest_point_on(
    polyline: &LineString,
    point: Point,
) -> Result<Point, GeometryPrecision> {
    match polyline.closest_point(&point) {
        Closest::SinglePoint(nearest) | Closest::Intersection(nearest) => {
            Ok(nearest)
        }
        Closest::Indeterminate => Err(GeometryPrecision::new(
            "indeterminate closest point on polyline",
        )),
    }
}

/// Splits a polyline at a point assumed to lie on (or next to) it.
///
/// The split point is snapped into the sub-segment nearest to it and becomes
/// the last vertex of the head and the first vertex of the tail.
pub(crate) fn split_at(
    polyline: &LineString,
    point: Point,
) -> (LineString, LineString) {
    let mut nearest = 0;
    let mut nearest_distance = f64::INFINITY;
    for (i, segment) in polyline.lines().enumerate() {
        let distance = point.euclidean_distance(&segment);
        if distance < nearest_distance {
            nearest = i;
            nearest_distance = distance;
        }
    }

    let mut head = polyline.0[..=nearest].to_vec();
    head.push(point.0);
    let mut tail = vec![point.0];
    tail.extend_from_slice(&polyline.0[nearest + 1..]);

    (
        dedup_consecutive(LineString::new(head)),
        dedup_consecutive(LineString::new(tail)),
    )
}

/// Drops consecutive vertices sharing the same fingerprint.
pub(crate) fn dedup_consecutive(polyline: LineString) -> LineString {
    let mut coords = polyline.0;
    coords.dedup_by_key(|coord| PointKey::of_coord(*coord));
    LineString::new(coords)
}

/// Thins a polyline, keeping a vertex only when it is farther than
/// `min_separation` meters from the last kept vertex.
///
/// The first vertex is always kept. Applying the pruning twice with the same
/// separation yields the same polyline as applying it once.
pub(crate) fn prune(polyline: &LineString, min_separation: f64) -> LineString {
    let mut kept: Vec<Point> = Vec::with_capacity(polyline.0.len());
    for point in polyline.points() {
        match kept.last() {
            None => kept.push(point),
            Some(&last) => {
                if meters_between(last, point) > min_separation {
                    kept.push(point);
                }
            }
        }
    }
    kept.into_iter().collect()
}

#[cfg(test)]
#[path = "./polyline_tests.rs"]
mod tests;
