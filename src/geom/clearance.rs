use super::meters_between;
use crate::error::GeometryPrecision;
use geo::{
    BooleanOps, BoundingRect, Closest, ClosestPoint, Contains, Intersects,
    Line, MultiPolygon, Point, Polygon, Rect,
};

/// Padding factor applied to the boundary's bounding rectangle when
/// materializing the outside world as a polygon.
const OUTSIDE_PADDING: f64 = 0.5;

/// Builds the forbidden region: everything a mow segment must stay out of.
///
/// The complement of the working boundary cannot be represented directly, so
/// the outside world is approximated by a padded bounding rectangle minus the
/// boundary; the obstacles are appended as-is. No planned segment ever leaves
/// the rectangle, which makes the approximation exact for clearance tests.
pub(crate) fn forbidden_region(
    boundary: &Polygon,
    obstacles: &[Polygon],
) -> Result<MultiPolygon, GeometryPrecision> {
    let rect = boundary.bounding_rect().ok_or(GeometryPrecision::new(
        "working boundary without a bounding rectangle",
    ))?;

    let mut region = padded(rect).to_polygon().difference(boundary);
    region.0.extend(obstacles.iter().cloned());

    Ok(region)
}

/// Whether the segment stays clear of the forbidden region.
pub(crate) fn is_clear(segment: Line, forbidden: &MultiPolygon) -> bool {
    !segment.intersects(forbidden)
}

/// Whether the point lies inside the polygon, at least `margin` meters away
/// from its ring.
///
/// Stands in for an inward erosion of the polygon: centroids hugging the
/// ring within the margin are rejected, which soaks up boundary-precision
/// false positives without a buffering dependency.
pub(crate) fn contains_with_margin(
    polygon: &Polygon,
    point: Point,
    margin: f64,
) -> bool {
    if !polygon.contains(&point) {
        return false;
    }

    match polygon.exterior().closest_point(&point) {
        Closest::SinglePoint(nearest) | Closest::Intersection(nearest) => {
            meters_between(point, nearest) >= margin
        }
        Closest::Indeterminate => false,
    }
}

// Expand the rectangle on every side by a fraction of its larger dimension.
fn padded(rect: Rect) -> Rect {
    let padding = rect.width().max(rect.height()) * OUTSIDE_PADDING;
    Rect::new(
        (rect.min().x - padding, rect.min().y - padding),
        (rect.max().x + padding, rect.max().y + padding),
    )
}

#[cfg(test)]
#[path = "./clearance_tests.rs"]
mod tests;
