use crate::{
    error::{GeometryPrecision, PlanError},
    geom::{bearing_between, rotate_about, PointKey},
};
use ahash::{HashSet, HashSetExt};
use geo::{BoundingRect, Centroid, ConvexHull, GeodesicArea, Polygon, Rect};

/// Convex hull of the working boundary's vertices.
///
/// # Errors
///
/// [`PlanError::DegenerateHull`] when the hull has fewer than three distinct
/// vertices.
pub(crate) fn convex_hull_of(boundary: &Polygon) -> Result<Polygon, PlanError> {
    let hull = boundary.convex_hull();

    let mut distinct = HashSet::new();
    let ring = &hull.exterior().0;
    for coord in &ring[..ring.len().saturating_sub(1)] {
        distinct.insert(PointKey::of_coord(*coord));
    }
    if distinct.len() < 3 {
        return Err(PlanError::DegenerateHull);
    }

    Ok(hull)
}

/// Minimum-area bounding rectangle of the hull, by rotating calipers.
///
/// Only rectangles with a side parallel to a hull edge are candidates: for
/// each edge, the hull is rotated about its centroid so that the edge points
/// north, the axis-aligned bounding box of the rotated hull is measured, and
/// the smallest box (by geodesic area) wins and is rotated back into the
/// world frame.
///
/// A non-zero `orientation_offset` (degrees) replaces the winning rectangle
/// with one recomputed from the bearing of the *last* hull edge considered,
/// shifted by the offset. Callers relying on a stable sweep direction under
/// user offsets depend on this pivot choice; keep it.
///
/// # Errors
///
/// [`PlanError::DegenerateHull`] when no candidate rectangle exists.
pub(crate) fn minimum_bounding_box(
    hull: &Polygon,
    orientation_offset: f64,
) -> Result<Polygon, PlanError> {
    let pivot = hull
        .centroid()
        .ok_or(GeometryPrecision::new("hull without a centroid"))?;

    let mut best: Option<(f64, f64, Rect)> = None;
    let mut last_bearing = 0.;
    for edge in hull.exterior().lines() {
        if PointKey::of_coord(edge.start) == PointKey::of_coord(edge.end) {
            continue;
        }
        let bearing = bearing_between(edge.start_point(), edge.end_point());
        last_bearing = bearing;

        let aligned = rotate_about(hull, -bearing, pivot);
        let rect = aligned.bounding_rect().ok_or(GeometryPrecision::new(
            "rotated hull without a bounding rectangle",
        ))?;
        let area = rect.to_polygon().geodesic_area_unsigned();

        if best.map_or(true, |(best_area, _, _)| area < best_area) {
            best = Some((area, bearing, rect));
        }
    }

    let Some((_, bearing, rect)) = best else {
        return Err(PlanError::DegenerateHull);
    };

    if orientation_offset > 0. {
        let bearing = last_bearing + orientation_offset;
        let aligned = rotate_about(hull, -bearing, pivot);
        let rect = aligned.bounding_rect().ok_or(GeometryPrecision::new(
            "rotated hull without a bounding rectangle",
        ))?;
        return Ok(rotate_about(&rect.to_polygon(), bearing, pivot));
    }

    Ok(rotate_about(&rect.to_polygon(), bearing, pivot))
}

#[cfg(test)]
#[path = "./hull_tests.rs"]
mod tests;
