use crate::error::PlanError;
use geo::{Area, BooleanOps, MultiPolygon, Polygon, Within};

/// Conditions the raw field inputs into a working boundary and a working
/// obstacle set.
///
/// Obstacles that straddle the boundary effectively redraw it: their shape is
/// subtracted from the boundary polygon. Obstacles lying entirely inside the
/// boundary stay first-class; obstacles entirely outside vanish in the
/// subtraction.
///
/// # Errors
///
/// [`PlanError::EmptyBoundary`] when the subtraction clips the whole
/// boundary away.
pub(crate) fn condition(
    boundary: &Polygon,
    obstacles: &[Polygon],
) -> Result<(Polygon, Vec<Polygon>), PlanError> {
    let (contained, straddling): (Vec<_>, Vec<_>) = obstacles
        .iter()
        .cloned()
        .partition(|obstacle| obstacle.is_within(boundary));

    let mut working = MultiPolygon::new(vec![boundary.clone()]);
    for obstacle in &straddling {
        working = working.difference(obstacle);
    }

    let piece_count = working.0.len();
    let working = working
        .0
        .into_iter()
        .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
        .ok_or(PlanError::EmptyBoundary)?;
    if piece_count > 1 {
        // A straddling obstacle cut the field apart; mow the biggest piece.
        log::warn!(
            "boundary difference produced {piece_count} pieces, keeping the largest"
        );
    }

    log::debug!(
        "conditioned boundary: {} straddling obstacle(s) subtracted, {} kept",
        straddling.len(),
        contained.len(),
    );

    Ok((working, contained))
}

#[cfg(test)]
#[path = "./boundary_tests.rs"]
mod tests;
