use crate::{
    geom::{is_clear, prune, PointKey},
    grid::{CoverageGrid, VisitState},
    roadmap::Roadmap,
    route, COVERAGE_TARGET,
};
use geo::{Coord, Line, LineString, MultiPolygon, Point};

/// Runs Boustrophedon passes over the grid until the field is covered or a
/// pass stops making progress, then prunes the path.
///
/// Every pass after the first starts by routing from the path's end back to
/// the first cell left unvisited; a pass that cannot route simply leaves the
/// path unchanged. Partial coverage is a legitimate outcome, not a failure.
pub(crate) fn drive(
    grid: &mut CoverageGrid,
    roadmap: &Roadmap,
    forbidden: &MultiPolygon,
    lane_width: f64,
) -> LineString {
    let mut path: Vec<Coord> = Vec::new();

    loop {
        let before = path.len();
        run_pass(&mut path, grid, roadmap, forbidden);
        if grid.coverage_fraction() >= COVERAGE_TARGET
            || path.len() == before
        {
            break;
        }
    }

    log::debug!(
        "sweep: {} vertices before pruning, coverage {:.3}",
        path.len(),
        grid.coverage_fraction(),
    );

    prune(&LineString::new(path), lane_width / 2.)
}

// One pass over the rows, in increasing row order. Emits row entry and exit
// waypoints; lane interiors stay implicit. Returns early when it detects
// unmowed territory left behind the current lane, so the next pass can
// route back to it.
fn run_pass(
    path: &mut Vec<Coord>,
    grid: &mut CoverageGrid,
    roadmap: &Roadmap,
    forbidden: &MultiPolygon,
) {
    let mut waypoints: Vec<Coord> = Vec::new();

    if let Some(&resume_from) = path.last() {
        let Some(target) = grid.first_unvisited() else {
            return;
        };
        let target = grid.cells()[target].centroid();
        match route::clear_path(
            roadmap,
            Point::from(resume_from),
            target,
            forbidden,
        ) {
            Ok(detour) => append(path, &detour.0),
            // Unreachable leftovers are not fatal.
            Err(_) => return,
        }
    }

    for row in 0..grid.row_count() {
        // Boustrophedon: odd rows run backwards.
        let candidates: Vec<usize> = grid
            .row_indices(row, row % 2 == 1)
            .filter(|&i| grid.cells()[i].state() == VisitState::Unvisited)
            .collect();
        if candidates.is_empty() {
            continue;
        }

        // Enter at the first cell with a straight free segment from the
        // previous waypoint; a row with no such cell is skipped entirely.
        let previous = waypoints.last().or(path.last()).copied();
        let entry = match previous {
            None => 0,
            Some(from) => {
                match candidates.iter().position(|&i| {
                    let to = grid.cells()[i].centroid().0;
                    is_clear(Line::new(from, to), forbidden)
                }) {
                    Some(position) => position,
                    None => continue,
                }
            }
        };

        let entry_index = candidates[entry];
        grid.visit(entry_index);
        waypoints.push(grid.cells()[entry_index].centroid().0);
        let mut previous_col = grid.cells()[entry_index].col();
        let mut previous_centroid = grid.cells()[entry_index].centroid().0;

        for position in entry + 1..candidates.len() {
            let index = candidates[position];
            let (col, centroid) = {
                let cell = &grid.cells()[index];
                (cell.col(), cell.centroid().0)
            };

            if col.abs_diff(previous_col) > 1 {
                // Obstacle gap: close the lane here; a later pass comes
                // back for the far side.
                waypoints.push(previous_centroid);
                break;
            }

            if row > 0 && grid.unvisited_near(row - 1, col) >= 2 {
                // Unmowed territory behind the current lane: emit, bail
                // out, and let the next pass route back to it.
                grid.visit(index);
                waypoints.push(centroid);
                append(path, &waypoints);
                return;
            }

            grid.visit(index);
            if position == candidates.len() - 1 {
                waypoints.push(centroid);
            }
            previous_col = col;
            previous_centroid = centroid;
        }
    }

    append(path, &waypoints);
}

// Extend the path, collapsing fingerprint-equal joints.
fn append(path: &mut Vec<Coord>, coords: &[Coord]) {
    for &coord in coords {
        let duplicate = path.last().is_some_and(|&last| {
            PointKey::of_coord(last) == PointKey::of_coord(coord)
        });
        if !duplicate {
            path.push(coord);
        }
    }
}

#[cfg(test)]
#[path = "./sweep_tests.rs"]
mod tests;
