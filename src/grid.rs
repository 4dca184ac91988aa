use crate::{
    error::{GeometryPrecision, PlanError},
    geom::{
        bearing_between, contains_with_margin, meters_per_lat_degree,
        meters_per_lng_degree, rotate_about,
    },
    planner::StartCorner,
    BOUNDARY_EPSILON_M,
};
use either::Either;
use float_eq::float_eq;
use geo::{
    BoundingRect, Centroid, Contains, LineString, Point, Polygon,
};
use std::ops::Range;

/// Mowing status of a coverage cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitState {
    /// Mowable, not yet covered by the path.
    Unvisited,
    /// Covered by the path.
    Visited,
    /// Outside the working boundary or inside an obstacle. Terminal.
    Unvisitable,
}

/// One square cell of the coverage grid.
///
/// Cells are congruent squares of side `lane_width` meters in the rotated
/// frame; `row`/`col` index them in that frame, row-major.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageCell {
    polygon: Polygon,
    centroid: Point,
    row: usize,
    col: usize,
    state: VisitState,
}

impl CoverageCell {
    /// The cell's outline, in world frame.
    #[must_use]
    pub const fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// The cell's centroid, in world frame.
    #[must_use]
    pub const fn centroid(&self) -> Point {
        self.centroid
    }

    /// Lane index of the cell (constant along a mowing lane).
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Position of the cell along its lane.
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Mowing status.
    #[must_use]
    pub const fn state(&self) -> VisitState {
        self.state
    }
}

/// The coverage grid: a dense, row-major sequence of labelled cells laid
/// over the minimum bounding box.
///
/// Within any row, `col` values form a contiguous range starting at 0. The
/// only mutation the grid ever sees is the sweep driver transitioning cells
/// from [`VisitState::Unvisited`] to [`VisitState::Visited`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageGrid {
    cells: Vec<CoverageCell>,
    row_starts: Vec<usize>,
}

impl CoverageGrid {
    /// The grid's cells, ordered by `(row, col)`.
    #[must_use]
    pub fn cells(&self) -> &[CoverageCell] {
        &self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cell at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of rows (mowing lanes).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_starts.len()
    }

    /// Ratio of visited cells to mowable (visited + unvisited) cells.
    ///
    /// Unvisitable cells never enter the denominator; a grid with nothing
    /// mowable counts as fully covered.
    #[must_use]
    pub fn coverage_fraction(&self) -> f64 {
        let (visited, unvisited) =
            self.cells.iter().fold((0u64, 0u64), |(v, u), cell| {
                match cell.state {
                    VisitState::Visited => (v + 1, u),
                    VisitState::Unvisited => (v, u + 1),
                    VisitState::Unvisitable => (v, u),
                }
            });
        if visited + unvisited == 0 {
            return 1.;
        }
        visited as f64 / (visited + unvisited) as f64
    }

    /// Geographic bearing of row 0, from its first to its last cell, in
    /// degrees in `[0, 360)`.
    ///
    /// Reported for display purposes; the sweep does not consume it.
    #[must_use]
    pub fn travel_heading(&self) -> f64 {
        let Some(range) = self.row_starts.first().map(|&start| {
            let end = self
                .row_starts
                .get(1)
                .copied()
                .unwrap_or(self.cells.len());
            start..end
        }) else {
            return 0.;
        };
        if range.len() < 2 {
            return 0.;
        }

        bearing_between(
            self.cells[range.start].centroid,
            self.cells[range.end - 1].centroid,
        )
    }

    /// Cell indices of a row, in lane order or reversed.
    pub(crate) fn row_indices(
        &self,
        row: usize,
        reversed: bool,
    ) -> impl Iterator<Item = usize> {
        let range = self.row_range(row);
        if reversed {
            Either::Left(range.rev())
        } else {
            Either::Right(range)
        }
    }

    /// Index of the first cell still unvisited, in scan order.
    pub(crate) fn first_unvisited(&self) -> Option<usize> {
        self.cells
            .iter()
            .position(|cell| cell.state == VisitState::Unvisited)
    }

    /// Number of unvisited cells in `row` whose `col` is within ±1 of the
    /// given one.
    pub(crate) fn unvisited_near(&self, row: usize, col: usize) -> usize {
        self.row_range(row)
            .filter(|&i| {
                let cell = &self.cells[i];
                cell.state == VisitState::Unvisited
                    && cell.col.abs_diff(col) <= 1
            })
            .count()
    }

    /// Marks a cell as visited.
    pub(crate) fn visit(&mut self, index: usize) {
        debug_assert_eq!(self.cells[index].state, VisitState::Unvisited);
        self.cells[index].state = VisitState::Visited;
    }

    fn row_range(&self, row: usize) -> Range<usize> {
        let start = self.row_starts[row];
        let end = self
            .row_starts
            .get(row + 1)
            .copied()
            .unwrap_or(self.cells.len());
        start..end
    }
}

/// Lays a square grid over the bounding box and labels every cell.
///
/// The box is swung into an axis-aligned frame (offset by a quarter turn per
/// start corner, which re-anchors the grid on another box corner), covered
/// with `lane_width`-sized squares, then swung back. Cells are generated
/// band by band: the outer loop walks x, the inner loop walks y, so a change
/// of centroid x starts a new row. The row/col labeller leans on exactly
/// that contract.
pub(crate) fn build(
    boundary: &Polygon,
    obstacles: &[Polygon],
    mbb: &Polygon,
    lane_width: f64,
    start_corner: StartCorner,
) -> Result<CoverageGrid, PlanError> {
    let ring = mbb.exterior();
    let heading =
        bearing_between(Point::from(ring.0[0]), Point::from(ring.0[1]));
    let pivot = mbb
        .centroid()
        .ok_or(GeometryPrecision::new("bounding box without a centroid"))?;

    let swing = -heading + 90. * f64::from(start_corner.index());
    let aligned = rotate_about(mbb, swing, pivot);
    let rect = aligned.bounding_rect().ok_or(GeometryPrecision::new(
        "aligned bounding box without a bounding rectangle",
    ))?;

    let lng_step = lane_width / meters_per_lng_degree(rect.center().y);
    let lat_step = lane_width / meters_per_lat_degree();

    let mut cells = Vec::new();
    let mut row_starts = Vec::new();
    let mut row = 0;
    let mut col = 0;
    let mut prev_x = f64::NAN;

    let mut x = rect.min().x;
    while x < rect.max().x {
        let mut y = rect.min().y;
        while y < rect.max().y {
            let center_x = x + lng_step / 2.;
            // The emission order contract: a centroid x-change means a new
            // row.
            if prev_x.is_nan() {
                row_starts.push(0);
            } else if !float_eq!(center_x, prev_x, abs <= 1e-12) {
                row += 1;
                col = 0;
                row_starts.push(cells.len());
            } else {
                col += 1;
            }
            prev_x = center_x;

            let square = Polygon::new(
                LineString::from(vec![
                    (x, y),
                    (x + lng_step, y),
                    (x + lng_step, y + lat_step),
                    (x, y + lat_step),
                    (x, y),
                ]),
                vec![],
            );
            let polygon = rotate_about(&square, -swing, pivot);
            let centroid = rotate_about(
                &Point::new(center_x, y + lat_step / 2.),
                -swing,
                pivot,
            );

            let state = label(boundary, obstacles, centroid);
            cells.push(CoverageCell {
                polygon,
                centroid,
                row,
                col,
                state,
            });

            y += lat_step;
        }
        x += lng_step;
    }

    log::debug!(
        "coverage grid: {} cells in {} rows",
        cells.len(),
        row_starts.len(),
    );

    Ok(CoverageGrid { cells, row_starts })
}

// A cell is mowable when its centroid sits inside the working boundary
// (with an inward tolerance) and outside every obstacle.
fn label(
    boundary: &Polygon,
    obstacles: &[Polygon],
    centroid: Point,
) -> VisitState {
    if !contains_with_margin(boundary, centroid, BOUNDARY_EPSILON_M) {
        return VisitState::Unvisitable;
    }
    if obstacles.iter().any(|obstacle| obstacle.contains(&centroid)) {
        return VisitState::Unvisitable;
    }
    VisitState::Unvisited
}

#[cfg(test)]
#[path = "./grid_tests.rs"]
mod tests;
