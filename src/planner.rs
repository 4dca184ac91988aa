use crate::{
    boundary,
    error::{InvalidPlanConfig, InvalidStartCorner, PlanError},
    geom, grid,
    grid::CoverageGrid,
    hull, markers,
    markers::PathMarker,
    roadmap,
    roadmap::Roadmap,
    sweep,
};
use geo::{LineString, Polygon};
use std::fmt;

/// Lane widths at or below this many meters are rejected.
const MIN_LANE_WIDTH_M: f64 = 0.1;

/// Which corner of the minimum bounding box anchors the coverage grid.
///
/// Each step swings the grid by a quarter turn, so the sweep can start from
/// any of the box's four corners.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartCorner {
    /// The box corner the minimum-bounding-box search anchors on.
    #[default]
    Zero,
    /// One quarter turn on.
    One,
    /// Two quarter turns on (the opposite corner).
    Two,
    /// Three quarter turns on.
    Three,
}

impl StartCorner {
    /// Number of quarter turns the corner stands for.
    pub(crate) const fn index(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<u8> for StartCorner {
    type Error = InvalidStartCorner;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            _ => Err(InvalidStartCorner::new(
                Some(value),
                "out of range (must be in [0; 3])",
            )),
        }
    }
}

impl From<StartCorner> for u8 {
    fn from(value: StartCorner) -> Self {
        value.index()
    }
}

impl fmt::Display for StartCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

// -----------------------------------------------------------------------------

/// Planner configuration.
///
/// `lane_width` is the only mandatory knob; the rest defaults to a plain
/// sweep anchored on corner [`StartCorner::Zero`] with no extra rotation.
///
/// # Example
///
/// ```
/// use swath::{PlanConfig, StartCorner};
///
/// let config = PlanConfig::new(0.25)?
///     .with_mbb_orientation_offset(45.)?
///     .with_start_corner(StartCorner::Two);
/// # Ok::<(), swath::error::InvalidPlanConfig>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanConfig {
    lane_width: f64,
    obstacle_margin: f64,
    mbb_orientation_offset: f64,
    start_corner: StartCorner,
}

impl PlanConfig {
    /// Initializes a new configuration with the given lane width, in meters.
    ///
    /// # Errors
    ///
    /// [`InvalidPlanConfig`] when the lane width is not a finite number
    /// above 0.1 m.
    pub fn new(lane_width: f64) -> Result<Self, InvalidPlanConfig> {
        if !lane_width.is_finite() || lane_width <= MIN_LANE_WIDTH_M {
            return Err(InvalidPlanConfig::new(
                lane_width,
                "lane width must exceed 0.1 m",
            ));
        }
        Ok(Self {
            lane_width,
            obstacle_margin: 0.,
            mbb_orientation_offset: 0.,
            start_corner: StartCorner::Zero,
        })
    }

    /// Sets the obstacle margin, in meters.
    ///
    /// Reserved: the margin is carried through the configuration but no
    /// pipeline stage consumes it yet.
    ///
    /// # Errors
    ///
    /// [`InvalidPlanConfig`] when the margin is negative or not finite.
    pub fn with_obstacle_margin(
        mut self,
        meters: f64,
    ) -> Result<Self, InvalidPlanConfig> {
        if !meters.is_finite() || meters < 0. {
            return Err(InvalidPlanConfig::new(
                meters,
                "obstacle margin must be non-negative",
            ));
        }
        self.obstacle_margin = meters;
        Ok(self)
    }

    /// Sets an extra rotation applied to the minimum bounding box, in
    /// degrees.
    ///
    /// # Errors
    ///
    /// [`InvalidPlanConfig`] when the offset is outside `[0, 180]`.
    pub fn with_mbb_orientation_offset(
        mut self,
        degrees: f64,
    ) -> Result<Self, InvalidPlanConfig> {
        if !degrees.is_finite() || !(0. ..=180.).contains(&degrees) {
            return Err(InvalidPlanConfig::new(
                degrees,
                "orientation offset must be in [0; 180]",
            ));
        }
        self.mbb_orientation_offset = degrees;
        Ok(self)
    }

    /// Sets the grid anchoring corner.
    #[must_use]
    pub const fn with_start_corner(mut self, corner: StartCorner) -> Self {
        self.start_corner = corner;
        self
    }

    /// Lane width, in meters.
    #[must_use]
    pub const fn lane_width(&self) -> f64 {
        self.lane_width
    }

    /// Obstacle margin, in meters (reserved, currently a no-op).
    #[must_use]
    pub const fn obstacle_margin(&self) -> f64 {
        self.obstacle_margin
    }

    /// Extra bounding-box rotation, in degrees.
    #[must_use]
    pub const fn mbb_orientation_offset(&self) -> f64 {
        self.mbb_orientation_offset
    }

    /// Grid anchoring corner.
    #[must_use]
    pub const fn start_corner(&self) -> StartCorner {
        self.start_corner
    }
}

// -----------------------------------------------------------------------------

/// The coverage-path planner.
///
/// A `Planner` is a frozen configuration; [`Planner::plan`] is a pure
/// function of its inputs, so identical calls yield identical results.
///
/// # Example
///
/// ```
/// use geo::polygon;
/// use swath::{PlanConfig, Planner};
///
/// let boundary = polygon![
///     (x: 0., y: 0.),
///     (x: 0.00001, y: 0.),
///     (x: 0.00001, y: 0.00001),
///     (x: 0., y: 0.00001),
///     (x: 0., y: 0.),
/// ];
/// let planner = Planner::new(PlanConfig::new(0.25)?);
/// let result = planner.plan(boundary, [])?;
///
/// assert!(result.coverage_fraction() > 0.9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Planner {
    config: PlanConfig,
}

impl Planner {
    /// Initializes a new planner with the given configuration.
    #[must_use]
    pub const fn new(config: PlanConfig) -> Self {
        Self { config }
    }

    /// The planner's configuration.
    #[must_use]
    pub const fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Plans a coverage path over the given field.
    ///
    /// The boundary and the obstacles are lon/lat degree polygons (exterior
    /// rings only). The whole derived state is recomputed from scratch on
    /// every call.
    ///
    /// # Errors
    ///
    /// - [`PlanError::EmptyBoundary`] when conditioning clips the whole
    ///   boundary away.
    /// - [`PlanError::DegenerateHull`] when the boundary collapses to fewer
    ///   than three distinct vertices.
    /// - [`PlanError::Precision`] when a geometry primitive misbehaves.
    pub fn plan(
        &self,
        boundary: Polygon,
        obstacles: impl IntoIterator<Item = Polygon>,
    ) -> Result<PlanResult, PlanError> {
        let obstacles: Vec<Polygon> = obstacles.into_iter().collect();

        let (working_boundary, working_obstacles) =
            boundary::condition(&boundary, &obstacles)?;
        let hull = hull::convex_hull_of(&working_boundary)?;
        let mbb = hull::minimum_bounding_box(
            &hull,
            self.config.mbb_orientation_offset,
        )?;
        let mut coverage_grid = grid::build(
            &working_boundary,
            &working_obstacles,
            &mbb,
            self.config.lane_width,
            self.config.start_corner,
        )?;
        let roadmap = roadmap::build(&working_boundary, &working_obstacles);
        let forbidden =
            geom::forbidden_region(&working_boundary, &working_obstacles)?;

        let travel_heading = coverage_grid.travel_heading();
        let mow_path = sweep::drive(
            &mut coverage_grid,
            &roadmap,
            &forbidden,
            self.config.lane_width,
        );
        let markers = markers::emit(&mow_path, self.config.lane_width);
        let coverage_fraction = coverage_grid.coverage_fraction();

        log::debug!(
            "plan: {} path vertices, coverage {coverage_fraction:.3}",
            mow_path.0.len(),
        );

        Ok(PlanResult {
            working_boundary,
            working_obstacles,
            hull,
            mbb,
            coverage_grid,
            roadmap,
            mow_path,
            markers,
            travel_heading,
            coverage_fraction,
        })
    }
}

// -----------------------------------------------------------------------------

/// Everything a planning run derives from its inputs.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanResult {
    working_boundary: Polygon,
    working_obstacles: Vec<Polygon>,
    hull: Polygon,
    mbb: Polygon,
    coverage_grid: CoverageGrid,
    roadmap: Roadmap,
    mow_path: LineString,
    markers: Vec<PathMarker>,
    travel_heading: f64,
    coverage_fraction: f64,
}

impl PlanResult {
    /// The conditioned boundary every stage operated on.
    #[must_use]
    pub const fn working_boundary(&self) -> &Polygon {
        &self.working_boundary
    }

    /// The obstacles kept after conditioning (all inside the boundary).
    #[must_use]
    pub fn working_obstacles(&self) -> &[Polygon] {
        &self.working_obstacles
    }

    /// Convex hull of the working boundary.
    #[must_use]
    pub const fn hull(&self) -> &Polygon {
        &self.hull
    }

    /// Minimum bounding box orienting the sweep.
    #[must_use]
    pub const fn mbb(&self) -> &Polygon {
        &self.mbb
    }

    /// The labelled coverage grid, after the sweep.
    #[must_use]
    pub const fn coverage_grid(&self) -> &CoverageGrid {
        &self.coverage_grid
    }

    /// The Voronoi roadmap used for bypass routing.
    #[must_use]
    pub const fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    /// The planned mow path.
    #[must_use]
    pub const fn mow_path(&self) -> &LineString {
        &self.mow_path
    }

    /// Start/end/direction markers decorating the path.
    #[must_use]
    pub fn markers(&self) -> &[PathMarker] {
        &self.markers
    }

    /// Bearing of the first mowing lane, in degrees in `[0, 360)`.
    #[must_use]
    pub const fn travel_heading(&self) -> f64 {
        self.travel_heading
    }

    /// Ratio of mowed to mowable cells, in `[0, 1]`.
    #[must_use]
    pub const fn coverage_fraction(&self) -> f64 {
        self.coverage_fraction
    }
}

#[cfg(test)]
#[path = "./planner_tests.rs"]
mod tests;
