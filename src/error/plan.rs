use super::{GeometryPrecision, RouteError};
use std::{error::Error, fmt};

/// Errors occurring while planning a coverage path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanError {
    /// The boundary conditioner returned no polygon (the whole boundary was
    /// clipped away by straddling obstacles).
    EmptyBoundary,
    /// The working boundary's convex hull has fewer than three distinct
    /// vertices.
    DegenerateHull,
    /// A routing query failed.
    ///
    /// Resume routing inside the sweep degrades to partial coverage instead
    /// of failing; this variant surfaces errors from routing queries issued
    /// through the planner's own surface.
    Route(RouteError),
    /// A geometry primitive returned an inconsistent result.
    Precision(GeometryPrecision),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EmptyBoundary => write!(f, "empty working boundary"),
            Self::DegenerateHull => write!(f, "degenerate convex hull"),
            Self::Route(err) => write!(f, "routing: {err}"),
            Self::Precision(err) => write!(f, "geometry precision: {err}"),
        }
    }
}

impl Error for PlanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            Self::EmptyBoundary | Self::DegenerateHull => None,
            Self::Route(ref err) => Some(err),
            Self::Precision(ref err) => Some(err),
        }
    }
}

impl From<RouteError> for PlanError {
    fn from(value: RouteError) -> Self {
        Self::Route(value)
    }
}

impl From<GeometryPrecision> for PlanError {
    fn from(value: GeometryPrecision) -> Self {
        Self::Precision(value)
    }
}
