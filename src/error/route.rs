use super::GeometryPrecision;
use std::{error::Error, fmt};

/// Errors occurring while routing through the free space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RouteError {
    /// The direct line is blocked and there is no roadmap to fall back on.
    EmptyRoadmap,
    /// No obstacle-free route exists between the endpoints (either endpoint
    /// cannot be stitched onto the roadmap, or the graph search exhausted
    /// every candidate).
    NoPath,
    /// A geometry primitive failed while stitching onto the roadmap.
    Precision(GeometryPrecision),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EmptyRoadmap => write!(f, "no roadmap to route through"),
            Self::NoPath => write!(f, "no clear path between endpoints"),
            Self::Precision(err) => write!(f, "routing precision: {err}"),
        }
    }
}

impl Error for RouteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            Self::EmptyRoadmap | Self::NoPath => None,
            Self::Precision(ref err) => Some(err),
        }
    }
}

impl From<GeometryPrecision> for RouteError {
    fn from(value: GeometryPrecision) -> Self {
        Self::Precision(value)
    }
}
