//! The `swath` library plans coverage paths for autonomous mowers.
//!
//! Given a geographic field (a bounding polygon and zero or more obstacle
//! polygons, in lon/lat degrees), the planner emits a single polyline that
//! visits as much of the field's interior as possible on parallel lanes
//! spaced by a configured lane width (a Boustrophedon sweep). When a lane is
//! interrupted by an obstacle or by previously-mowed territory, the planner
//! re-routes through a Voronoi roadmap of the free space and resumes
//! sweeping.
//!
//! The pipeline is a one-shot, synchronous dataflow:
//!
//! 1. condition the boundary against straddling obstacles,
//! 2. compute the convex hull and minimum bounding box of the result,
//! 3. lay a square coverage grid rotated to the box orientation,
//! 4. extract a Voronoi roadmap of the free space,
//! 5. sweep the grid, delegating bypass moves to a Dijkstra router,
//! 6. decorate the final path with start/end/direction markers.

// Lints {{{

#![deny(unsafe_code)]
#![warn(
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    rustdoc::all,
    clippy::all
)]
#![allow(
    // Usually yes, but not really applicable for most literals in this crate.
    clippy::unreadable_literal,
)]

// }}}

mod boundary;
pub mod error;
mod geom;
mod grid;
mod hull;
#[cfg(feature = "geojson")]
mod json;
mod markers;
mod planner;
mod roadmap;
mod route;
mod sweep;

pub use geom::PointKey;
pub use grid::{CoverageCell, CoverageGrid, VisitState};
pub use markers::{MarkerKind, PathMarker};
pub use planner::{PlanConfig, PlanResult, Planner, StartCorner};
pub use roadmap::Roadmap;

// -----------------------------------------------------------------------------

/// Mean Earth radius, in meters (IUGG recommended value, the same sphere as
/// the haversine measures used throughout).
const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Coverage ratio above which the sweep loop considers the field mowed.
const COVERAGE_TARGET: f64 = 0.99;

/// Inward tolerance, in meters, applied when testing grid cells against the
/// working boundary (soaks up boundary-precision false positives).
const BOUNDARY_EPSILON_M: f64 = 0.01;
