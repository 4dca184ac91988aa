//! Swath error types.

mod config;
mod geometry;
mod plan;
mod route;


pub use config::{InvalidPlanConfig, InvalidStartCorner};
pub use geometry::GeometryPrecision;
pub use plan::PlanError;
pub use route::RouteError;
