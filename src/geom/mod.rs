//! Geometry primitives shared by the planning pipeline.
//!
//! Every stage speaks lon/lat degrees but reasons about meters; the helpers
//! here pin the conversion to a single spherical model so that grid sizing,
//! routing weights and pruning thresholds all agree.

mod clearance;
mod fingerprint;
mod polyline;
mod rotate;

pub use fingerprint::PointKey;

pub(crate) use clearance::{contains_with_margin, forbidden_region, is_clear};
pub(crate) use polyline::{
    dedup_consecutive, nearest_point_on, prune, split_at,
};
pub(crate) use rotate::rotate_about;

use crate::MEAN_EARTH_RADIUS_M;
use geo::line_measures::LengthMeasurable;
use geo::{Bearing, Destination, Distance, Haversine, LineString, Point};
use std::f64::consts::PI;

/// Great-circle distance between two points, in meters.
pub(crate) fn meters_between(origin: Point, destination: Point) -> f64 {
    Haversine.distance(origin, destination)
}

/// Geographic bearing from `origin` to `destination`, in degrees in
/// `[0, 360)` (North: 0, East: 90).
pub(crate) fn bearing_between(origin: Point, destination: Point) -> f64 {
    Haversine.bearing(origin, destination)
}

/// The point reached by travelling `meters` from `origin` along `bearing`.
pub(crate) fn offset_point(origin: Point, bearing: f64, meters: f64) -> Point {
    Haversine.destination(origin, bearing, meters)
}

/// Great-circle length of a polyline, in meters.
pub(crate) fn polyline_meters(polyline: &LineString) -> f64 {
    polyline.length(&Haversine)
}

/// Meters spanned by one degree of latitude on the mean-radius sphere.
pub(crate) fn meters_per_lat_degree() -> f64 {
    MEAN_EARTH_RADIUS_M * PI / 180.
}

/// Meters spanned by one degree of longitude at the given latitude.
pub(crate) fn meters_per_lng_degree(lat: f64) -> f64 {
    meters_per_lat_degree() * lat.to_radians().cos()
}
