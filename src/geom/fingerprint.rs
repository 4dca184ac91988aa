use geo::{Coord, Point};

/// Decimal places of degrees kept by a fingerprint (~0.11 m at the equator).
///
/// Floating-point Voronoi output tends to produce coincident-but-not-equal
/// endpoints; junction detection and graph keying need an equivalence class,
/// and this is it.
const FINGERPRINT_DECIMALS: i32 = 6;

/// Canonical rounded representation of a point.
///
/// `PointKey` is the only legal way to key a map or a set by a point:
/// coordinates are rounded to [`FINGERPRINT_DECIMALS`] decimal places of
/// degrees and stored as scaled integers, so two points closer than the
/// rounding step share the same key.
///
/// # Example
///
/// ```
/// use geo::Point;
/// use swath::PointKey;
///
/// let a = PointKey::of(Point::new(2.3495, 48.8534));
/// let b = PointKey::of(Point::new(2.3495000001, 48.8534));
///
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointKey {
    x: i64,
    y: i64,
}

impl PointKey {
    /// Computes the fingerprint of the given point.
    #[must_use]
    pub fn of(point: Point) -> Self {
        Self::of_coord(point.0)
    }

    /// Computes the fingerprint of the given coordinate.
    #[must_use]
    pub(crate) fn of_coord(coord: Coord) -> Self {
        let scale = 10_f64.powi(FINGERPRINT_DECIMALS);
        Self {
            x: (coord.x * scale).round() as i64,
            y: (coord.y * scale).round() as i64,
        }
    }
}

#[cfg(test)]
#[path = "./fingerprint_tests.rs"]
mod tests;
