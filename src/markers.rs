use crate::geom::{bearing_between, meters_between, offset_point};
use geo::{LineString, Point};

/// What a path marker denotes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerKind {
    /// Small circle at the path's first vertex.
    Start,
    /// Small circle at the path's last vertex.
    End,
    /// Arrowhead at the midpoint of a long hop.
    Direction,
}

/// A decorative feature anchored on the mow path.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathMarker {
    kind: MarkerKind,
    shape: LineString,
}

impl PathMarker {
    /// What the marker denotes.
    #[must_use]
    pub const fn kind(&self) -> MarkerKind {
        self.kind
    }

    /// The marker's polyline, in world frame.
    #[must_use]
    pub const fn shape(&self) -> &LineString {
        &self.shape
    }
}

/// Circle radius, as a fraction of the lane width.
const CIRCLE_RADIUS_FACTOR: f64 = 0.3;
/// Bearing step between circle vertices, in degrees.
const CIRCLE_STEP: f64 = 30.;
/// Hops longer than this many lane widths get a direction arrow.
const ARROW_GAP_FACTOR: f64 = 4.;
/// Arrow leg length, as a fraction of the lane width.
const ARROW_LEG_FACTOR: f64 = 0.5;
/// Angle between the segment bearing and each arrow leg, in degrees.
const ARROW_LEG_SWEEP: f64 = 150.;

/// Decorates the final path with start/end circles and direction arrows.
///
/// Consecutive vertices separated by more than `4 * lane_width` are hops
/// produced by an obstacle bypass; each gets an arrowhead at its midpoint so
/// a map reader can follow the detour.
pub(crate) fn emit(path: &LineString, lane_width: f64) -> Vec<PathMarker> {
    let mut markers = Vec::new();
    let Some(&first_coord) = path.0.first() else {
        return markers;
    };
    let first = Point::from(first_coord);
    let last = Point::from(*path.0.last().expect("non-empty path"));

    let radius = CIRCLE_RADIUS_FACTOR * lane_width;
    markers.push(PathMarker {
        kind: MarkerKind::Start,
        shape: circle(first, radius),
    });
    markers.push(PathMarker {
        kind: MarkerKind::End,
        shape: circle(last, radius),
    });

    for segment in path.lines() {
        let from = segment.start_point();
        let to = segment.end_point();
        let meters = meters_between(from, to);
        if meters <= ARROW_GAP_FACTOR * lane_width {
            continue;
        }

        let bearing = bearing_between(from, to);
        let midpoint = offset_point(from, bearing, meters / 2.);
        let leg = ARROW_LEG_FACTOR * lane_width;
        markers.push(PathMarker {
            kind: MarkerKind::Direction,
            shape: LineString::from(vec![
                offset_point(midpoint, bearing + ARROW_LEG_SWEEP, leg),
                midpoint,
                offset_point(midpoint, bearing - ARROW_LEG_SWEEP, leg),
            ]),
        });
    }

    markers
}

// A closed 12-gon around the center.
fn circle(center: Point, radius: f64) -> LineString {
    let mut ring: Vec<Point> = (0..12)
        .map(|step| {
            offset_point(center, f64::from(step) * CIRCLE_STEP, radius)
        })
        .collect();
    ring.push(ring[0]);
    ring.into_iter().collect()
}

#[cfg(test)]
#[path = "./markers_tests.rs"]
mod tests;
