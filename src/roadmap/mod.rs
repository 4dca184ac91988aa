//! Voronoi roadmap of the free space.
//!
//! The Voronoi diagram of the boundary and obstacle vertices approximates
//! the medial axis of the free space: its edges stay as far as possible from
//! the polygon sites. Edges straying into obstacles are pruned and the rest
//! is joined into junction-to-junction polylines, giving the router a
//! compact graph to search.

mod skeleton;
mod voronoi;

use crate::{
    error::RouteError,
    geom::PointKey,
    route,
};
use ahash::{HashSet, HashSetExt};
use geo::{LineString, MultiPolygon, Point, Polygon};

/// The roadmap: junction-to-junction polylines embedded in the free space.
///
/// Every segment endpoint is either a junction (a vertex where three or more
/// segments meet) or, in the degenerate outline fallback, a boundary vertex.
/// No segment crosses an obstacle or the exterior of the working boundary.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roadmap {
    segments: Vec<LineString>,
}

impl Roadmap {
    /// The roadmap's polylines.
    #[must_use]
    pub fn segments(&self) -> &[LineString] {
        &self.segments
    }

    /// Number of polylines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the roadmap has no polyline at all.
    ///
    /// An empty roadmap is legitimate (an obstacle-free field barely needs
    /// one); the router then only answers direct-line queries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Adds a polyline to the roadmap (test only).
    #[doc(hidden)]
    pub fn push(&mut self, segment: LineString) {
        self.segments.push(segment);
    }

    /// Finds a polyline from `start` to `end` that stays clear of the
    /// forbidden region.
    ///
    /// Tries the straight segment first; otherwise stitches both endpoints
    /// onto the roadmap and runs a shortest-path search over it.
    ///
    /// # Errors
    ///
    /// [`RouteError`] when no clear path exists.
    pub fn clear_path(
        &self,
        start: Point,
        end: Point,
        forbidden: &MultiPolygon,
    ) -> Result<LineString, RouteError> {
        route::clear_path(self, start, end, forbidden)
    }
}

/// Builds the roadmap for the given working boundary and obstacles.
///
/// Degenerate inputs (fewer than three distinct vertices, collinear sites)
/// fall back to the boundary outline as a single polyline.
pub(crate) fn build(boundary: &Polygon, obstacles: &[Polygon]) -> Roadmap {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();
    let rings = std::iter::once(boundary.exterior())
        .chain(obstacles.iter().map(Polygon::exterior));
    for ring in rings {
        // The closing coordinate repeats the first one.
        for coord in &ring.0[..ring.0.len().saturating_sub(1)] {
            if seen.insert(PointKey::of_coord(*coord)) {
                seeds.push(Point::from(*coord));
            }
        }
    }

    if seeds.len() < 3 {
        return outline_fallback(boundary);
    }

    let cells = match voronoi::cells_for(&seeds) {
        Ok(cells) => cells,
        Err(failure) => {
            log::warn!(
                "voronoi diagram degenerated ({failure}); \
                 falling back to the boundary outline"
            );
            return outline_fallback(boundary);
        }
    };

    let segments = skeleton::junction_skeleton(&cells, boundary, obstacles);
    log::debug!("roadmap: {} segment(s)", segments.len());

    Roadmap { segments }
}

// The boundary's outline as a one-polyline roadmap.
fn outline_fallback(boundary: &Polygon) -> Roadmap {
    Roadmap {
        segments: vec![boundary.exterior().clone()],
    }
}

#[cfg(test)]
#[path = "./build_tests.rs"]
mod tests;
