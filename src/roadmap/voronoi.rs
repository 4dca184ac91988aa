use geo::{Coord, LineString, Point, Polygon};
use spade::{
    handles::VoronoiVertex::{Inner, Outer},
    DelaunayTriangulation, Point2, Triangulation,
};
use std::fmt;

/// Why no Voronoi diagram could be produced for a seed set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum VoronoiFailure {
    /// Fewer than three distinct sites after snapping.
    TooFewSites,
    /// All sites are collinear: cells would be unbounded strips.
    CollinearSites,
    /// A site coordinate was rejected by the triangulation.
    InvalidSite,
}

impl fmt::Display for VoronoiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TooFewSites => write!(f, "fewer than three sites"),
            Self::CollinearSites => write!(f, "collinear sites"),
            Self::InvalidSite => write!(f, "invalid site coordinate"),
        }
    }
}

/// Computes one Voronoi cell polygon per seed.
///
/// The diagram is the dual of a Delaunay triangulation: circumcenters of the
/// triangles are the cell vertices. Cells of hull sites are unbounded; their
/// rays are extended far past the seed bounding box, so callers must clip
/// the result to their region of interest.
pub(crate) fn cells_for(
    seeds: &[Point],
) -> Result<Vec<Polygon>, VoronoiFailure> {
    let mut triangulation: DelaunayTriangulation<Point2<f64>> =
        DelaunayTriangulation::new();
    for seed in seeds {
        triangulation
            .insert(Point2::new(seed.x(), seed.y()))
            .map_err(|_| VoronoiFailure::InvalidSite)?;
    }
    if triangulation.num_vertices() < 3 {
        return Err(VoronoiFailure::TooFewSites);
    }

    // Rays must overshoot any clip window a caller may use.
    let (width, height) = seed_extent(seeds);
    let extension = (width + height) * 4.;

    let mut cells = Vec::new();
    for face in triangulation.voronoi_faces() {
        let edges: Vec<_> = face.adjacent_edges().collect();
        if edges.is_empty() {
            continue;
        }

        let vertex = face.as_delaunay_vertex();
        let site = vertex.data();
        let mut vertices: Vec<Coord> = Vec::new();
        let mut rays: Vec<(Coord, Coord)> = Vec::new();

        for edge in &edges {
            for vertex in [edge.from(), edge.to()] {
                if let Inner(inner) = vertex {
                    let circumcenter = inner.circumcenter();
                    let coord = Coord {
                        x: circumcenter.x,
                        y: circumcenter.y,
                    };
                    if !vertices.contains(&coord) {
                        vertices.push(coord);
                    }
                }
            }

            // An inner/outer pair is a ray from a circumcenter to infinity.
            match (edge.from(), edge.to()) {
                (Inner(inner), Outer(outer))
                | (Outer(outer), Inner(inner)) => {
                    let origin = inner.circumcenter();
                    let direction = outer.direction_vector();
                    rays.push((
                        Coord {
                            x: origin.x,
                            y: origin.y,
                        },
                        Coord {
                            x: direction.x,
                            y: direction.y,
                        },
                    ));
                }
                _ => {}
            }
        }

        for (origin, direction) in &rays {
            let length =
                (direction.x * direction.x + direction.y * direction.y).sqrt();
            if !length.is_finite() || length == 0. {
                continue;
            }
            vertices.push(Coord {
                x: origin.x + direction.x / length * extension,
                y: origin.y + direction.y / length * extension,
            });
        }

        if vertices.len() < 3 {
            continue;
        }

        // Order the cell ring by angle around its site.
        vertices.sort_by(|a, b| {
            let angle_a = (a.y - site.y).atan2(a.x - site.x);
            let angle_b = (b.y - site.y).atan2(b.x - site.x);
            angle_a.total_cmp(&angle_b)
        });
        vertices.push(vertices[0]);

        cells.push(Polygon::new(LineString::new(vertices), vec![]));
    }

    if cells.is_empty() {
        return Err(VoronoiFailure::CollinearSites);
    }

    Ok(cells)
}

fn seed_extent(seeds: &[Point]) -> (f64, f64) {
    let (min_x, min_y, max_x, max_y) = seeds.iter().fold(
        (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
        |(min_x, min_y, max_x, max_y), seed| {
            (
                min_x.min(seed.x()),
                min_y.min(seed.y()),
                max_x.max(seed.x()),
                max_y.max(seed.y()),
            )
        },
    );
    (max_x - min_x, max_y - min_y)
}

#[cfg(test)]
#[path = "./voronoi_tests.rs"]
mod tests;
