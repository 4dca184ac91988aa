use crate::geom::PointKey;
use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use geo::{BooleanOps, Coord, Intersects, LineString, Polygon};

// One undirected Voronoi edge surviving the clip, keyed by its endpoint
// fingerprints.
struct RawEdge {
    a: PointKey,
    b: PointKey,
    ends: [Coord; 2],
}

impl RawEdge {
    // The coordinate opposite to `from`, oriented by fingerprint.
    fn far_end(&self, from: PointKey) -> Coord {
        if self.a == from {
            self.ends[1]
        } else {
            self.ends[0]
        }
    }

    fn far_key(&self, from: PointKey) -> PointKey {
        if self.a == from {
            self.b
        } else {
            self.a
        }
    }
}

/// Reduces Voronoi cells to the junction-to-junction skeleton of the free
/// space.
///
/// Cells are clipped to the boundary; ring segments touching an obstacle are
/// pruned; the remaining unique edges are walked from every junction (a
/// vertex of degree > 2) through degree-2 chains and emitted as one polyline
/// per junction pair. Chains that die out at a degree-1 vertex are dropped:
/// the skeleton keeps junction-to-junction connectivity only.
pub(crate) fn junction_skeleton(
    cells: &[Polygon],
    boundary: &Polygon,
    obstacles: &[Polygon],
) -> Vec<LineString> {
    let edges = clipped_edges(cells, boundary, obstacles);

    let mut degree: HashMap<PointKey, usize> = HashMap::new();
    let mut adjacency: HashMap<PointKey, Vec<usize>> = HashMap::new();
    for (index, edge) in edges.iter().enumerate() {
        *degree.entry(edge.a).or_default() += 1;
        *degree.entry(edge.b).or_default() += 1;
        adjacency.entry(edge.a).or_default().push(index);
        adjacency.entry(edge.b).or_default().push(index);
    }

    let mut junctions: Vec<PointKey> = degree
        .iter()
        .filter(|&(_, &count)| count > 2)
        .map(|(&key, _)| key)
        .collect();
    // Hash order is not an emission order.
    junctions.sort_unstable();

    let mut visited = vec![false; edges.len()];
    let mut segments = Vec::new();
    for &junction in &junctions {
        for &first in &adjacency[&junction] {
            if visited[first] {
                continue;
            }
            visited[first] = true;

            let mut chain = vec![
                edges[first].far_end(edges[first].far_key(junction)),
                edges[first].far_end(junction),
            ];
            let mut cursor = edges[first].far_key(junction);

            let ends_at_junction = loop {
                if degree[&cursor] > 2 {
                    break true;
                }
                let Some(&next) = adjacency[&cursor]
                    .iter()
                    .find(|&&index| !visited[index])
                else {
                    // Dead-end chain: swallow it, emit nothing.
                    break false;
                };
                visited[next] = true;
                chain.push(edges[next].far_end(cursor));
                cursor = edges[next].far_key(cursor);
            };

            if ends_at_junction {
                segments.push(LineString::new(chain));
            }
        }
    }

    segments
}

// Clip every cell to the boundary and collect the unique, obstacle-free ring
// segments.
fn clipped_edges(
    cells: &[Polygon],
    boundary: &Polygon,
    obstacles: &[Polygon],
) -> Vec<RawEdge> {
    let mut seen: HashSet<(PointKey, PointKey)> = HashSet::new();
    let mut edges = Vec::new();

    for cell in cells {
        if !cell.intersects(boundary) {
            continue;
        }
        for piece in cell.intersection(boundary) {
            for segment in piece.exterior().lines() {
                let a = PointKey::of_coord(segment.start);
                let b = PointKey::of_coord(segment.end);
                if a == b {
                    continue;
                }
                if obstacles
                    .iter()
                    .any(|obstacle| segment.intersects(obstacle))
                {
                    continue;
                }
                let key = if a <= b { (a, b) } else { (b, a) };
                if !seen.insert(key) {
                    continue;
                }
                edges.push(RawEdge {
                    a,
                    b,
                    ends: [segment.start, segment.end],
                });
            }
        }
    }

    edges
}

#[cfg(test)]
#[path = "./skeleton_tests.rs"]
mod tests;
