use crate::{
    error::RouteError,
    geom::{
        dedup_consecutive, is_clear, meters_between, nearest_point_on,
        polyline_meters, split_at, PointKey,
    },
    roadmap::Roadmap,
};
use ahash::{HashMap, HashMapExt};
use geo::{EuclideanDistance, Line, LineString, MultiPolygon, Point};
use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

/// Where an endpoint latched onto the roadmap.
#[derive(Clone, Copy)]
struct Stitch {
    /// Index of the landing segment.
    segment: usize,
    /// Landing point on that segment.
    point: Point,
}

/// One directed edge of the temporary routing graph.
struct GraphEdge {
    to: PointKey,
    meters: f64,
    /// The polyline realizing the edge, oriented from the owning node.
    path: LineString,
}

/// Finds a polyline from `start` to `end` that stays clear of the forbidden
/// region.
///
/// The straight segment wins when it is free. Otherwise both endpoints are
/// stitched onto their nearest reachable roadmap segments, the landing
/// segments are split at the stitch points, and a shortest-path search runs
/// over the resulting graph with great-circle polyline lengths as weights.
///
/// # Errors
///
/// - [`RouteError::EmptyRoadmap`] when the direct line is blocked and there
///   is no roadmap.
/// - [`RouteError::NoPath`] when an endpoint cannot be stitched or the
///   search exhausts the graph.
pub(crate) fn clear_path(
    roadmap: &Roadmap,
    start: Point,
    end: Point,
    forbidden: &MultiPolygon,
) -> Result<LineString, RouteError> {
    if is_clear(Line::new(start, end), forbidden)
        || PointKey::of(start) == PointKey::of(end)
    {
        return Ok(LineString::from(vec![start, end]));
    }
    if roadmap.is_empty() {
        return Err(RouteError::EmptyRoadmap);
    }

    let from = stitch(roadmap, start, forbidden)?.ok_or(RouteError::NoPath)?;
    let to = stitch(roadmap, end, forbidden)?.ok_or(RouteError::NoPath)?;

    let mut segments: Vec<LineString> = Vec::with_capacity(roadmap.len() + 4);
    for (index, segment) in roadmap.segments().iter().enumerate() {
        if index == from.segment || index == to.segment {
            continue;
        }
        push_segment(&mut segments, segment.clone());
    }

    // Split the landing segments so the graph has a node exactly at each
    // stitch point.
    if from.segment == to.segment {
        let (head, tail) =
            split_at(&roadmap.segments()[from.segment], from.point);
        // The second stitch lands on one of the two halves; a half reduced
        // to a lone vertex cannot host it.
        let lands_on_head = head.0.len() >= 2
            && (tail.0.len() < 2
                || to.point.euclidean_distance(&head)
                    <= to.point.euclidean_distance(&tail));
        if lands_on_head {
            let (first, second) = split_at(&head, to.point);
            push_segment(&mut segments, first);
            push_segment(&mut segments, second);
            push_segment(&mut segments, tail);
        } else {
            let (first, second) = split_at(&tail, to.point);
            push_segment(&mut segments, head);
            push_segment(&mut segments, first);
            push_segment(&mut segments, second);
        }
    } else {
        for stitched in [from, to] {
            let (head, tail) =
                split_at(&roadmap.segments()[stitched.segment], stitched.point);
            push_segment(&mut segments, head);
            push_segment(&mut segments, tail);
        }
    }

    push_segment(&mut segments, LineString::from(vec![start, from.point]));
    push_segment(&mut segments, LineString::from(vec![to.point, end]));

    let graph = adjacency_graph(&segments);
    let mut path = dijkstra(&graph, PointKey::of(start), PointKey::of(end))
        .ok_or(RouteError::NoPath)?;

    // The search works in fingerprint space; when an endpoint shares its
    // fingerprint with a roadmap vertex the stitch degenerates away and the
    // exact coordinate must be pinned back on.
    if path.0.first().is_some_and(|&coord| coord != start.0) {
        path.0.insert(0, start.0);
    }
    if path.0.last().is_some_and(|&coord| coord != end.0) {
        path.0.push(end.0);
    }

    Ok(path)
}

// Nearest reachable landing point over all roadmap segments.
fn stitch(
    roadmap: &Roadmap,
    from: Point,
    forbidden: &MultiPolygon,
) -> Result<Option<Stitch>, RouteError> {
    let mut best: Option<(f64, Stitch)> = None;
    for (segment, polyline) in roadmap.segments().iter().enumerate() {
        let landing = nearest_point_on(polyline, from)?;
        if !is_clear(Line::new(from, landing), forbidden) {
            continue;
        }
        let meters = meters_between(from, landing);
        if best.map_or(true, |(shortest, _)| meters < shortest) {
            best = Some((
                meters,
                Stitch {
                    segment,
                    point: landing,
                },
            ));
        }
    }
    Ok(best.map(|(_, stitch)| stitch))
}

// Degenerate pieces (splits landing on a segment endpoint) are dropped.
fn push_segment(segments: &mut Vec<LineString>, polyline: LineString) {
    let polyline = dedup_consecutive(polyline);
    if polyline.0.len() >= 2 {
        segments.push(polyline);
    }
}

// Both directions of every physical edge, each with its own oriented
// polyline.
fn adjacency_graph(
    segments: &[LineString],
) -> HashMap<PointKey, Vec<GraphEdge>> {
    let mut graph: HashMap<PointKey, Vec<GraphEdge>> = HashMap::new();
    for segment in segments {
        let a = PointKey::of_coord(segment.0[0]);
        let b = PointKey::of_coord(segment.0[segment.0.len() - 1]);
        // A loop stranded on a single node cannot advance a route.
        if a == b {
            continue;
        }
        let meters = polyline_meters(segment);

        let mut reversed = segment.clone();
        reversed.0.reverse();

        graph.entry(a).or_default().push(GraphEdge {
            to: b,
            meters,
            path: segment.clone(),
        });
        graph.entry(b).or_default().push(GraphEdge {
            to: a,
            meters,
            path: reversed,
        });
    }
    graph
}

#[derive(Clone, Copy)]
struct QueueEntry {
    meters: f64,
    /// Insertion sequence: the deterministic tie-break.
    seq: u64,
    key: PointKey,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.meters
            .total_cmp(&other.meters)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

// Textbook Dijkstra over the adjacency graph, except that every relaxation
// remembers the oriented polyline used to reach the node so the final path
// is a concatenation of polylines rather than a chord sequence.
fn dijkstra(
    graph: &HashMap<PointKey, Vec<GraphEdge>>,
    source: PointKey,
    target: PointKey,
) -> Option<LineString> {
    let mut shortest: HashMap<PointKey, f64> = HashMap::new();
    let mut arrival: HashMap<PointKey, (PointKey, &LineString)> =
        HashMap::new();
    let mut heap = BinaryHeap::new();
    let mut seq = 0;

    shortest.insert(source, 0.);
    heap.push(Reverse(QueueEntry {
        meters: 0.,
        seq,
        key: source,
    }));

    while let Some(Reverse(entry)) = heap.pop() {
        if entry.key == target {
            break;
        }
        if shortest
            .get(&entry.key)
            .is_some_and(|&meters| entry.meters > meters)
        {
            continue;
        }
        let Some(edges) = graph.get(&entry.key) else {
            continue;
        };
        for edge in edges {
            let candidate = entry.meters + edge.meters;
            if shortest
                .get(&edge.to)
                .map_or(true, |&meters| candidate < meters)
            {
                shortest.insert(edge.to, candidate);
                arrival.insert(edge.to, (entry.key, &edge.path));
                seq += 1;
                heap.push(Reverse(QueueEntry {
                    meters: candidate,
                    seq,
                    key: edge.to,
                }));
            }
        }
    }

    if source != target && !arrival.contains_key(&target) {
        return None;
    }

    let mut legs = Vec::new();
    let mut cursor = target;
    while cursor != source {
        let &(previous, path) = arrival.get(&cursor)?;
        legs.push(path);
        cursor = previous;
    }

    let mut coords = Vec::new();
    for leg in legs.iter().rev() {
        coords.extend_from_slice(&leg.0);
    }
    Some(dedup_consecutive(LineString::new(coords)))
}

#[cfg(test)]
#[path = "./route_tests.rs"]
mod tests;
