use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{NodeId, RoadGraph, WeightKind};

/// Meters per degree used to turn planar degree distances into a length
/// estimate for the A* heuristic.
///
/// This is an equirectangular approximation; far from the equator it can
/// overestimate the remaining distance.
pub const METERS_PER_DEGREE: f64 = 111_319.0;

/// Find the path with the fewest edges between `origin` and `destination`.
///
/// Returns `Ok(None)` when the destination is unreachable.
pub fn find_route_bfs(
    graph: &RoadGraph,
    origin: NodeId,
    destination: NodeId,
) -> Result<Option<Vec<NodeId>>> {
    ensure_endpoints(graph, origin, destination)?;
    if origin == destination {
        return Ok(Some(vec![origin]));
    }

    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut queue = VecDeque::new();

    parents.insert(origin, None);
    queue.push_back(origin);

    while let Some(current) = queue.pop_front() {
        for &next in graph.adjacency_of(current).keys() {
            if parents.contains_key(&next) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == destination {
                debug!(visited = parents.len(), "bfs reached destination");
                return Ok(Some(reconstruct_path(&parents, origin, destination)));
            }
            queue.push_back(next);
        }
    }

    debug!(visited = parents.len(), "bfs exhausted frontier");
    Ok(None)
}

/// Run Dijkstra's algorithm using edge length as cost.
pub fn find_route_dijkstra(
    graph: &RoadGraph,
    origin: NodeId,
    destination: NodeId,
) -> Result<Option<Vec<NodeId>>> {
    find_route_dijkstra_by(graph, origin, destination, WeightKind::Length)
}

/// Run Dijkstra's algorithm with `weight` as cost.
///
/// Parallel edges resolve to their minimum weight. A node pair where no
/// parallel edge carries `weight` cannot be traversed.
pub fn find_route_dijkstra_by(
    graph: &RoadGraph,
    origin: NodeId,
    destination: NodeId,
    weight: WeightKind,
) -> Result<Option<Vec<NodeId>>> {
    best_first_search(graph, origin, destination, weight, |_| 0.0)
}

/// Run A* search over edge lengths, guided by [`heuristic_distance`].
pub fn find_route_a_star(
    graph: &RoadGraph,
    origin: NodeId,
    destination: NodeId,
) -> Result<Option<Vec<NodeId>>> {
    let fallbacks = Cell::new(0usize);
    let route = best_first_search(graph, origin, destination, WeightKind::Length, |node| {
        straight_line_estimate(graph, node, destination).unwrap_or_else(|| {
            fallbacks.set(fallbacks.get() + 1);
            0.0
        })
    })?;

    if fallbacks.get() > 0 {
        warn!(
            fallbacks = fallbacks.get(),
            destination,
            "a* heuristic fell back to zero for nodes without coordinates"
        );
    }
    Ok(route)
}

/// Straight-line estimate in meters from `from` to `to`.
///
/// Falls back to `0.0` when either node is unknown or has no usable
/// coordinates, which degrades A* to Dijkstra for that node.
pub fn heuristic_distance(graph: &RoadGraph, from: NodeId, to: NodeId) -> f64 {
    straight_line_estimate(graph, from, to).unwrap_or(0.0)
}

fn straight_line_estimate(graph: &RoadGraph, from: NodeId, to: NodeId) -> Option<f64> {
    let goal = graph.position(to)?;
    let current = graph.position(from)?;
    let estimate = current.planar_distance_to(&goal) * METERS_PER_DEGREE;
    estimate.is_finite().then_some(estimate)
}

fn ensure_endpoints(graph: &RoadGraph, origin: NodeId, destination: NodeId) -> Result<()> {
    for node in [origin, destination] {
        if !graph.contains(node) {
            return Err(Error::UnknownNode { node });
        }
    }
    Ok(())
}

/// Shared expansion loop for Dijkstra (zero heuristic) and A*.
///
/// Stale frontier entries are skipped on pop rather than removed on insert.
fn best_first_search<H>(
    graph: &RoadGraph,
    origin: NodeId,
    destination: NodeId,
    weight: WeightKind,
    heuristic: H,
) -> Result<Option<Vec<NodeId>>>
where
    H: Fn(NodeId) -> f64,
{
    ensure_endpoints(graph, origin, destination)?;
    if origin == destination {
        return Ok(Some(vec![origin]));
    }

    let mut g_score: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;

    g_score.insert(origin, 0.0);
    parents.insert(origin, None);
    queue.push(QueueEntry::new(origin, heuristic(origin), sequence));

    while let Some(entry) = queue.pop() {
        if !settled.insert(entry.node) {
            continue;
        }

        if entry.node == destination {
            debug!(
                settled = settled.len(),
                weight = %weight,
                "search settled destination"
            );
            return Ok(Some(reconstruct_path(&parents, origin, destination)));
        }

        let current_score = g_score.get(&entry.node).copied().unwrap_or(f64::INFINITY);

        for (&next, bucket) in graph.adjacency_of(entry.node) {
            if settled.contains(&next) {
                continue;
            }
            let Some(cost) = bucket.min_weight(weight) else {
                continue;
            };

            let tentative = current_score + cost;
            if tentative < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative);
                parents.insert(next, Some(entry.node));
                sequence += 1;
                queue.push(QueueEntry::new(next, tentative + heuristic(next), sequence));
            }
        }
    }

    debug!(settled = settled.len(), "search exhausted frontier");
    Ok(None)
}

fn reconstruct_path(
    parents: &HashMap<NodeId, Option<NodeId>>,
    start: NodeId,
    goal: NodeId,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    priority: FloatOrd,
    sequence: u64,
}

impl QueueEntry {
    fn new(node: NodeId, priority: f64, sequence: u64) -> Self {
        Self {
            node,
            priority: FloatOrd(priority),
            sequence,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority,
        // falling back to the earliest insertion.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
