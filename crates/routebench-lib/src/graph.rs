use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Opaque identifier for a road-network node (an OSM node id in practice).
pub type NodeId = u64;

/// Outgoing adjacency of a single node, ordered by neighbour id so every
/// traversal visits neighbours in the same order.
pub type Adjacency = BTreeMap<NodeId, ParallelEdges>;

static EMPTY_ADJACENCY: Adjacency = BTreeMap::new();

/// Geographic position of a node in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Planar Euclidean distance in degrees.
    pub fn planar_distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Node of the road network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    /// `None` when the source data carried no usable coordinates.
    pub position: Option<Position>,
}

/// A single directed road segment between an ordered pair of nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    /// Identity of the edge among its parallel siblings.
    pub key: u32,
    /// Physical length in meters.
    pub length: f64,
    /// Traversal time in seconds, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time: Option<f64>,
}

/// Edge attribute used as traversal cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightKind {
    #[default]
    Length,
    TravelTime,
}

impl WeightKind {
    pub fn label(self) -> &'static str {
        match self {
            WeightKind::Length => "length",
            WeightKind::TravelTime => "travel_time",
        }
    }

    fn of(self, edge: &Edge) -> Option<f64> {
        match self {
            WeightKind::Length => Some(edge.length),
            WeightKind::TravelTime => edge.travel_time,
        }
    }
}

impl fmt::Display for WeightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Non-empty bucket of parallel edges sharing the same ordered node pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelEdges {
    edges: Vec<Edge>,
}

impl ParallelEdges {
    fn new(edge: Edge) -> Self {
        Self { edges: vec![edge] }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always `false`; a bucket only exists once it holds an edge.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Shortest length among the parallel edges.
    pub fn min_length(&self) -> f64 {
        self.edges
            .iter()
            .map(|edge| edge.length)
            .fold(f64::INFINITY, f64::min)
    }

    /// Minimum of the requested attribute over edges that carry it.
    pub fn min_weight(&self, kind: WeightKind) -> Option<f64> {
        self.edges
            .iter()
            .filter_map(|edge| kind.of(edge))
            .min_by(|a, b| a.total_cmp(b))
    }

    fn contains_key(&self, key: u32) -> bool {
        self.edges.iter().any(|edge| edge.key == key)
    }
}

/// Directed road-network multigraph.
///
/// Built once through [`GraphBuilder`] and read-only afterwards. Cloning is
/// cheap because node and adjacency tables are shared.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    nodes: Arc<HashMap<NodeId, Node>>,
    adjacency: Arc<HashMap<NodeId, Adjacency>>,
    edge_count: usize,
}

impl RoadGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, counting each parallel edge separately.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of ordered node pairs connected by more than one edge.
    pub fn parallel_pair_count(&self) -> usize {
        self.adjacency
            .values()
            .flat_map(|targets| targets.values())
            .filter(|bucket| bucket.len() > 1)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(&node)
    }

    /// Position of a node, if the node exists and has coordinates.
    pub fn position(&self, node: NodeId) -> Option<Position> {
        self.nodes.get(&node).and_then(|node| node.position)
    }

    /// Iterate over every node in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Node identifiers in ascending order.
    pub fn sorted_node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Outgoing neighbours of `node` with the parallel edges leading to each.
    pub fn neighbors(
        &self,
        node: NodeId,
    ) -> Result<impl Iterator<Item = (NodeId, &ParallelEdges)> + '_> {
        if !self.contains(node) {
            return Err(Error::UnknownNode { node });
        }
        Ok(self
            .adjacency_of(node)
            .iter()
            .map(|(&target, bucket)| (target, bucket)))
    }

    /// Parallel edges from `from` to `to`, if the pair is adjacent.
    pub fn edges_between(&self, from: NodeId, to: NodeId) -> Option<&ParallelEdges> {
        self.adjacency.get(&from).and_then(|targets| targets.get(&to))
    }

    /// Resolve the cost of moving from `from` to `to` as the minimum of
    /// `kind` across all parallel edges.
    pub fn edge_weight(&self, from: NodeId, to: NodeId, kind: WeightKind) -> Result<f64> {
        if !self.contains(from) {
            return Err(Error::UnknownNode { node: from });
        }
        if !self.contains(to) {
            return Err(Error::UnknownNode { node: to });
        }
        let bucket = self
            .edges_between(from, to)
            .ok_or(Error::NoEdge { from, to })?;
        bucket.min_weight(kind).ok_or(Error::MissingWeight {
            from,
            to,
            kind: kind.label(),
        })
    }

    pub(crate) fn adjacency_of(&self, node: NodeId) -> &Adjacency {
        self.adjacency.get(&node).unwrap_or(&EMPTY_ADJACENCY)
    }

    /// Compute strongly-connected components with an iterative Kosaraju pass.
    ///
    /// Each component is sorted by node id; components are returned in the
    /// order they are discovered.
    pub fn strongly_connected_components(&self) -> Vec<Vec<NodeId>> {
        let roots = self.sorted_node_ids();
        let mut visited: HashSet<NodeId> = HashSet::with_capacity(roots.len());
        let mut finish_order: Vec<NodeId> = Vec::with_capacity(roots.len());

        for &root in &roots {
            if !visited.insert(root) {
                continue;
            }
            let mut stack = vec![(root, self.adjacency_of(root).keys())];
            while let Some(frame) = stack.last_mut() {
                match frame.1.next() {
                    Some(&next) => {
                        if visited.insert(next) {
                            stack.push((next, self.adjacency_of(next).keys()));
                        }
                    }
                    None => {
                        finish_order.push(frame.0);
                        stack.pop();
                    }
                }
            }
        }

        let mut reverse: HashMap<NodeId, Vec<NodeId>> = HashMap::with_capacity(roots.len());
        for (&from, targets) in self.adjacency.iter() {
            for &to in targets.keys() {
                reverse.entry(to).or_default().push(from);
            }
        }

        let mut assigned: HashSet<NodeId> = HashSet::with_capacity(roots.len());
        let mut components = Vec::new();
        for &root in finish_order.iter().rev() {
            if !assigned.insert(root) {
                continue;
            }
            let mut component = vec![root];
            let mut stack = vec![root];
            while let Some(node) = stack.pop() {
                for &pred in reverse.get(&node).map(Vec::as_slice).unwrap_or(&[]) {
                    if assigned.insert(pred) {
                        component.push(pred);
                        stack.push(pred);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }

        components
    }

    /// Reduce the graph to its largest strongly-connected component.
    ///
    /// Ties on size go to the component holding the lowest node id.
    pub fn largest_strongly_connected_component(&self) -> ReducedGraph {
        self.reduce_to_largest(self.strongly_connected_components())
    }

    /// Reduce the graph to the largest of `components`, as previously
    /// returned by [`RoadGraph::strongly_connected_components`].
    pub fn reduce_to_largest(&self, components: Vec<Vec<NodeId>>) -> ReducedGraph {
        let component_count = components.len();

        let largest = components.into_iter().fold(None::<Vec<NodeId>>, |best, candidate| {
            match best {
                Some(best)
                    if best.len() > candidate.len()
                        || (best.len() == candidate.len() && best[0] <= candidate[0]) =>
                {
                    Some(best)
                }
                _ => Some(candidate),
            }
        });

        let members: HashSet<NodeId> = largest.unwrap_or_default().into_iter().collect();
        let graph = self.induced_subgraph(&members);

        info!(
            component_count,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dropped_nodes = self.node_count() - graph.node_count(),
            "reduced graph to largest strongly connected component"
        );

        ReducedGraph { graph }
    }

    /// Subgraph on `members` holding only edges with both endpoints inside.
    pub fn induced_subgraph(&self, members: &HashSet<NodeId>) -> RoadGraph {
        let nodes: HashMap<NodeId, Node> = self
            .nodes
            .iter()
            .filter(|(id, _)| members.contains(id))
            .map(|(&id, node)| (id, node.clone()))
            .collect();

        let mut edge_count = 0;
        let adjacency: HashMap<NodeId, Adjacency> = nodes
            .keys()
            .map(|&id| {
                let targets: Adjacency = self
                    .adjacency_of(id)
                    .iter()
                    .filter(|(target, _)| members.contains(target))
                    .map(|(&target, bucket)| (target, bucket.clone()))
                    .collect();
                edge_count += targets.values().map(ParallelEdges::len).sum::<usize>();
                (id, targets)
            })
            .collect();

        RoadGraph {
            nodes: Arc::new(nodes),
            adjacency: Arc::new(adjacency),
            edge_count,
        }
    }
}

/// Graph restricted to the largest strongly-connected component of its source.
///
/// Every ordered pair of nodes inside it is mutually reachable.
#[derive(Debug, Clone, Default)]
pub struct ReducedGraph {
    graph: RoadGraph,
}

impl ReducedGraph {
    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.graph.contains(node)
    }

    pub fn into_graph(self) -> RoadGraph {
        self.graph
    }
}

impl AsRef<RoadGraph> for ReducedGraph {
    fn as_ref(&self) -> &RoadGraph {
        &self.graph
    }
}

/// Incremental constructor that enforces the inbound graph invariants:
/// unique node ids, existing edge endpoints, non-negative finite weights.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: HashMap<NodeId, Node>,
    adjacency: HashMap<NodeId, Adjacency>,
    edge_count: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with known coordinates.
    pub fn add_node(&mut self, id: NodeId, x: f64, y: f64) -> Result<&mut Self> {
        let position = Position::new(x, y);
        let position = position.is_finite().then_some(position);
        self.insert_node(id, position)
    }

    /// Add a node whose coordinates are unknown.
    pub fn add_node_without_position(&mut self, id: NodeId) -> Result<&mut Self> {
        self.insert_node(id, None)
    }

    fn insert_node(&mut self, id: NodeId, position: Option<Position>) -> Result<&mut Self> {
        if self.nodes.contains_key(&id) {
            return Err(Error::invalid_graph(format!("duplicate node id {id}")));
        }
        self.nodes.insert(id, Node { id, position });
        self.adjacency.entry(id).or_default();
        Ok(self)
    }

    /// Add a directed edge, assigning the next free key for the node pair.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        length: f64,
        travel_time: Option<f64>,
    ) -> Result<u32> {
        let key = self
            .adjacency
            .get(&source)
            .and_then(|targets| targets.get(&target))
            .and_then(|bucket| bucket.edges().iter().map(|edge| edge.key).max())
            .map_or(0, |key| key + 1);
        self.add_edge_with_key(source, target, key, length, travel_time)?;
        Ok(key)
    }

    /// Add a directed edge with an explicit parallel-edge key.
    pub fn add_edge_with_key(
        &mut self,
        source: NodeId,
        target: NodeId,
        key: u32,
        length: f64,
        travel_time: Option<f64>,
    ) -> Result<&mut Self> {
        for endpoint in [source, target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(Error::invalid_graph(format!(
                    "edge {source}->{target} references missing node {endpoint}"
                )));
            }
        }
        if !length.is_finite() || length < 0.0 {
            return Err(Error::invalid_graph(format!(
                "edge {source}->{target} has invalid length {length}"
            )));
        }
        if let Some(time) = travel_time {
            if !time.is_finite() || time < 0.0 {
                return Err(Error::invalid_graph(format!(
                    "edge {source}->{target} has invalid travel time {time}"
                )));
            }
        }

        let edge = Edge {
            key,
            length,
            travel_time,
        };
        let targets = self.adjacency.entry(source).or_default();
        match targets.get_mut(&target) {
            Some(bucket) => {
                if bucket.contains_key(key) {
                    return Err(Error::invalid_graph(format!(
                        "duplicate edge key {key} for {source}->{target}"
                    )));
                }
                bucket.edges.push(edge);
            }
            None => {
                targets.insert(target, ParallelEdges::new(edge));
            }
        }
        self.edge_count += 1;
        Ok(self)
    }

    pub fn build(self) -> RoadGraph {
        debug!(
            nodes = self.nodes.len(),
            edges = self.edge_count,
            "built road graph"
        );
        RoadGraph {
            nodes: Arc::new(self.nodes),
            adjacency: Arc::new(self.adjacency),
            edge_count: self.edge_count,
        }
    }
}
