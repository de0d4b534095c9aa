//! Nearest-node lookup.
//!
//! Two interchangeable strategies resolve a geographic point to a graph node:
//!
//! - [`nearest_node`] scans every node. No setup cost, O(n) per query.
//! - [`SpatialIndex`] builds a KD-tree once, then answers in O(log n).
//!
//! Both measure planar Euclidean distance in degrees, which is accurate
//! enough at city scale, and both break exact ties by the lowest node id.

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::info;

use crate::error::{Error, Result};
use crate::graph::{NodeId, Position, RoadGraph};

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Neighbours fetched per query to detect equidistant nodes. When every
/// fetched neighbour ties, the index falls back to a full scan of the ties.
const TIE_CANDIDATES: usize = 8;

/// Resolve a point to its nearest node by scanning the whole graph.
///
/// Nodes without coordinates are never returned.
pub fn nearest_node(graph: &RoadGraph, longitude: f64, latitude: f64) -> Result<NodeId> {
    let query = query_point(longitude, latitude)?;

    graph
        .nodes()
        .filter_map(|node| {
            node.position
                .map(|position| (node.id, squared_distance(&to_coords(&position), &query)))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
        .map(|(id, _)| id)
        .ok_or(Error::EmptyGraph)
}

#[derive(Debug, Clone, Copy)]
struct IndexNode {
    id: NodeId,
    coords: [f64; 2],
}

/// Precomputed KD-tree over node coordinates.
pub struct SpatialIndex {
    /// KD-tree over (longitude, latitude). Items index into `nodes`.
    tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32>,
    nodes: Vec<IndexNode>,
}

impl SpatialIndex {
    /// Index every node of `graph` that has coordinates.
    pub fn build(graph: &RoadGraph) -> Self {
        let nodes: Vec<IndexNode> = graph
            .sorted_node_ids()
            .into_iter()
            .filter_map(|id| {
                graph.position(id).map(|position| IndexNode {
                    id,
                    coords: to_coords(&position),
                })
            })
            .collect();

        let mut tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32> = KdTree::new();
        for (index, node) in nodes.iter().enumerate() {
            tree.add(&node.coords, index);
        }

        info!(
            node_count = nodes.len(),
            skipped = graph.node_count() - nodes.len(),
            "built spatial index"
        );

        Self { tree, nodes }
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve a point to the nearest indexed node.
    pub fn nearest_node(&self, longitude: f64, latitude: f64) -> Result<NodeId> {
        let query = query_point(longitude, latitude)?;
        if self.nodes.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let candidates = self.tree.nearest_n::<SquaredEuclidean>(&query, TIE_CANDIDATES);
        let best = candidates
            .first()
            .map(|neighbour| neighbour.distance)
            .ok_or(Error::EmptyGraph)?;

        let ties = candidates
            .iter()
            .filter(|neighbour| neighbour.distance == best)
            .count();

        if ties == TIE_CANDIDATES {
            // Every returned neighbour is equidistant; more may hide behind them.
            return self
                .nodes
                .iter()
                .filter(|node| squared_distance(&node.coords, &query) == best)
                .map(|node| node.id)
                .min()
                .ok_or(Error::EmptyGraph);
        }

        candidates
            .iter()
            .filter(|neighbour| neighbour.distance == best)
            .map(|neighbour| self.nodes[neighbour.item].id)
            .min()
            .ok_or(Error::EmptyGraph)
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("node_count", &self.nodes.len())
            .finish()
    }
}

fn query_point(longitude: f64, latitude: f64) -> Result<[f64; 2]> {
    if !longitude.is_finite() || !latitude.is_finite() {
        return Err(Error::InvalidCoordinate {
            longitude,
            latitude,
        });
    }
    Ok([longitude, latitude])
}

fn to_coords(position: &Position) -> [f64; 2] {
    [position.x, position.y]
}

fn squared_distance(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn grid(ids_and_points: &[(NodeId, f64, f64)]) -> RoadGraph {
        let mut builder = GraphBuilder::new();
        for &(id, x, y) in ids_and_points {
            builder.add_node(id, x, y).unwrap();
        }
        builder.build()
    }

    #[test]
    fn empty_graph_is_an_error() {
        let graph = RoadGraph::default();
        assert!(matches!(
            nearest_node(&graph, 0.0, 0.0),
            Err(Error::EmptyGraph)
        ));
        let index = SpatialIndex::build(&graph);
        assert!(index.is_empty());
        assert!(matches!(index.nearest_node(0.0, 0.0), Err(Error::EmptyGraph)));
    }

    #[test]
    fn nearest_basic() {
        let graph = grid(&[(1, 0.0, 0.0), (2, 1.0, 1.0)]);
        assert_eq!(nearest_node(&graph, 0.1, 0.1).unwrap(), 1);
        assert_eq!(SpatialIndex::build(&graph).nearest_node(0.1, 0.1).unwrap(), 1);
    }

    #[test]
    fn exact_ties_resolve_to_lowest_id() {
        let graph = grid(&[(9, 1.0, 0.0), (4, -1.0, 0.0), (6, 0.0, 1.0)]);
        assert_eq!(nearest_node(&graph, 0.0, 0.0).unwrap(), 4);
        assert_eq!(SpatialIndex::build(&graph).nearest_node(0.0, 0.0).unwrap(), 4);
    }

    #[test]
    fn saturated_tie_query_scans_all_ties() {
        let points: Vec<(NodeId, f64, f64)> = (0..20u64).map(|i| (100 - i, 2.0, 2.0)).collect();
        let graph = grid(&points);
        let index = SpatialIndex::build(&graph);
        assert_eq!(index.len(), 20);
        assert_eq!(index.nearest_node(0.0, 0.0).unwrap(), 81);
    }

    #[test]
    fn non_finite_query_is_rejected() {
        let graph = grid(&[(1, 0.0, 0.0)]);
        assert!(matches!(
            nearest_node(&graph, f64::NAN, 0.0),
            Err(Error::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn nodes_without_coordinates_are_skipped() {
        let mut builder = GraphBuilder::new();
        builder.add_node_without_position(1).unwrap();
        builder.add_node(2, 5.0, 5.0).unwrap();
        let graph = builder.build();
        assert_eq!(nearest_node(&graph, 0.0, 0.0).unwrap(), 2);
        let index = SpatialIndex::build(&graph);
        assert_eq!(index.len(), 1);
        assert_eq!(index.nearest_node(0.0, 0.0).unwrap(), 2);
    }
}
