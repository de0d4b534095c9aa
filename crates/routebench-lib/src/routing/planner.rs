//! Route planning strategies.
//!
//! Each algorithm is wrapped in a [`RoutePlanner`] so the benchmark can
//! drive all of them through one interface.

use crate::error::Result;
use crate::graph::{NodeId, RoadGraph, WeightKind};
use crate::path::{find_route_a_star, find_route_bfs, find_route_dijkstra_by};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the pathfinding algorithm on the given graph.
    ///
    /// Returns `Ok(Some(path))` if a route is found and `Ok(None)` if the
    /// destination is unreachable.
    fn find_path(
        &self,
        graph: &RoadGraph,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Option<Vec<NodeId>>>;
}

/// Breadth-first search planner for unweighted graph traversal.
///
/// BFS finds the path with the fewest edges and ignores edge lengths.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl RoutePlanner for BfsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn find_path(
        &self,
        graph: &RoadGraph,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Option<Vec<NodeId>>> {
        find_route_bfs(graph, origin, destination)
    }
}

/// Dijkstra's algorithm planner for weighted graph traversal.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner {
    weight: WeightKind,
}

impl DijkstraPlanner {
    /// Planner minimising total length.
    pub fn distance() -> Self {
        Self {
            weight: WeightKind::Length,
        }
    }

    /// Planner minimising total travel time.
    pub fn travel_time() -> Self {
        Self {
            weight: WeightKind::TravelTime,
        }
    }

    pub fn weight(&self) -> WeightKind {
        self.weight
    }
}

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &RoadGraph,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Option<Vec<NodeId>>> {
        find_route_dijkstra_by(graph, origin, destination, self.weight)
    }
}

/// A* planner over edge lengths using a straight-line heuristic.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &RoadGraph,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<Option<Vec<NodeId>>> {
        find_route_a_star(graph, origin, destination)
    }
}

/// Select the planner implementing `algorithm`.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Bfs => Box::new(BfsPlanner),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner::distance()),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}
