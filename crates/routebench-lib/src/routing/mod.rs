//! Route planning over a road graph.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported routing algorithms (BFS, Dijkstra, A*)
//! - [`RoutePlanner`] - Strategy trait implemented once per algorithm
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Run a single algorithm for an origin/destination pair
//!
//! # Example
//!
//! ```ignore
//! use routebench_lib::{load_graph, plan_route, RouteAlgorithm};
//!
//! let graph = load_graph("recife.json".as_ref())?;
//! let reduced = graph.largest_strongly_connected_component();
//! let plan = plan_route(reduced.graph(), RouteAlgorithm::AStar, 1, 2)?;
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, BfsPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Result;
use crate::graph::{NodeId, RoadGraph};

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Breadth-first search (unweighted graph).
    Bfs,
    /// Dijkstra's algorithm (weighted graph).
    Dijkstra,
    /// A* search (heuristic guided).
    #[serde(rename = "a-star")]
    AStar,
}

impl RouteAlgorithm {
    /// Every algorithm, in the order comparisons run them.
    pub const ALL: [RouteAlgorithm; 3] = [
        RouteAlgorithm::Bfs,
        RouteAlgorithm::Dijkstra,
        RouteAlgorithm::AStar,
    ];

    /// Display name used in report tables.
    pub fn title(self) -> &'static str {
        match self {
            RouteAlgorithm::Bfs => "BFS",
            RouteAlgorithm::Dijkstra => "Dijkstra",
            RouteAlgorithm::AStar => "A*",
        }
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(RouteAlgorithm::Bfs),
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "a_star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub origin: NodeId,
    pub destination: NodeId,
    pub steps: Vec<NodeId>,
}

impl RoutePlan {
    /// Number of edges traversed by the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute a route with a single algorithm.
///
/// Returns `Ok(None)` when no route exists.
pub fn plan_route(
    graph: &RoadGraph,
    algorithm: RouteAlgorithm,
    origin: NodeId,
    destination: NodeId,
) -> Result<Option<RoutePlan>> {
    let planner = select_planner(algorithm);
    let steps = planner.find_path(graph, origin, destination)?;
    Ok(steps.map(|steps| RoutePlan {
        algorithm,
        origin,
        destination,
        steps,
    }))
}
