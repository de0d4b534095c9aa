//! Side-by-side comparison of the routing algorithms on a single query.
//!
//! [`BenchmarkRunner`] runs every planner against the same reduced graph and
//! origin/destination pair, timing only the search call. A planner that finds
//! nothing, or produces an inconsistent route, yields a placeholder row and
//! never prevents the other planners from running.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::evaluate::{path_distance, path_travel_time};
use crate::graph::{NodeId, Position, ReducedGraph, RoadGraph};
use crate::routing::{select_planner, RouteAlgorithm, RoutePlanner};
use crate::spatial::SpatialIndex;

/// Algorithm whose route is handed to renderers.
pub const REFERENCE_ALGORITHM: RouteAlgorithm = RouteAlgorithm::Dijkstra;

/// Origin and destination nodes of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Query {
    pub origin: NodeId,
    pub destination: NodeId,
}

/// Snap two geographic points onto the reduced graph.
///
/// `index` should be built from `reduced`; a resolved node outside the
/// reduced graph is rejected as [`Error::UnknownNode`].
pub fn resolve_query(
    reduced: &ReducedGraph,
    index: &SpatialIndex,
    origin: Position,
    destination: Position,
) -> Result<Query> {
    let origin = index.nearest_node(origin.x, origin.y)?;
    let destination = index.nearest_node(destination.x, destination.y)?;
    let query = Query {
        origin,
        destination,
    };
    ensure_query(reduced, query)?;
    debug!(origin, destination, "resolved query points to nodes");
    Ok(query)
}

/// Result of a single planner run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found {
        path: Vec<NodeId>,
        distance: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        travel_time: Option<f64>,
    },
    NotFound,
    Fault {
        reason: String,
    },
}

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub algorithm: RouteAlgorithm,
    /// Wall-clock search time; `None` unless a route was found.
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_seconds")]
    pub elapsed: Option<Duration>,
    #[serde(flatten)]
    pub outcome: RouteOutcome,
}

impl ResultRow {
    pub fn path(&self) -> Option<&[NodeId]> {
        match &self.outcome {
            RouteOutcome::Found { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Number of nodes on the route.
    pub fn node_count(&self) -> Option<usize> {
        self.path().map(<[NodeId]>::len)
    }

    pub fn distance(&self) -> Option<f64> {
        match &self.outcome {
            RouteOutcome::Found { distance, .. } => Some(*distance),
            _ => None,
        }
    }

    pub fn travel_time(&self) -> Option<f64> {
        match &self.outcome {
            RouteOutcome::Found { travel_time, .. } => *travel_time,
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.outcome, RouteOutcome::Found { .. })
    }
}

fn serialize_seconds<S: Serializer>(
    elapsed: &Option<Duration>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match elapsed {
        Some(duration) => serializer.serialize_some(&duration.as_secs_f64()),
        None => serializer.serialize_none(),
    }
}

/// Rows for every algorithm, in run order, plus the reference route.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub query: Query,
    pub rows: Vec<ResultRow>,
    /// Route of [`REFERENCE_ALGORITHM`], or `None` when it found nothing.
    pub reference_route: Option<Vec<NodeId>>,
}

impl ComparisonReport {
    pub fn row(&self, algorithm: RouteAlgorithm) -> Option<&ResultRow> {
        self.rows.iter().find(|row| row.algorithm == algorithm)
    }
}

/// Runs a fixed sequence of planners over one query.
pub struct BenchmarkRunner {
    planners: Vec<Box<dyn RoutePlanner>>,
    parallel: bool,
}

impl Default for BenchmarkRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchmarkRunner {
    /// Runner for BFS, Dijkstra and A*, in that order.
    pub fn new() -> Self {
        Self::with_planners(RouteAlgorithm::ALL.into_iter().map(select_planner).collect())
    }

    /// Runner for an explicit list of planners, run in the given order.
    pub fn with_planners(planners: Vec<Box<dyn RoutePlanner>>) -> Self {
        Self {
            planners,
            parallel: false,
        }
    }

    /// Run the planners concurrently. Rows keep the planner order.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn algorithms(&self) -> Vec<RouteAlgorithm> {
        self.planners.iter().map(|planner| planner.algorithm()).collect()
    }

    /// Compare every planner on `query`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] when the origin or destination is not part of
    /// the reduced graph. Per-planner failures become placeholder rows.
    pub fn run(&self, reduced: &ReducedGraph, query: Query) -> Result<ComparisonReport> {
        ensure_query(reduced, query)?;
        let graph = reduced.graph();

        let rows: Vec<ResultRow> = if self.parallel {
            self.planners
                .par_iter()
                .map(|planner| run_planner(planner.as_ref(), graph, query))
                .collect()
        } else {
            self.planners
                .iter()
                .map(|planner| run_planner(planner.as_ref(), graph, query))
                .collect()
        };

        let reference_route = rows
            .iter()
            .find(|row| row.algorithm == REFERENCE_ALGORITHM)
            .and_then(ResultRow::path)
            .map(<[NodeId]>::to_vec);

        info!(
            origin = query.origin,
            destination = query.destination,
            found = rows.iter().filter(|row| row.is_found()).count(),
            total = rows.len(),
            "comparison finished"
        );

        Ok(ComparisonReport {
            query,
            rows,
            reference_route,
        })
    }
}

fn ensure_query(reduced: &ReducedGraph, query: Query) -> Result<()> {
    for node in [query.origin, query.destination] {
        if !reduced.contains(node) {
            return Err(Error::UnknownNode { node });
        }
    }
    Ok(())
}

fn run_planner(planner: &dyn RoutePlanner, graph: &RoadGraph, query: Query) -> ResultRow {
    let algorithm = planner.algorithm();
    let started = Instant::now();
    let result = planner.find_path(graph, query.origin, query.destination);
    let elapsed = started.elapsed();

    let outcome = match result {
        Ok(Some(path)) => measure(graph, query, path),
        Ok(None) => RouteOutcome::NotFound,
        Err(error) => RouteOutcome::Fault {
            reason: error.to_string(),
        },
    };

    match &outcome {
        RouteOutcome::Found { distance, path, .. } => debug!(
            %algorithm,
            elapsed_us = elapsed.as_micros() as u64,
            nodes = path.len(),
            distance,
            "planner found route"
        ),
        RouteOutcome::NotFound => debug!(%algorithm, "planner found no route"),
        RouteOutcome::Fault { reason } => warn!(%algorithm, %reason, "planner faulted"),
    }

    let elapsed = matches!(outcome, RouteOutcome::Found { .. }).then_some(elapsed);
    ResultRow {
        algorithm,
        elapsed,
        outcome,
    }
}

fn measure(graph: &RoadGraph, query: Query, path: Vec<NodeId>) -> RouteOutcome {
    if path.first() != Some(&query.origin) || path.last() != Some(&query.destination) {
        return RouteOutcome::Fault {
            reason: format!(
                "route does not run from {} to {}",
                query.origin, query.destination
            ),
        };
    }

    let distance = match path_distance(graph, &path) {
        Ok(distance) => distance,
        Err(error) => {
            return RouteOutcome::Fault {
                reason: error.to_string(),
            }
        }
    };
    let travel_time = path_travel_time(graph, &path).ok().flatten();

    RouteOutcome::Found {
        path,
        distance,
        travel_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_row_exposes_measures() {
        let row = ResultRow {
            algorithm: RouteAlgorithm::Bfs,
            elapsed: Some(Duration::from_millis(2)),
            outcome: RouteOutcome::Found {
                path: vec![1, 2, 3],
                distance: 12.5,
                travel_time: None,
            },
        };
        assert_eq!(row.node_count(), Some(3));
        assert_eq!(row.distance(), Some(12.5));
        assert!(row.is_found());
    }

    #[test]
    fn placeholder_row_has_no_measures() {
        let row = ResultRow {
            algorithm: RouteAlgorithm::AStar,
            elapsed: None,
            outcome: RouteOutcome::NotFound,
        };
        assert_eq!(row.node_count(), None);
        assert_eq!(row.distance(), None);
        assert_eq!(row.travel_time(), None);
    }

    #[test]
    fn rows_serialize_flat_with_status_tag() {
        let row = ResultRow {
            algorithm: RouteAlgorithm::Dijkstra,
            elapsed: None,
            outcome: RouteOutcome::Fault {
                reason: "boom".to_string(),
            },
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["algorithm"], "dijkstra");
        assert_eq!(value["status"], "fault");
        assert_eq!(value["reason"], "boom");
        assert!(value["elapsed_seconds"].is_null());
    }

    #[test]
    fn default_runner_uses_fixed_order() {
        assert_eq!(
            BenchmarkRunner::new().algorithms(),
            RouteAlgorithm::ALL.to_vec()
        );
    }
}
