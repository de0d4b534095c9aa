//! Routebench library entry points.
//!
//! This crate loads a directed road multigraph, reduces it to its largest
//! strongly connected component, snaps geographic points onto nodes, and
//! compares BFS, Dijkstra and A* on the same origin/destination pair. The CLI
//! and any other consumer should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod benchmark;
pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod graph;
pub mod loader;
pub mod output;
pub mod path;
pub mod routing;
pub mod spatial;

pub use benchmark::{
    resolve_query, BenchmarkRunner, ComparisonReport, Query, ResultRow, RouteOutcome,
    REFERENCE_ALGORITHM,
};
pub use dataset::{default_graph_path, resolve_graph_path, GRAPH_PATH_ENV};
pub use error::{Error, Result};
pub use evaluate::{path_distance, path_travel_time};
pub use graph::{
    Edge, GraphBuilder, Node, NodeId, ParallelEdges, Position, ReducedGraph, RoadGraph,
    WeightKind,
};
pub use loader::{graph_from_csv_readers, graph_from_json_reader, load_graph};
pub use output::{render_table, GraphSummary, RouteExport, RoutePoint};
pub use path::{
    find_route_a_star, find_route_bfs, find_route_dijkstra, find_route_dijkstra_by,
    heuristic_distance, METERS_PER_DEGREE,
};
pub use routing::{plan_route, select_planner, RouteAlgorithm, RoutePlan, RoutePlanner};
pub use spatial::{nearest_node, SpatialIndex};
