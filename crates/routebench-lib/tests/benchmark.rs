mod common;

use routebench_lib::{
    resolve_query, BenchmarkRunner, Error, NodeId, Position, Query, RoadGraph, RouteAlgorithm,
    RouteOutcome, RoutePlanner, SpatialIndex,
};
use routebench_lib::routing::{AStarPlanner, BfsPlanner};

use common::{strongly_connected_diamond, A, B, C, D};

struct FixedPlanner {
    algorithm: RouteAlgorithm,
    result: fn() -> routebench_lib::Result<Option<Vec<NodeId>>>,
}

impl RoutePlanner for FixedPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        self.algorithm
    }

    fn find_path(
        &self,
        _graph: &RoadGraph,
        _origin: NodeId,
        _destination: NodeId,
    ) -> routebench_lib::Result<Option<Vec<NodeId>>> {
        (self.result)()
    }
}

fn query() -> Query {
    Query {
        origin: A,
        destination: D,
    }
}

#[test]
fn comparison_reports_each_algorithm_in_order() {
    let reduced = strongly_connected_diamond().largest_strongly_connected_component();
    let report = BenchmarkRunner::new().run(&reduced, query()).unwrap();

    let algorithms: Vec<_> = report.rows.iter().map(|row| row.algorithm).collect();
    assert_eq!(algorithms, RouteAlgorithm::ALL.to_vec());

    let bfs = report.row(RouteAlgorithm::Bfs).unwrap();
    assert_eq!(bfs.path(), Some(&[A, C, D][..]));
    assert_eq!(bfs.node_count(), Some(3));
    assert_eq!(bfs.distance(), Some(350.0));
    assert!(bfs.elapsed.is_some());

    let dijkstra = report.row(RouteAlgorithm::Dijkstra).unwrap();
    assert_eq!(dijkstra.path(), Some(&[A, B, C, D][..]));
    assert_eq!(dijkstra.distance(), Some(250.0));
    assert_eq!(dijkstra.travel_time(), None);

    let a_star = report.row(RouteAlgorithm::AStar).unwrap();
    assert_eq!(a_star.distance(), Some(250.0));

    assert_eq!(report.reference_route, Some(vec![A, B, C, D]));
}

#[test]
fn parallel_run_matches_sequential_routes() {
    let reduced = strongly_connected_diamond().largest_strongly_connected_component();
    let sequential = BenchmarkRunner::new().run(&reduced, query()).unwrap();
    let parallel = BenchmarkRunner::new()
        .parallel(true)
        .run(&reduced, query())
        .unwrap();

    for (left, right) in sequential.rows.iter().zip(&parallel.rows) {
        assert_eq!(left.algorithm, right.algorithm);
        assert_eq!(left.outcome, right.outcome);
    }
    assert_eq!(sequential.reference_route, parallel.reference_route);
}

#[test]
fn endpoints_outside_reduced_graph_abort_the_query() {
    let reduced = strongly_connected_diamond().largest_strongly_connected_component();
    let err = BenchmarkRunner::new()
        .run(
            &reduced,
            Query {
                origin: A,
                destination: 9,
            },
        )
        .expect_err("spur node is not strongly connected");
    assert!(matches!(err, Error::UnknownNode { node: 9 }));
}

#[test]
fn broken_planner_becomes_fault_row_without_stopping_others() {
    let reduced = strongly_connected_diamond().largest_strongly_connected_component();
    let runner = BenchmarkRunner::with_planners(vec![
        Box::new(BfsPlanner),
        Box::new(FixedPlanner {
            algorithm: RouteAlgorithm::Dijkstra,
            result: || Ok(Some(vec![A, D])),
        }),
        Box::new(AStarPlanner),
    ]);
    let report = runner.run(&reduced, query()).unwrap();

    assert!(report.rows[0].is_found());
    match &report.rows[1].outcome {
        RouteOutcome::Fault { reason } => assert!(reason.contains("disconnected")),
        other => panic!("expected fault, got {other:?}"),
    }
    assert_eq!(report.rows[1].elapsed, None);
    assert_eq!(report.rows[1].distance(), None);
    assert!(report.rows[2].is_found());
    assert_eq!(report.reference_route, None);
}

#[test]
fn planner_error_and_missing_route_are_placeholders() {
    let reduced = strongly_connected_diamond().largest_strongly_connected_component();
    let runner = BenchmarkRunner::with_planners(vec![
        Box::new(FixedPlanner {
            algorithm: RouteAlgorithm::Bfs,
            result: || Err(Error::EmptyGraph),
        }),
        Box::new(FixedPlanner {
            algorithm: RouteAlgorithm::Dijkstra,
            result: || Ok(None),
        }),
    ]);
    let report = runner.run(&reduced, query()).unwrap();

    assert!(matches!(report.rows[0].outcome, RouteOutcome::Fault { .. }));
    assert_eq!(report.rows[1].outcome, RouteOutcome::NotFound);
    assert_eq!(report.reference_route, None);
}

#[test]
fn route_not_ending_at_destination_is_a_fault() {
    let reduced = strongly_connected_diamond().largest_strongly_connected_component();
    let runner = BenchmarkRunner::with_planners(vec![Box::new(FixedPlanner {
        algorithm: RouteAlgorithm::AStar,
        result: || Ok(Some(vec![A, B])),
    })]);
    let report = runner.run(&reduced, query()).unwrap();
    assert!(matches!(report.rows[0].outcome, RouteOutcome::Fault { .. }));
}

#[test]
fn query_points_snap_onto_reduced_graph() {
    let graph = strongly_connected_diamond();
    let reduced = graph.largest_strongly_connected_component();
    let index = SpatialIndex::build(reduced.graph());

    // Closest overall node is the spur (9), which the reduction dropped.
    let resolved = resolve_query(
        &reduced,
        &index,
        Position::new(-0.0001, 0.0),
        Position::new(0.0019, 0.0),
    )
    .unwrap();
    assert_eq!(resolved, Query { origin: A, destination: D });

    let full_index = SpatialIndex::build(&graph);
    let err = resolve_query(
        &reduced,
        &full_index,
        Position::new(0.0, 0.0),
        Position::new(0.0019, 0.0),
    )
    .expect_err("node 9 is outside the reduced graph");
    assert!(matches!(err, Error::UnknownNode { node: 9 }));
}
