mod common;

use std::collections::HashSet;

use routebench_lib::{Error, GraphBuilder, WeightKind};

use common::two_clusters;

#[test]
fn largest_component_keeps_only_internal_edges() {
    let graph = two_clusters();
    assert_eq!(graph.node_count(), 10);
    assert_eq!(graph.edge_count(), 11);

    let reduced = graph.largest_strongly_connected_component();
    let kept = reduced.graph();

    let ids: HashSet<_> = kept.sorted_node_ids().into_iter().collect();
    assert_eq!(ids, (10..=16).collect::<HashSet<_>>());
    assert_eq!(kept.edge_count(), 7);
    assert!(!reduced.contains(3));
    assert!(kept.edges_between(3, 10).is_none());
}

#[test]
fn every_pair_in_reduced_graph_is_mutually_reachable() {
    let reduced = two_clusters().largest_strongly_connected_component();
    let graph = reduced.graph();
    let ids = graph.sorted_node_ids();
    for &from in &ids {
        for &to in &ids {
            let route = routebench_lib::find_route_bfs(graph, from, to).expect("valid query");
            assert!(route.is_some(), "{from} cannot reach {to}");
        }
    }
}

#[test]
fn components_partition_the_nodes() {
    let graph = two_clusters();
    let components = graph.strongly_connected_components();
    let total: usize = components.iter().map(Vec::len).sum();
    assert_eq!(total, graph.node_count());
    assert_eq!(components.len(), 2);
}

#[test]
fn equal_sized_components_resolve_to_lowest_node_id() {
    let mut builder = GraphBuilder::new();
    common::add_ring(&mut builder, &[20, 21]);
    common::add_ring(&mut builder, &[5, 6]);
    let reduced = builder.build().largest_strongly_connected_component();
    assert_eq!(reduced.graph().sorted_node_ids(), vec![5, 6]);
}

#[test]
fn empty_graph_reduces_to_empty_graph() {
    let reduced = GraphBuilder::new()
        .build()
        .largest_strongly_connected_component();
    assert!(reduced.graph().is_empty());
}

#[test]
fn edge_weight_uses_minimum_parallel_edge() {
    let mut builder = GraphBuilder::new();
    builder.add_node(1, 0.0, 0.0).unwrap();
    builder.add_node(2, 0.0, 1.0).unwrap();
    builder.add_edge(1, 2, 80.0, Some(3.0)).unwrap();
    builder.add_edge(1, 2, 50.0, None).unwrap();
    let graph = builder.build();

    assert_eq!(graph.edge_weight(1, 2, WeightKind::Length).unwrap(), 50.0);
    assert_eq!(graph.edge_weight(1, 2, WeightKind::TravelTime).unwrap(), 3.0);
    assert!(matches!(
        graph.edge_weight(2, 1, WeightKind::Length),
        Err(Error::NoEdge { from: 2, to: 1 })
    ));
}

#[test]
fn builder_rejects_invalid_input() {
    let mut builder = GraphBuilder::new();
    builder.add_node(1, 0.0, 0.0).unwrap();
    assert!(matches!(
        builder.add_node(1, 1.0, 1.0),
        Err(Error::InvalidGraph { .. })
    ));
    assert!(matches!(
        builder.add_edge(1, 7, 1.0, None),
        Err(Error::InvalidGraph { .. })
    ));
    assert!(matches!(
        builder.add_edge(1, 1, f64::NAN, None),
        Err(Error::InvalidGraph { .. })
    ));
    assert!(matches!(
        builder.add_edge(1, 1, 1.0, Some(-2.0)),
        Err(Error::InvalidGraph { .. })
    ));
}
