//! Shared fixture builders for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use routebench_lib::{GraphBuilder, NodeId, RoadGraph};

pub const A: NodeId = 1;
pub const B: NodeId = 2;
pub const C: NodeId = 3;
pub const D: NodeId = 4;

/// Path to the checked-in JSON fixture network.
pub fn fixture_graph_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/small_network.json")
}

fn add_line_nodes(builder: &mut GraphBuilder) {
    builder.add_node(A, 0.0, 0.0).expect("node A");
    builder.add_node(B, 0.0005, 0.0).expect("node B");
    builder.add_node(C, 0.0010, 0.0).expect("node C");
    builder.add_node(D, 0.0012, 0.0).expect("node D");
}

/// A->B 100, B->C 100, A->C 300, C->D 50. Only forward edges, so nothing
/// leads back to A.
pub fn diamond() -> RoadGraph {
    let mut builder = GraphBuilder::new();
    add_line_nodes(&mut builder);
    builder.add_edge(A, B, 100.0, None).expect("A->B");
    builder.add_edge(B, C, 100.0, None).expect("B->C");
    builder.add_edge(A, C, 300.0, None).expect("A->C");
    builder.add_edge(C, D, 50.0, None).expect("C->D");
    builder.build()
}

/// The diamond plus return edges, making all four nodes strongly connected,
/// plus a dangling spur node 9 reachable only from D.
pub fn strongly_connected_diamond() -> RoadGraph {
    let mut builder = GraphBuilder::new();
    add_line_nodes(&mut builder);
    builder.add_node(9, 0.0020, 0.0).expect("spur node");
    for (from, to, length) in [
        (A, B, 100.0),
        (B, C, 100.0),
        (A, C, 300.0),
        (C, D, 50.0),
        (D, C, 50.0),
        (C, B, 100.0),
        (B, A, 100.0),
        (D, 9, 10.0),
    ] {
        builder.add_edge(from, to, length, None).expect("edge");
    }
    builder.build()
}

/// Directed ring over `ids` with unit lengths.
pub fn add_ring(builder: &mut GraphBuilder, ids: &[NodeId]) {
    for (index, &id) in ids.iter().enumerate() {
        builder
            .add_node(id, index as f64 * 0.001, ids[0] as f64 * 0.01)
            .expect("ring node");
    }
    for window in ids.windows(2) {
        builder.add_edge(window[0], window[1], 1.0, None).expect("ring edge");
    }
    builder
        .add_edge(ids[ids.len() - 1], ids[0], 1.0, None)
        .expect("closing edge");
}

/// A 3-node cycle and a 7-node cycle joined by a single one-way bridge.
pub fn two_clusters() -> RoadGraph {
    let mut builder = GraphBuilder::new();
    add_ring(&mut builder, &[1, 2, 3]);
    add_ring(&mut builder, &[10, 11, 12, 13, 14, 15, 16]);
    builder.add_edge(3, 10, 5.0, None).expect("bridge");
    builder.build()
}
