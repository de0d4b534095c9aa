mod common;

use std::fs;

use routebench_lib::{load_graph, Error};
use tempfile::tempdir;

#[test]
fn fixture_network_loads() {
    let graph = load_graph(&common::fixture_graph_path()).unwrap();
    assert_eq!(graph.node_count(), 7);
    assert_eq!(graph.edge_count(), 11);
    assert_eq!(graph.parallel_pair_count(), 1);
    assert_eq!(graph.edges_between(1, 2).unwrap().min_length(), 100.0);
}

#[test]
fn csv_directory_loads() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("nodes.csv"),
        "id,x,y\n1,-34.90,-8.05\n2,-34.91,-8.05\n3,,\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("edges.csv"),
        "source,target,length,travel_time\n1,2,120.5,10\n2,1,120.5,\n2,3,15,2\n",
    )
    .unwrap();

    let graph = load_graph(dir.path()).unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert!(graph.position(3).is_none());
    assert_eq!(graph.edges_between(1, 2).unwrap().edges()[0].travel_time, Some(10.0));
}

#[test]
fn csv_directory_without_edges_is_not_found() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("nodes.csv"), "id,x,y\n1,0,0\n").unwrap();

    let err = load_graph(dir.path()).expect_err("edges.csv missing");
    assert!(matches!(err, Error::GraphSourceNotFound { path } if path.ends_with("edges.csv")));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let err = load_graph(&dir.path().join("nope.json")).expect_err("missing");
    assert!(matches!(err, Error::GraphSourceNotFound { .. }));
}

#[test]
fn duplicate_node_ids_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.json");
    fs::write(
        &path,
        r#"{"nodes":[{"id":1,"x":0,"y":0},{"id":1,"x":1,"y":1}],"edges":[]}"#,
    )
    .unwrap();
    let err = load_graph(&path).expect_err("duplicate id");
    assert!(matches!(err, Error::InvalidGraph { .. }));
}
