//! Road graph loading from disk.
//!
//! Two layouts are supported:
//!
//! - a single JSON document with `nodes` and `edges` arrays
//! - a directory holding `nodes.csv` (`id,x,y`) and `edges.csv`
//!   (`source,target,length[,travel_time]`)
//!
//! Every record is validated through [`GraphBuilder`], so malformed input
//! surfaces as [`Error::InvalidGraph`] rather than a half-built graph.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::graph::{GraphBuilder, NodeId, RoadGraph};

/// File name of the node table inside a CSV graph directory.
pub const NODES_CSV: &str = "nodes.csv";
/// File name of the edge table inside a CSV graph directory.
pub const EDGES_CSV: &str = "edges.csv";

#[derive(Debug, Deserialize)]
struct NodeRecord {
    id: NodeId,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    source: NodeId,
    target: NodeId,
    length: f64,
    #[serde(default)]
    travel_time: Option<f64>,
    #[serde(default)]
    key: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GraphDocument {
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

/// Load a graph from a JSON file or a CSV directory.
pub fn load_graph(path: &Path) -> Result<RoadGraph> {
    if !path.exists() {
        return Err(Error::GraphSourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let graph = if path.is_dir() {
        let nodes = open_table(path, NODES_CSV)?;
        let edges = open_table(path, EDGES_CSV)?;
        graph_from_csv_readers(nodes, edges)?
    } else {
        graph_from_json_reader(BufReader::new(File::open(path)?))?
    };

    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded road graph"
    );
    Ok(graph)
}

/// Parse a JSON graph document.
pub fn graph_from_json_reader<R: Read>(reader: R) -> Result<RoadGraph> {
    let document: GraphDocument = serde_json::from_reader(reader)?;
    assemble(document.nodes, document.edges)
}

/// Parse a graph from its node and edge CSV tables.
pub fn graph_from_csv_readers<N: Read, E: Read>(nodes: N, edges: E) -> Result<RoadGraph> {
    let nodes = read_records::<NodeRecord, _>(nodes)?;
    let edges = read_records::<EdgeRecord, _>(edges)?;
    assemble(nodes, edges)
}

fn open_table(dir: &Path, name: &str) -> Result<File> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(Error::GraphSourceNotFound { path });
    }
    Ok(File::open(path)?)
}

fn read_records<T, R>(reader: R) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);
    let mut records = Vec::new();
    for record in csv_reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

fn assemble(nodes: Vec<NodeRecord>, edges: Vec<EdgeRecord>) -> Result<RoadGraph> {
    let mut builder = GraphBuilder::new();
    for node in nodes {
        match (node.x, node.y) {
            (Some(x), Some(y)) => builder.add_node(node.id, x, y)?,
            _ => builder.add_node_without_position(node.id)?,
        };
    }
    for edge in edges {
        match edge.key {
            Some(key) => {
                builder.add_edge_with_key(
                    edge.source,
                    edge.target,
                    key,
                    edge.length,
                    edge.travel_time,
                )?;
            }
            None => {
                builder.add_edge(edge.source, edge.target, edge.length, edge.travel_time)?;
            }
        }
    }
    Ok(builder.build())
}
