use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the routebench library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// A search that finds no route is not represented here: path finders return
/// `Ok(None)` for that case.
#[derive(Debug, Error)]
pub enum Error {
    /// A query referenced a node that is not part of the graph.
    #[error("unknown node {node}")]
    UnknownNode { node: NodeId },

    /// Two nodes were expected to be adjacent in the given direction but are not.
    #[error("no edge from {from} to {to}")]
    NoEdge { from: NodeId, to: NodeId },

    /// None of the parallel edges between two nodes carry the requested weight.
    #[error("no {kind} recorded on any edge from {from} to {to}")]
    MissingWeight {
        from: NodeId,
        to: NodeId,
        kind: &'static str,
    },

    /// Nearest-node lookup was attempted on a graph without nodes.
    #[error("graph contains no nodes")]
    EmptyGraph,

    /// A lookup point had a non-finite longitude or latitude.
    #[error("invalid coordinate ({longitude}, {latitude})")]
    InvalidCoordinate { longitude: f64, latitude: f64 },

    /// A node sequence contained a consecutive pair without any connecting edge.
    #[error("route is disconnected between {from} and {to}")]
    Disconnected { from: NodeId, to: NodeId },

    /// The inbound graph violated a structural invariant.
    #[error("invalid graph: {message}")]
    InvalidGraph { message: String },

    /// No graph file could be found at the resolved location.
    #[error("graph source not found at {path}")]
    GraphSourceNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the default graph location")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV decoding errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid_graph(message: impl Into<String>) -> Self {
        Error::InvalidGraph {
            message: message.into(),
        }
    }
}
