//! Route evaluation: turning node sequences into physical measures.

use crate::error::{Error, Result};
use crate::graph::{NodeId, RoadGraph, WeightKind};

/// Total length in meters of the route through `nodes`.
///
/// Each consecutive pair contributes the shortest of its parallel edges.
/// Sequences of zero or one node measure `0.0`.
///
/// # Errors
///
/// [`Error::Disconnected`] when a consecutive pair has no edge, which means
/// whatever produced the sequence is broken.
pub fn path_distance(graph: &RoadGraph, nodes: &[NodeId]) -> Result<f64> {
    nodes.windows(2).try_fold(0.0, |total, pair| {
        let (from, to) = (pair[0], pair[1]);
        let bucket = graph
            .edges_between(from, to)
            .ok_or(Error::Disconnected { from, to })?;
        Ok(total + bucket.min_length())
    })
}

/// Total travel time in seconds along `nodes`, when every traversed pair has
/// at least one edge carrying a travel time.
///
/// Returns `Ok(None)` if any pair lacks travel time data.
pub fn path_travel_time(graph: &RoadGraph, nodes: &[NodeId]) -> Result<Option<f64>> {
    let mut total = 0.0;
    for pair in nodes.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let bucket = graph
            .edges_between(from, to)
            .ok_or(Error::Disconnected { from, to })?;
        match bucket.min_weight(WeightKind::TravelTime) {
            Some(time) => total += time,
            None => return Ok(None),
        }
    }
    Ok(Some(total))
}
