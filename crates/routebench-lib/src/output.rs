use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;

use crate::benchmark::{ComparisonReport, ResultRow, RouteOutcome, REFERENCE_ALGORITHM};
use crate::error::Result;
use crate::graph::{NodeId, RoadGraph};
use crate::routing::RouteAlgorithm;

const ALGORITHM_WIDTH: usize = 10;
const TIME_WIDTH: usize = 12;
const NODES_WIDTH: usize = 14;
const DISTANCE_WIDTH: usize = 14;

/// Render the comparison as a fixed-width text table.
///
/// Rows without a route show `-` in every measure column and a marker in the
/// time column. Fault reasons are listed under the table.
pub fn render_table(report: &ComparisonReport) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{:<aw$} | {:>tw$} | {:>nw$} | {:>dw$}",
        "Algorithm",
        "Time (s)",
        "Nodes in route",
        "Distance (m)",
        aw = ALGORITHM_WIDTH,
        tw = TIME_WIDTH,
        nw = NODES_WIDTH,
        dw = DISTANCE_WIDTH,
    );
    let _ = writeln!(
        buffer,
        "{}",
        "-".repeat(ALGORITHM_WIDTH + TIME_WIDTH + NODES_WIDTH + DISTANCE_WIDTH + 9)
    );

    for row in &report.rows {
        let (time, nodes, distance) = row_cells(row);
        let _ = writeln!(
            buffer,
            "{:<aw$} | {:>tw$} | {:>nw$} | {:>dw$}",
            row.algorithm.title(),
            time,
            nodes,
            distance,
            aw = ALGORITHM_WIDTH,
            tw = TIME_WIDTH,
            nw = NODES_WIDTH,
            dw = DISTANCE_WIDTH,
        );
    }

    for row in &report.rows {
        if let RouteOutcome::Fault { reason } = &row.outcome {
            let _ = writeln!(buffer, "{}: {reason}", row.algorithm.title());
        }
    }

    buffer
}

fn row_cells(row: &ResultRow) -> (String, String, String) {
    match &row.outcome {
        RouteOutcome::Found { path, distance, .. } => (
            row.elapsed
                .map(|elapsed| format!("{:.6}", elapsed.as_secs_f64()))
                .unwrap_or_else(|| "-".to_string()),
            path.len().to_string(),
            format!("{distance:.2}"),
        ),
        RouteOutcome::NotFound => ("not found".to_string(), "-".to_string(), "-".to_string()),
        RouteOutcome::Fault { .. } => ("error".to_string(), "-".to_string(), "-".to_string()),
    }
}

/// A node on an exported route, with coordinates when known.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoutePoint {
    pub id: NodeId,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Reference route handed to an external map renderer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteExport {
    pub algorithm: RouteAlgorithm,
    pub distance: Option<f64>,
    /// Ordered route points, or `None` when no route exists.
    pub route: Option<Vec<RoutePoint>>,
}

impl RouteExport {
    pub fn from_report(graph: &RoadGraph, report: &ComparisonReport) -> Self {
        let distance = report
            .row(REFERENCE_ALGORITHM)
            .and_then(ResultRow::distance);
        let route = report.reference_route.as_ref().map(|steps| {
            steps
                .iter()
                .map(|&id| {
                    let position = graph.position(id);
                    RoutePoint {
                        id,
                        x: position.map(|p| p.x),
                        y: position.map(|p| p.y),
                    }
                })
                .collect()
        });

        Self {
            algorithm: REFERENCE_ALGORITHM,
            distance,
            route,
        }
    }

    /// Write the export as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// Structural overview of a graph and its largest strongly connected component.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub parallel_pairs: usize,
    pub components: usize,
    pub largest_component_nodes: usize,
    pub largest_component_edges: usize,
}

impl GraphSummary {
    pub fn from_graph(graph: &RoadGraph) -> Self {
        let components = graph.strongly_connected_components();
        let component_count = components.len();
        let reduced = graph.reduce_to_largest(components);
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            parallel_pairs: graph.parallel_pair_count(),
            components: component_count,
            largest_component_nodes: reduced.graph().node_count(),
            largest_component_edges: reduced.graph().edge_count(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "Nodes:                   {}", self.nodes);
        let _ = writeln!(buffer, "Edges:                   {}", self.edges);
        let _ = writeln!(buffer, "Parallel node pairs:     {}", self.parallel_pairs);
        let _ = writeln!(buffer, "Strong components:       {}", self.components);
        let _ = writeln!(
            buffer,
            "Largest component:       {} nodes, {} edges",
            self.largest_component_nodes, self.largest_component_edges
        );
        buffer
    }
}
