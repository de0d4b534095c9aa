//! Compare command: run every algorithm on one origin/destination pair.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use routebench_lib::{
    resolve_query, BenchmarkRunner, ComparisonReport, Position, RouteExport, SpatialIndex,
};

use crate::commands::inspect::load_road_graph;
use routebench_cli::output::{render_comparison_text, render_json, OutputFormat};
use routebench_cli::terminal::ColorPalette;

/// Arguments for the compare command.
#[derive(Debug, Clone)]
pub struct CompareCommandArgs {
    pub from: Position,
    pub to: Position,
    /// Run the planners concurrently.
    pub parallel: bool,
    /// Where to write the reference route for external rendering.
    pub export_route: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CompareOutput<'a> {
    graph_nodes: usize,
    reduced_nodes: usize,
    report: &'a ComparisonReport,
}

pub fn handle_compare(
    target: Option<&Path>,
    format: OutputFormat,
    args: &CompareCommandArgs,
) -> Result<()> {
    let graph = load_road_graph(target)?;
    let reduced = graph.largest_strongly_connected_component();
    let index = SpatialIndex::build(reduced.graph());

    let query = resolve_query(&reduced, &index, args.from, args.to)
        .context("failed to snap query points onto the road graph")?;
    info!(
        origin = query.origin,
        destination = query.destination,
        "running comparison"
    );

    let report = BenchmarkRunner::new()
        .parallel(args.parallel)
        .run(&reduced, query)
        .context("failed to compare routing algorithms")?;

    if let Some(path) = &args.export_route {
        let export = RouteExport::from_report(reduced.graph(), &report);
        let file = File::create(path)
            .with_context(|| format!("failed to create route export {}", path.display()))?;
        export
            .write_json(BufWriter::new(file))
            .with_context(|| format!("failed to write route export {}", path.display()))?;
        info!(path = %path.display(), "exported reference route");
    }

    match format {
        OutputFormat::Text => render_comparison_text(&report, &ColorPalette::detect()),
        OutputFormat::Json => render_json(&CompareOutput {
            graph_nodes: graph.node_count(),
            reduced_nodes: reduced.graph().node_count(),
            report: &report,
        })?,
    }

    Ok(())
}
