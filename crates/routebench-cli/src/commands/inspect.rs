//! Inspect command: report graph structure without running a query.

use std::path::Path;

use anyhow::{Context, Result};

use routebench_lib::{load_graph, resolve_graph_path, GraphSummary, RoadGraph};

use routebench_cli::output::{render_json, render_summary_text, OutputFormat};

/// Locate and load the road graph, attaching path context to failures.
pub fn load_road_graph(target: Option<&Path>) -> Result<RoadGraph> {
    let graph_path = resolve_graph_path(target).context("failed to locate the road graph")?;
    load_graph(&graph_path)
        .with_context(|| format!("failed to load road graph from {}", graph_path.display()))
}

pub fn handle_inspect(target: Option<&Path>, format: OutputFormat) -> Result<()> {
    let graph = load_road_graph(target)?;
    let summary = GraphSummary::from_graph(&graph);

    match format {
        OutputFormat::Text => render_summary_text(&summary),
        OutputFormat::Json => render_json(&summary)?,
    }
    Ok(())
}
