//! Output formatting for comparison and graph reports.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use routebench_lib::{render_table, ComparisonReport, GraphSummary, RouteOutcome};

use crate::terminal::{colors, format_with_separators, supports_color, supports_unicode, ColorPalette};

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// Machine-readable JSON document.
    Json,
}

impl OutputFormat {
    pub fn is_text(self) -> bool {
        matches!(self, OutputFormat::Text)
    }
}

/// Print the CLI logo banner.
///
/// Uses box-drawing characters when the locale advertises UTF-8 and respects
/// `NO_COLOR` and `TERM=dumb`.
pub fn print_logo() {
    let (orange, cyan, reset) = if supports_color() {
        (colors::ORANGE, colors::CYAN, colors::RESET)
    } else {
        ("", "", "")
    };

    if supports_unicode() {
        println!(
            "{cyan}╭──────────────────────────────────────╮{reset}
{cyan}│{orange}  R O U T E B E N C H                 {cyan}│{reset}
{cyan}│{orange}  BFS · Dijkstra · A*                 {cyan}│{reset}
{cyan}╰──────────────────────────────────────╯{reset}"
        );
    } else {
        println!(
            "{orange}+--------------------------------------+
|  ROUTEBENCH                          |
|  BFS / Dijkstra / A*                 |
+--------------------------------------+{reset}"
        );
    }
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: std::time::Duration) {
    let palette = ColorPalette::detect();

    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };

    println!("\n{}Completed in {}{}", palette.muted, time_str, palette.reset);
}

/// Render a comparison report as a colored table.
pub fn render_comparison_text(report: &ComparisonReport, palette: &ColorPalette) {
    println!(
        "Origin node {}  ->  destination node {}\n",
        report.query.origin, report.query.destination
    );

    let table = render_table(report);
    let mut lines = table.lines();
    if let Some(header) = lines.next() {
        println!("{}{}{}", palette.header, header, palette.reset);
    }
    if let Some(rule) = lines.next() {
        println!("{}{}{}", palette.muted, rule, palette.reset);
    }
    for row in &report.rows {
        let Some(line) = lines.next() else { break };
        let color = match row.outcome {
            RouteOutcome::Found { .. } => palette.found,
            RouteOutcome::NotFound => palette.missing,
            RouteOutcome::Fault { .. } => palette.fault,
        };
        println!("{color}{line}{}", palette.reset);
    }
    for note in lines {
        println!("{}{}{}", palette.fault, note, palette.reset);
    }

    match &report.reference_route {
        Some(route) => println!(
            "\nReference route (Dijkstra): {} nodes",
            format_with_separators(route.len() as u64)
        ),
        None => println!("\nNo reference route: the destination is unreachable."),
    }
}

/// Render graph statistics as text.
pub fn render_summary_text(summary: &GraphSummary) {
    print!("{}", summary.render_text());
}

/// Write any serialisable value to stdout as pretty JSON.
pub fn render_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}
