mod commands;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use routebench_cli::logging::{init_logging, LoggingConfig};
use routebench_cli::output::{print_footer, print_logo, OutputFormat};
use routebench_lib::Position;

use commands::compare::{handle_compare, CompareCommandArgs};
use commands::inspect::handle_inspect;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compare BFS, Dijkstra and A* shortest paths on a road network"
)]
struct Cli {
    /// Graph file (JSON) or directory (nodes.csv + edges.csv).
    /// Falls back to ROUTEBENCH_GRAPH, then the platform data directory.
    #[arg(long, global = true)]
    graph: Option<PathBuf>,

    /// Output format for reports.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Suppress the banner.
    #[arg(long, global = true)]
    no_logo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every routing algorithm between two geographic points.
    Compare(CompareArgs),
    /// Report node, edge and component counts for the graph.
    Inspect,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Origin latitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    from_lat: f64,
    /// Origin longitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    from_lon: f64,
    /// Destination latitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    to_lat: f64,
    /// Destination longitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    to_lon: f64,
    /// Run the algorithms concurrently.
    #[arg(long)]
    parallel: bool,
    /// Write the Dijkstra route as JSON for map rendering.
    #[arg(long, value_name = "PATH")]
    export_route: Option<PathBuf>,
}

impl From<CompareArgs> for CompareCommandArgs {
    fn from(args: CompareArgs) -> Self {
        Self {
            from: Position::new(args.from_lon, args.from_lat),
            to: Position::new(args.to_lon, args.to_lat),
            parallel: args.parallel,
            export_route: args.export_route,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::from_env());

    let started = Instant::now();
    if cli.format.is_text() && !cli.no_logo {
        print_logo();
    }

    let target = cli.graph.as_deref();
    match cli.command {
        Command::Compare(args) => handle_compare(target, cli.format, &args.into())?,
        Command::Inspect => handle_inspect(target, cli.format)?,
    }

    if cli.format.is_text() {
        print_footer(started.elapsed());
    }
    Ok(())
}
