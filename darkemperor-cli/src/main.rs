//! DarkEmperor CLI - hex map pathfinding from the command line
//!
//! Commands:
//! - path: Find a movement path for a stack
//! - distance: Hex distance between two cells
//! - neighbors: Neighboring cells of a cell
//! - show: Print the map, optionally with a path
//! - benchmark: Time pathfinding on random maps

mod benchmark;
mod map_source;
mod path_cmd;
mod query_cmd;
mod show_cmd;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "darkemperor")]
#[command(about = "Hex map pathfinding for DarkEmperor scenarios")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a movement path for a stack
    Path(path_cmd::PathArgs),
    /// Hex distance between two cells
    Distance(query_cmd::DistanceArgs),
    /// List the on-map neighbors of a cell
    Neighbors(query_cmd::NeighborsArgs),
    /// Print the map as ASCII
    Show(show_cmd::ShowArgs),
    /// Time pathfinding on random maps
    Benchmark(benchmark::BenchmarkArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Path(args) => path_cmd::run(args),
        Commands::Distance(args) => query_cmd::run_distance(args),
        Commands::Neighbors(args) => query_cmd::run_neighbors(args),
        Commands::Show(args) => show_cmd::run(args),
        Commands::Benchmark(args) => benchmark::run(args),
    }
}
