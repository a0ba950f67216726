use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use terrapath_lib::Cell;

mod commands;
mod output;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Client for the terrapath elevation search service")]
struct Cli {
    /// Address of the search service.
    #[arg(long, global = true, default_value = "127.0.0.1:5001")]
    addr: String,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep evenly spaced start rows across the raster and compare the
    /// service's paths against the greedy baseline.
    Compare {
        /// Path to the raster file (whitespace-separated integers, one row
        /// per line).
        raster: PathBuf,

        /// Number of start rows to sweep down the first column.
        #[arg(long, default_value_t = 10)]
        steps: usize,

        /// Append a synthetic goal column holding the mean of the current
        /// last column.
        #[arg(long)]
        pad_goal_column: bool,
    },
    /// Run one search and print its frame-by-frame reconstruction.
    Replay {
        /// Path to the raster file.
        raster: PathBuf,

        /// Start coordinate as `row,col`.
        #[arg(long, value_parser = parse_cell_arg)]
        start: Cell,

        /// Goal coordinate as `row,col`; defaults to the start row in the
        /// last column.
        #[arg(long, value_parser = parse_cell_arg)]
        goal: Option<Cell>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Compare {
            raster,
            steps,
            pad_goal_column,
        } => commands::compare::run(&cli.addr, cli.format, &raster, steps, pad_goal_column),
        Command::Replay {
            raster,
            start,
            goal,
        } => commands::replay::run(&cli.addr, cli.format, &raster, start, goal),
    }
}

fn parse_cell_arg(value: &str) -> Result<Cell, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got {:?}", value))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("invalid row in {:?}", value))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("invalid col in {:?}", value))?;
    Ok(Cell::new(row, col))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
