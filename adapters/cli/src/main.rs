#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the CookieMan movement engine headlessly.

mod driver;
mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;

use crate::scenario::Scenario;

/// Headless driver for the CookieMan grid movement engine.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file describing the maze layout and scripted input.
    #[arg(short, long)]
    layout: PathBuf,
    /// Number of ticks to simulate, overriding the scenario.
    #[arg(short, long)]
    ticks: Option<u32>,
    /// Print the classified grid before simulating.
    #[arg(long)]
    dump_grid: bool,
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the CookieMan command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let scenario = Scenario::from_path(&args.layout)?;
    let maze = driver::build_maze(&scenario)?;
    if args.dump_grid {
        print!("{}", driver::render_grid(&maze));
    }

    let outcome = driver::run(&scenario, &maze, args.ticks.unwrap_or(scenario.ticks))?;
    println!("final cell {} at position {}", outcome.cell, outcome.position);
    Ok(())
}

/// Initializes the global logger; `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // `try_init` only fails when a logger is already installed.
    let _ = Builder::from_env(env).try_init();
}
