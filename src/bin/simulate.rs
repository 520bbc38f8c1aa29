//! Policy simulation CLI.
//!
//! Plays games with the opponent policy in both seats and writes one JSON
//! record per game.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use heresy::simulate::{self, SimulationConfig};

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Play policy-versus-policy games and record the outcomes")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Turn limit per game
    #[arg(long, default_value_t = 1000)]
    max_turns: u32,

    /// Number of parallel threads
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<String>,

    /// Suppress progress and summary output
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = SimulationConfig {
        num_games: args.games,
        max_turns: args.max_turns,
        threads: args.threads,
        seed: args.seed,
        quiet: args.quiet,
    };

    info!(
        games = config.num_games,
        max_turns = config.max_turns,
        threads = config.threads,
        seed = config.seed,
        "starting simulation"
    );

    let start = Instant::now();
    let games = simulate::run_simulation(&config)?;
    let elapsed = start.elapsed();

    if !args.quiet {
        eprintln!(
            "Completed {} games in {:.2}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        simulate::print_summary(&games);
    }

    match args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            simulate::write_jsonl(&games, &mut writer)?;
            info!(games = games.len(), path = %path, "wrote records");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            simulate::write_jsonl(&games, &mut writer)?;
        }
    }

    Ok(())
}
