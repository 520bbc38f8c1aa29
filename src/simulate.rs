//! Policy-versus-policy simulation.
//!
//! Plays complete games with the opponent policy in both seats and records
//! the outcome of each. Useful for checking the policy's win rate and the
//! seat advantage of moving first.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

use crate::dice::RandomDice;
use crate::session::{GameSession, LogKind};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Games still running after this many turns are recorded without a winner.
    pub max_turns: u32,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Base random seed (0 = use entropy). Game `i` uses `seed + i`.
    pub seed: u64,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_games: 100,
            max_turns: 1000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// The outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub seed: u64,
    /// Winning seat, or `None` if the turn limit was hit.
    pub winner: Option<usize>,
    pub final_scores: [u32; 2],
    pub turns: u32,
    /// Forfeited turns per seat.
    pub heresies: [u32; 2],
    pub hot_dice: u32,
}

/// Aggregate statistics over a set of games.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub wins: [usize; 2],
    pub unfinished: usize,
    pub avg_turns: f64,
    /// Fraction of all turns that ended in heresy.
    pub heresy_rate: f64,
}

/// Plays a single game to completion or to the turn limit, with the policy
/// acting for both seats.
pub fn play_game(config: &SimulationConfig, game_id: usize, seed: u64) -> GameRecord {
    let mut dice = RandomDice::from_seed(seed);
    let mut session = GameSession::new_game();

    while session.phase().is_active() && session.turn().turn_number <= config.max_turns {
        if let Err(e) = session.autoplay_step(&mut dice) {
            warn!(game_id, %e, "simulated game stopped");
            break;
        }
    }

    let mut heresies = [0u32; 2];
    let mut hot_dice = 0u32;
    for entry in session.log().entries() {
        match (entry.kind, entry.player) {
            (LogKind::Heresy, Some(seat)) => heresies[seat] += 1,
            (LogKind::HotDice, _) => hot_dice += 1,
            _ => {}
        }
    }

    let players = session.players();
    GameRecord {
        game_id,
        seed,
        winner: session.winner(),
        final_scores: [players[0].score, players[1].score],
        turns: session.turn().turn_number,
        heresies,
        hot_dice,
    }
}

/// Returns the seed used for game `game_id`.
fn game_seed(config: &SimulationConfig, game_id: usize, entropy: &mut SmallRng) -> u64 {
    if config.seed != 0 {
        config.seed.wrapping_add(game_id as u64)
    } else {
        entropy.gen()
    }
}

fn log_game(config: &SimulationConfig, game: &GameRecord) {
    if config.quiet {
        return;
    }
    let outcome = match game.winner {
        Some(seat) => format!("seat {} wins", seat),
        None => "unfinished".to_string(),
    };
    info!(
        game = game.game_id + 1,
        of = config.num_games,
        turns = game.turns,
        "{}",
        outcome
    );
}

/// Runs the simulation, producing one record per game in game-id order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_simulation(
    config: &SimulationConfig,
) -> Result<Vec<GameRecord>, rayon::ThreadPoolBuildError> {
    let mut entropy = SmallRng::from_entropy();
    let seeds: Vec<u64> = (0..config.num_games)
        .map(|i| game_seed(config, i, &mut entropy))
        .collect();

    if config.threads <= 1 {
        return Ok(seeds
            .iter()
            .enumerate()
            .map(|(i, &seed)| {
                let game = play_game(config, i, seed);
                log_game(config, &game);
                game
            })
            .collect());
    }

    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    Ok(pool.install(|| {
        seeds
            .par_iter()
            .enumerate()
            .map(|(i, &seed)| {
                let game = play_game(config, i, seed);
                log_game(config, &game);
                game
            })
            .collect()
    }))
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Computes aggregate statistics.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut wins = [0usize; 2];
    let mut unfinished = 0usize;
    let mut total_turns = 0u64;
    let mut total_heresies = 0u64;

    for game in games {
        match game.winner {
            Some(seat) => wins[seat] += 1,
            None => unfinished += 1,
        }
        total_turns += game.turns as u64;
        total_heresies += game.heresies.iter().map(|&h| h as u64).sum::<u64>();
    }

    let n = games.len().max(1) as f64;
    Summary {
        games: games.len(),
        wins,
        unfinished,
        avg_turns: total_turns as f64 / n,
        heresy_rate: total_heresies as f64 / total_turns.max(1) as f64,
    }
}

/// Prints a summary of simulation results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let summary = summarize(games);
    let n = summary.games.max(1) as f64;
    eprintln!("=== Simulation Summary ===");
    eprintln!("Games: {}", summary.games);
    eprintln!("Avg turns/game: {:.1}", summary.avg_turns);
    eprintln!("Heresy rate: {:.1}%", 100.0 * summary.heresy_rate);
    eprintln!("Unfinished: {}", summary.unfinished);
    for (seat, &w) in summary.wins.iter().enumerate() {
        eprintln!("  seat {}: {} ({:.1}%)", seat, w, 100.0 * w as f64 / n);
    }
}
