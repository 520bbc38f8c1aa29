//! Heresy -- a two-player Farkle-variant dice engine.
//!
//! This binary reads commands from stdin and writes one JSON line per
//! response to stdout. Diagnostics go to stderr through `tracing`; set
//! `RUST_LOG` to see them.

use std::io::{self, BufRead};

use tracing_subscriber::EnvFilter;

use heresy::engine::Engine;
use heresy::policy::Decision;
use heresy::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame => engine.handle_new_game(&mut out)?,
            Command::Roll => engine.handle_roll(&mut out)?,
            Command::Select { die_id } => engine.handle_select(die_id, &mut out)?,
            Command::Bank => engine.handle_resolve(Decision::Bank, &mut out)?,
            Command::Continue => engine.handle_resolve(Decision::Continue, &mut out)?,
            Command::Step => engine.handle_step(&mut out)?,
            Command::Opponent => engine.handle_opponent(&mut out)?,
            Command::State => engine.handle_state(&mut out)?,
            Command::Log => engine.handle_log(&mut out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
