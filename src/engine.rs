//! Engine state management.
//!
//! Holds the game session, the dice source, and engine options between
//! commands. Every handler writes one JSON line per snapshot (or one error
//! line) to the output.

use std::collections::HashMap;
use std::io::{self, Write};

use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::dice::{DiceSource, RandomDice};
use crate::policy::Decision;
use crate::session::{GameError, GameSession, Snapshot};
use crate::turn::Phase;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub session: GameSession,
    pub options: HashMap<String, String>,
    dice: Box<dyn DiceSource + Send>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates an engine with entropy-seeded dice and no game started.
    pub fn new() -> Self {
        Engine::with_source(Box::new(RandomDice::from_entropy()))
    }

    /// Creates an engine rolling from the given source.
    pub fn with_source(dice: Box<dyn DiceSource + Send>) -> Self {
        Engine {
            session: GameSession::new(),
            options: HashMap::new(),
            dice,
        }
    }

    /// Sets an engine option. `Seed` reseeds the dice immediately.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name == "Seed" {
            match value.as_deref().map(str::parse::<u64>) {
                Some(Ok(seed)) => self.dice = Box::new(RandomDice::from_seed(seed)),
                _ => warn!(?value, "invalid Seed value"),
            }
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Returns whether the opponent's turn is played automatically (default true).
    fn auto_opponent(&self) -> bool {
        self.options
            .get("AutoOpponent")
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true)
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `newgame`.
    pub fn handle_new_game<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let snapshot = self.session.start_new_game();
        write_json(out, &snapshot)
    }

    /// Handles `roll`.
    pub fn handle_roll<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let result = self.session.roll(&mut *self.dice);
        self.respond(result, out)
    }

    /// Handles `select <die_id>`.
    pub fn handle_select<W: Write>(&mut self, die_id: u8, out: &mut W) -> io::Result<()> {
        let result = self.session.toggle_select(die_id);
        self.respond(result, out)
    }

    /// Handles `bank` and `continue`.
    pub fn handle_resolve<W: Write>(&mut self, action: Decision, out: &mut W) -> io::Result<()> {
        let result = self.session.resolve_turn(action, &mut *self.dice);
        self.respond(result, out)
    }

    /// Handles `step`: one opponent cycle.
    pub fn handle_step<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.session.opponent_step(&mut *self.dice) {
            Ok(snapshot) => write_json(out, &snapshot),
            Err(e) => write_error(out, &e),
        }
    }

    /// Handles `opponent`: the rest of the opponent's turn.
    pub fn handle_opponent<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.session.play_opponent_turn(&mut *self.dice) {
            Ok(snapshots) => snapshots.iter().try_for_each(|s| write_json(out, s)),
            Err(e) => write_error(out, &e),
        }
    }

    /// Handles `state`.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_json(out, &self.session.snapshot())
    }

    /// Handles `log`.
    pub fn handle_log<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_json(out, &json!({ "log": self.session.log() }))
    }

    /// Writes the result of a human action. If the action handed the dice to
    /// the opponent and `AutoOpponent` is on, plays the opponent's turn too.
    fn respond<W: Write>(
        &mut self,
        result: Result<Snapshot, GameError>,
        out: &mut W,
    ) -> io::Result<()> {
        match result {
            Ok(snapshot) => {
                write_json(out, &snapshot)?;
                if snapshot.phase == Phase::OpponentTurn && self.auto_opponent() {
                    self.handle_opponent(out)?;
                }
                Ok(())
            }
            Err(e) => write_error(out, &e),
        }
    }
}

/// Writes `value` as a single JSON line.
fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}

fn write_error<W: Write>(out: &mut W, err: &GameError) -> io::Result<()> {
    warn!(%err, "rejected");
    write_json(out, &json!({ "error": err.to_string() }))
}
