//! Game session: players, shared dice, turn orchestration, and the log.

pub mod error;
pub mod game;
pub mod log;
pub mod player;
pub mod report;

pub use error::GameError;
pub use game::{GameSession, Snapshot};
pub use log::{GameLog, LogEntry, LogKind};
pub use player::Player;
pub use report::{action_report, TurnOutcome};
