//! Session-level errors.
//!
//! The `Display` text of each variant is the rejection message shown to the
//! player; a rejected operation never changes the session.

use crate::turn::TurnError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("No game in progress. Start a new game first.")]
    NotStarted,

    #[error("The game is over. Start a new game to play again.")]
    GameOver,

    #[error("It is not your turn.")]
    NotYourTurn,

    #[error("It is not the opponent's turn.")]
    NotOpponentTurn,

    #[error("No die with id {0}.")]
    UnknownDie(u8),

    #[error(transparent)]
    Turn(#[from] TurnError),
}
