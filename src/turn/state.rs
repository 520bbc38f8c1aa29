//! Turn state representation.
//!
//! Tracks whose turn it is, the score accumulated in the turn so far, the
//! game phase, and which step of the roll/select cycle the turn is in.

use serde::{Deserialize, Serialize};

/// Seat index of the human player.
pub const HUMAN_SEAT: usize = 0;
/// Seat index of the scripted opponent.
pub const OPPONENT_SEAT: usize = 1;

/// The phase of the game as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    PlayerTurn,
    OpponentTurn,
    Finished,
}

impl Phase {
    /// Returns the turn phase for the player sitting at `seat`.
    pub const fn for_seat(seat: usize) -> Phase {
        if seat == HUMAN_SEAT {
            Phase::PlayerTurn
        } else {
            Phase::OpponentTurn
        }
    }

    /// Returns true while a turn is being played.
    pub const fn is_active(self) -> bool {
        matches!(self, Phase::PlayerTurn | Phase::OpponentTurn)
    }
}

/// The step within a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnStep {
    /// The unlocked dice are waiting to be rolled.
    AwaitingRoll,
    /// A scoring roll is on the table; the player must keep some dice.
    AwaitingSelection,
}

/// The state of the turn in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnState {
    pub current_player_index: usize,
    pub turn_score: u32,
    pub phase: Phase,
    pub step: TurnStep,
    /// Number of turns started since the game began, counting from 1.
    pub turn_number: u32,
}

impl TurnState {
    /// State before the first turn of a game.
    pub const fn not_started() -> Self {
        TurnState {
            current_player_index: HUMAN_SEAT,
            turn_score: 0,
            phase: Phase::NotStarted,
            step: TurnStep::AwaitingRoll,
            turn_number: 0,
        }
    }

    /// State at the start of the first turn, human to act.
    pub const fn first_turn() -> Self {
        TurnState {
            current_player_index: HUMAN_SEAT,
            turn_score: 0,
            phase: Phase::PlayerTurn,
            step: TurnStep::AwaitingRoll,
            turn_number: 1,
        }
    }

    /// Seat of the player who does not hold the dice.
    pub const fn other_player_index(&self) -> usize {
        1 - self.current_player_index
    }
}

impl Default for TurnState {
    fn default() -> Self {
        TurnState::not_started()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_for_seat() {
        assert_eq!(Phase::for_seat(HUMAN_SEAT), Phase::PlayerTurn);
        assert_eq!(Phase::for_seat(OPPONENT_SEAT), Phase::OpponentTurn);
    }

    #[test]
    fn active_phases() {
        assert!(!Phase::NotStarted.is_active());
        assert!(Phase::PlayerTurn.is_active());
        assert!(Phase::OpponentTurn.is_active());
        assert!(!Phase::Finished.is_active());
    }

    #[test]
    fn first_turn_belongs_to_human() {
        let state = TurnState::first_turn();
        assert_eq!(state.current_player_index, HUMAN_SEAT);
        assert_eq!(state.other_player_index(), OPPONENT_SEAT);
        assert_eq!(state.phase, Phase::PlayerTurn);
        assert_eq!(state.turn_score, 0);
        assert_eq!(TurnState::default().phase, Phase::NotStarted);
    }
}
