//! Turn transitions.
//!
//! Each function is one discrete step of a turn: roll the unlocked dice,
//! lock a validated selection, bank, forfeit, and hand the dice to the other
//! player. None of them consult a clock; the only nondeterminism is the
//! `DiceSource` passed to `roll`.

use tracing::debug;

use super::state::{Phase, TurnState, TurnStep};
use crate::dice::{DiceSet, DiceSource};
use crate::rules::{MIN_SCORE_TO_GET_ON_BOARD, WINNING_SCORE};
use crate::scoring::{evaluate, scoring_faces, Evaluation, FaceSet, ScoreError};
use crate::session::Player;

/// Errors raised by an out-of-order or invalid turn action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("Keep some scoring dice before rolling again.")]
    AlreadyRolled,

    #[error("Roll the dice before keeping any.")]
    NotRolled,

    #[error("Must select scoring dice first.")]
    NothingSelected,

    #[error("Invalid selection. Choose a valid scoring combination.")]
    InvalidSelection { selected: Vec<u8>, evaluation: Evaluation },

    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// The result of rolling the unlocked dice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roll {
    /// Faces of the dice that were rolled, in id order.
    pub faces: Vec<u8>,
    /// Faces the player may keep; empty means the roll forfeits the turn.
    pub scoring: FaceSet,
    /// True if every die had been locked and all six were rolled again.
    pub hot_dice: bool,
}

impl Roll {
    pub fn is_forfeit(&self) -> bool {
        self.scoring.is_empty()
    }
}

/// What a bank did to the acting player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankOutcome {
    /// The player was not on the board and the turn fell short of the entry
    /// threshold; the turn score is discarded.
    Rejected { turn_score: u32 },
    /// The turn score was added to the player's total.
    Banked { amount: u32, total: u32 },
    /// The bank reached the winning score; the game is over.
    Won { amount: u32, total: u32 },
}

/// Rolls every unlocked die and classifies the result.
///
/// If no die is unlocked, all six are unlocked first (hot dice). A scoring
/// roll flags its selectable dice and moves the turn to selection; a
/// forfeiting roll leaves the turn awaiting `forfeit`.
pub fn roll<S: DiceSource + ?Sized>(
    state: &mut TurnState,
    dice: &mut DiceSet,
    source: &mut S,
) -> Result<Roll, TurnError> {
    if state.step != TurnStep::AwaitingRoll {
        return Err(TurnError::AlreadyRolled);
    }

    let hot_dice = dice.unlocked_count() == 0;
    if hot_dice {
        dice.unlock_all();
    }

    dice.roll_unlocked(source);
    let faces = dice.unlocked_values();
    let scoring = scoring_faces(&faces)?;

    if !scoring.is_empty() {
        dice.mark_scoring(scoring);
        state.step = TurnStep::AwaitingSelection;
    }

    debug!(
        player = state.current_player_index,
        ?faces,
        ?scoring,
        hot_dice,
        "rolled"
    );

    Ok(Roll {
        faces,
        scoring,
        hot_dice,
    })
}

/// Validates the selected dice and locks them.
///
/// The selection must score and every selected die must take part in the
/// score. On rejection nothing changes. On success the score is added to the
/// turn, the dice are locked, and the per-roll flags are cleared.
pub fn lock_selection(state: &mut TurnState, dice: &mut DiceSet) -> Result<Evaluation, TurnError> {
    if state.step != TurnStep::AwaitingSelection {
        return Err(TurnError::NotRolled);
    }

    let selected = dice.selected_values();
    if selected.is_empty() {
        return Err(TurnError::NothingSelected);
    }

    let evaluation = evaluate(&selected)?;
    if !evaluation.consumes_all(selected.len()) {
        return Err(TurnError::InvalidSelection {
            selected,
            evaluation,
        });
    }

    state.turn_score += evaluation.score;
    dice.lock_selected();
    dice.clear_marks();
    state.step = TurnStep::AwaitingRoll;

    debug!(
        player = state.current_player_index,
        score = evaluation.score,
        turn_score = state.turn_score,
        "locked selection"
    );

    Ok(evaluation)
}

/// Commits the turn score to `player`.
///
/// A player who is not yet on the board needs at least the entry threshold;
/// otherwise the score is discarded and their status is untouched. Reaching
/// the winning score finishes the game.
pub fn bank(state: &mut TurnState, player: &mut Player) -> BankOutcome {
    let turn_score = state.turn_score;
    state.turn_score = 0;

    if !player.is_on_board && turn_score < MIN_SCORE_TO_GET_ON_BOARD {
        return BankOutcome::Rejected { turn_score };
    }

    player.score += turn_score;
    player.is_on_board = true;

    if player.score >= WINNING_SCORE {
        state.phase = Phase::Finished;
        BankOutcome::Won {
            amount: turn_score,
            total: player.score,
        }
    } else {
        BankOutcome::Banked {
            amount: turn_score,
            total: player.score,
        }
    }
}

/// Discards the turn score after a roll with nothing to keep.
/// Returns the amount lost.
pub fn forfeit(state: &mut TurnState) -> u32 {
    std::mem::take(&mut state.turn_score)
}

/// Hands the dice to the other player with a fresh set.
pub fn end_turn(state: &mut TurnState, dice: &mut DiceSet) {
    state.turn_score = 0;
    *dice = DiceSet::fresh();
    state.current_player_index = state.other_player_index();
    state.phase = Phase::for_seat(state.current_player_index);
    state.step = TurnStep::AwaitingRoll;
    state.turn_number += 1;
}
