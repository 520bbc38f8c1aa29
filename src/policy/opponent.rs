//! Bank-or-continue policy for the scripted opponent.
//!
//! The policy is a pure function of the turn so far. It always keeps the
//! highest-scoring subset of a roll, then banks as soon as one of its
//! thresholds is met.

use serde::{Deserialize, Serialize};

use crate::rules::{
    DICE_COUNT, MIN_SCORE_TO_GET_ON_BOARD, OPPONENT_BANK_THRESHOLD, OPPONENT_MAX_DICE_TO_BANK,
};
use crate::scoring::{evaluate, Evaluation, ScoreError};

/// What to do after a scoring roll has been kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Bank,
    Continue,
}

/// Everything the policy looks at when deciding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyContext {
    /// Score accumulated this turn, including the roll just kept.
    pub current_turn_score: u32,
    /// Unlocked dice left after the roll just kept.
    pub dice_remaining: usize,
    pub is_on_board: bool,
    /// The player's banked total.
    pub player_score: u32,
    pub winning_score: u32,
}

/// Decides whether to bank the turn or keep rolling.
pub fn decide(ctx: &PolicyContext) -> Decision {
    if ctx.current_turn_score + ctx.player_score >= ctx.winning_score {
        return Decision::Bank;
    }
    if !ctx.is_on_board && ctx.current_turn_score >= MIN_SCORE_TO_GET_ON_BOARD {
        return Decision::Bank;
    }
    if ctx.is_on_board
        && ctx.current_turn_score >= OPPONENT_BANK_THRESHOLD
        && ctx.dice_remaining <= OPPONENT_MAX_DICE_TO_BANK
    {
        return Decision::Bank;
    }
    Decision::Continue
}

/// Returns the faces to keep from `faces`: the maximal scoring subset.
pub fn choose_keep(faces: &[u8]) -> Result<Evaluation, ScoreError> {
    evaluate(faces)
}

/// Number of dice the next roll uses after continuing with `dice_remaining`.
pub const fn dice_for_next_roll(dice_remaining: usize) -> usize {
    if dice_remaining == 0 {
        DICE_COUNT
    } else {
        dice_remaining
    }
}
