//! Fixed rule constants.
//!
//! The game has a single rule set; these values are shared by the turn
//! machine, the opponent policy, and the simulation harness.

/// Number of dice in play at the start of every turn.
pub const DICE_COUNT: usize = 6;

/// Cumulative score that ends the game on a successful bank.
pub const WINNING_SCORE: u32 = 10_000;

/// Minimum turn total a player must bank to get on the board.
pub const MIN_SCORE_TO_GET_ON_BOARD: u32 = 500;

/// Turn total at which an on-board opponent stops pushing its luck.
pub const OPPONENT_BANK_THRESHOLD: u32 = 400;

/// The on-board opponent only banks at the threshold when this few dice remain.
pub const OPPONENT_MAX_DICE_TO_BANK: usize = 3;

/// Lowest and highest die face.
pub const MIN_FACE: u8 = 1;
pub const MAX_FACE: u8 = 6;
