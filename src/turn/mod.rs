//! The turn state machine.
//!
//! `state` holds the data a turn carries between steps; `machine` holds the
//! transitions: roll, lock, bank, forfeit, and end of turn.

pub mod machine;
pub mod state;

pub use machine::{bank, end_turn, forfeit, lock_selection, roll, BankOutcome, Roll, TurnError};
pub use state::{Phase, TurnState, TurnStep, HUMAN_SEAT, OPPONENT_SEAT};
