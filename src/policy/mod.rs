//! Decision policies for computer-controlled seats.

pub mod opponent;

pub use opponent::{choose_keep, decide, dice_for_next_roll, Decision, PolicyContext};
