//! Dice and the sources that roll them.

pub mod die;
pub mod source;

pub use die::{DiceSet, Die};
pub use source::{DiceSource, RandomDice, ScriptedDice};
