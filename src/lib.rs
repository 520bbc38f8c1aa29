//! Heresy engine library.
//!
//! Exposes the scoring rules, dice, turn state machine, opponent policy, and
//! game session, plus the line protocol and simulation harness used by the
//! binaries and integration tests.

pub mod dice;
pub mod engine;
pub mod policy;
pub mod protocol;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod simulate;
pub mod turn;
