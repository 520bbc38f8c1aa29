//! Narrative end-of-turn reports.

/// Banks below this are reported as a minor gain.
const MINOR_GAIN_LIMIT: u32 = 500;
/// Banks below this (and at least `MINOR_GAIN_LIMIT`) are a significant victory.
const SIGNIFICANT_GAIN_LIMIT: u32 = 1000;

const HERESY_REPORTS: [&str; 3] = [
    "A catastrophic failure of machine spirit. The Omnissiah is displeased.",
    "Such weakness invites corruption. A disappointing display.",
    "This unit's logic is flawed. Recalibration is required.",
];

/// How a turn ended, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Heresy,
    /// Amount actually added to the player's total (0 for a rejected tithe).
    Banked(u32),
}

/// Returns the report line for a finished turn.
///
/// Heresy lines rotate with the turn number so replays stay deterministic.
pub fn action_report(outcome: TurnOutcome, turn_number: u32) -> String {
    match outcome {
        TurnOutcome::Heresy => {
            HERESY_REPORTS[turn_number as usize % HERESY_REPORTS.len()].to_string()
        }
        TurnOutcome::Banked(0) => {
            "The tithe was insufficient. The Imperium demands more.".to_string()
        }
        TurnOutcome::Banked(score) if score < MINOR_GAIN_LIMIT => {
            format!("Data confirmed: {score} points secured. A minor but acceptable gain.")
        }
        TurnOutcome::Banked(score) if score < SIGNIFICANT_GAIN_LIMIT => format!(
            "Tactical analysis: {score} points represents a significant victory. Well executed."
        ),
        TurnOutcome::Banked(score) => format!(
            "Glorious! A magnificent tithe of {score} points! The Emperor's light shines upon this day!"
        ),
    }
}
