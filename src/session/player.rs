//! Players and their banked scores.

use serde::{Deserialize, Serialize};

/// A player and their banked score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u8,
    pub name: String,
    pub score: u32,
    /// Set by the first bank that meets the entry threshold; never cleared.
    pub is_on_board: bool,
}

impl Player {
    /// The human seat.
    pub fn human() -> Self {
        Player {
            id: 0,
            name: "Player Commander".to_string(),
            score: 0,
            is_on_board: false,
        }
    }

    /// The scripted opponent seat.
    pub fn opponent() -> Self {
        Player {
            id: 1,
            name: "AI Heretek".to_string(),
            score: 0,
            is_on_board: false,
        }
    }
}
