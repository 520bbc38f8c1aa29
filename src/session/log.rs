//! Append-only game log.
//!
//! Every state change the session makes appends one entry. The log is for
//! observers; nothing in the engine reads it back to make decisions.

use serde::{Deserialize, Serialize};

/// The kind of event an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogKind {
    NewGame,
    TurnStart,
    Roll,
    HotDice,
    Select,
    Deselect,
    Lock,
    Continue,
    Decide,
    Heresy,
    Bank,
    TitheRejected,
    Report,
    GameOver,
}

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub seq: u64,
    pub kind: LogKind,
    /// Seat the event concerns, if any.
    pub player: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    pub fn new() -> Self {
        GameLog::default()
    }

    /// Appends an entry and returns it.
    pub fn push(
        &mut self,
        kind: LogKind,
        player: Option<usize>,
        message: impl Into<String>,
    ) -> &LogEntry {
        let seq = self.entries.len() as u64 + 1;
        self.entries.push(LogEntry {
            seq,
            kind,
            player,
            message: message.into(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries appended after sequence number `seq`.
    pub fn since(&self, seq: u64) -> &[LogEntry] {
        let start = (seq as usize).min(self.entries.len());
        &self.entries[start..]
    }
}
