//! Die and dice-set types.
//!
//! The dice set is a fixed array of six dice indexed by id. Locked dice sit
//! out of rerolls for the rest of the turn; the scoring and selected flags
//! only describe the most recent roll.

use serde::{Deserialize, Serialize};

use super::source::DiceSource;
use crate::rules::DICE_COUNT;
use crate::scoring::FaceSet;

/// A single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Die {
    pub id: u8,
    pub value: u8,
    pub is_locked: bool,
    pub is_selected: bool,
    pub is_scoring: bool,
}

impl Die {
    /// A fresh, unlocked die showing 1.
    pub const fn fresh(id: u8) -> Self {
        Die {
            id,
            value: 1,
            is_locked: false,
            is_selected: false,
            is_scoring: false,
        }
    }

    /// Returns true if the die can currently be kept by the player.
    #[inline]
    pub fn is_selectable(&self) -> bool {
        self.is_scoring && !self.is_locked
    }
}

/// The six dice shared by both players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiceSet {
    dice: [Die; DICE_COUNT],
}

impl Default for DiceSet {
    fn default() -> Self {
        DiceSet::fresh()
    }
}

impl DiceSet {
    /// Six fresh dice with ids 0..6.
    pub fn fresh() -> Self {
        DiceSet {
            dice: std::array::from_fn(|i| Die::fresh(i as u8)),
        }
    }

    pub fn as_slice(&self) -> &[Die] {
        &self.dice
    }

    pub fn get(&self, id: u8) -> Option<&Die> {
        self.dice.get(id as usize)
    }

    pub fn get_mut(&mut self, id: u8) -> Option<&mut Die> {
        self.dice.get_mut(id as usize)
    }

    pub fn unlocked_count(&self) -> usize {
        self.dice.iter().filter(|d| !d.is_locked).count()
    }

    /// Faces of the unlocked dice, in id order.
    pub fn unlocked_values(&self) -> Vec<u8> {
        self.dice
            .iter()
            .filter(|d| !d.is_locked)
            .map(|d| d.value)
            .collect()
    }

    /// Faces of the selected dice, in id order.
    pub fn selected_values(&self) -> Vec<u8> {
        self.dice
            .iter()
            .filter(|d| d.is_selected)
            .map(|d| d.value)
            .collect()
    }

    /// Rolls every unlocked die and clears the per-roll flags.
    pub fn roll_unlocked<S: DiceSource + ?Sized>(&mut self, source: &mut S) {
        for die in self.dice.iter_mut() {
            die.is_selected = false;
            die.is_scoring = false;
            if !die.is_locked {
                die.value = source.roll_face();
            }
        }
    }

    /// Flags the unlocked dice whose face is in `faces` as scoring.
    pub fn mark_scoring(&mut self, faces: FaceSet) {
        for die in self.dice.iter_mut().filter(|d| !d.is_locked) {
            die.is_scoring = faces.contains(die.value);
        }
    }

    /// Clears the selected and scoring flags without unlocking anything.
    pub fn clear_marks(&mut self) {
        for die in self.dice.iter_mut() {
            die.is_selected = false;
            die.is_scoring = false;
        }
    }

    /// Locks every selected die and deselects it.
    pub fn lock_selected(&mut self) {
        for die in self.dice.iter_mut().filter(|d| d.is_selected) {
            die.is_locked = true;
            die.is_selected = false;
        }
    }

    /// Unlocks all dice for a hot-dice reroll, keeping their faces.
    pub fn unlock_all(&mut self) {
        for die in self.dice.iter_mut() {
            die.is_locked = false;
            die.is_selected = false;
            die.is_scoring = false;
        }
    }

    /// Selects one selectable die per face in `faces`, treating it as a
    /// multiset. Returns false (and selects nothing) if the unlocked scoring
    /// dice cannot cover it.
    pub fn select_faces(&mut self, faces: &[u8]) -> bool {
        let mut chosen = Vec::with_capacity(faces.len());
        for &face in faces {
            let pick = self
                .dice
                .iter()
                .position(|d| d.is_selectable() && d.value == face && !chosen.contains(&d.id));
            match pick {
                Some(i) => chosen.push(self.dice[i].id),
                None => return false,
            }
        }
        for die in self.dice.iter_mut() {
            die.is_selected = chosen.contains(&die.id);
        }
        true
    }
}
