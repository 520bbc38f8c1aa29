//! Selectable-face classification for a fresh roll.
//!
//! The mask answers "which faces may the player keep", not "what is the roll
//! worth". A roll with an empty mask is a forfeiture.

use std::fmt;

use super::evaluate::{evaluate, FaceCounts, ScoreError};

/// A set of distinct die faces, stored as a bitmask over 1..=6.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaceSet(u8);

impl FaceSet {
    pub const EMPTY: FaceSet = FaceSet(0);

    /// Adds `face` to the set.
    #[inline]
    pub fn insert(&mut self, face: u8) {
        debug_assert!((1..=6).contains(&face));
        self.0 |= 1 << face;
    }

    #[inline]
    pub fn contains(self, face: u8) -> bool {
        face <= 6 && self.0 & (1 << face) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the faces in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=6u8).filter(move |&f| self.contains(f))
    }

    /// Builds the set of distinct faces present in `values`.
    pub fn of_values(values: &[u8]) -> FaceSet {
        let mut set = FaceSet::EMPTY;
        for &v in values {
            set.insert(v);
        }
        set
    }
}

impl fmt::Debug for FaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<u8> for FaceSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = FaceSet::EMPTY;
        for f in iter {
            set.insert(f);
        }
        set
    }
}

/// Returns the faces of `values` that may be selected.
///
/// Sets of three or more, any 1 and any 5 are selectable. A six-die special
/// makes every face selectable. Finally, if the evaluator consumes the whole
/// roll, every face present is selectable even when no per-face rule caught
/// it; this reconciliation is authoritative.
pub fn scoring_faces(values: &[u8]) -> Result<FaceSet, ScoreError> {
    let counts = FaceCounts::from_values(values)?;

    if counts.six_die_special().is_some() {
        return Ok(FaceSet::of_values(values));
    }

    let mut faces = FaceSet::EMPTY;
    for (face, count) in counts.iter() {
        if count >= 3 {
            faces.insert(face);
        }
    }
    if counts.get(1) > 0 {
        faces.insert(1);
    }
    if counts.get(5) > 0 {
        faces.insert(5);
    }

    if evaluate(values)?.used_dice.len() == values.len() {
        for &v in values {
            faces.insert(v);
        }
    }

    Ok(faces)
}

/// Returns true if `values` holds nothing the player could keep.
pub fn is_forfeit(values: &[u8]) -> Result<bool, ScoreError> {
    Ok(scoring_faces(values)?.is_empty())
}
