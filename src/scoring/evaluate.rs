//! Score evaluation for a multiset of die faces.
//!
//! Six-die specials are checked first (straight, three pairs, four of a kind
//! plus a pair, two triplets). Everything else falls through to the generic
//! rules: sets of three or more, then single 1s and 5s.

use serde::Serialize;

use crate::rules::{DICE_COUNT, MAX_FACE, MIN_FACE};

/// Errors raised when the evaluator is handed values it cannot score.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("at most {max} dice can be scored, got {0}", max = DICE_COUNT)]
    TooManyDice(usize),

    #[error("die face must be between {min} and {max}, got {0}", min = MIN_FACE, max = MAX_FACE)]
    InvalidFace(u8),
}

/// Score for the full six-die specials: straight, three pairs, four plus a pair.
pub const SIX_DIE_SPECIAL_SCORE: u32 = 1500;

/// Score for two triplets in a single six-die roll.
pub const TWO_TRIPLETS_SCORE: u32 = 2500;

const SINGLE_ONE_SCORE: u32 = 100;
const SINGLE_FIVE_SCORE: u32 = 50;

/// Result of scoring a set of faces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub score: u32,
    /// Faces consumed by the scoring combination, ascending.
    pub used_dice: Vec<u8>,
}

impl Evaluation {
    /// Returns true if every one of `count` dice took part in the score.
    pub fn consumes_all(&self, count: usize) -> bool {
        self.score > 0 && self.used_dice.len() == count
    }
}

/// Per-face occurrence counts, indexed by face value (index 0 unused).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceCounts([u8; 7]);

impl FaceCounts {
    /// Counts the faces in `values`, rejecting malformed input.
    pub fn from_values(values: &[u8]) -> Result<Self, ScoreError> {
        if values.len() > DICE_COUNT {
            return Err(ScoreError::TooManyDice(values.len()));
        }
        let mut counts = [0u8; 7];
        for &v in values {
            if !(MIN_FACE..=MAX_FACE).contains(&v) {
                return Err(ScoreError::InvalidFace(v));
            }
            counts[v as usize] += 1;
        }
        Ok(FaceCounts(counts))
    }

    /// Number of dice showing `face`.
    #[inline]
    pub fn get(&self, face: u8) -> u8 {
        self.0[face as usize]
    }

    /// Total number of dice counted.
    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }

    /// Iterates `(face, count)` over every face, including absent ones.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (MIN_FACE..=MAX_FACE).map(move |f| (f, self.0[f as usize]))
    }

    fn faces_with_count(&self, n: u8) -> usize {
        self.iter().filter(|&(_, c)| c == n).count()
    }

    /// Returns the score of the six-die special this roll forms, if any.
    pub fn six_die_special(&self) -> Option<u32> {
        if self.total() != DICE_COUNT {
            return None;
        }
        let is_straight = self.iter().all(|(_, c)| c == 1);
        let is_three_pairs = self.faces_with_count(2) == 3;
        let is_four_and_pair = self.faces_with_count(4) == 1 && self.faces_with_count(2) == 1;
        if is_straight || is_three_pairs || is_four_and_pair {
            return Some(SIX_DIE_SPECIAL_SCORE);
        }
        if self.faces_with_count(3) == 2 {
            return Some(TWO_TRIPLETS_SCORE);
        }
        None
    }
}

/// Base score of three of a kind for `face`.
#[inline]
fn set_base_score(face: u8) -> u32 {
    if face == 1 {
        1000
    } else {
        face as u32 * 100
    }
}

/// Scores `values` with the highest standard interpretation.
///
/// Returns an error for more than six values or a face outside 1..=6. An
/// empty slice or a roll with no scoring element scores zero with nothing
/// consumed.
pub fn evaluate(values: &[u8]) -> Result<Evaluation, ScoreError> {
    let counts = FaceCounts::from_values(values)?;

    if let Some(score) = counts.six_die_special() {
        let mut used_dice = values.to_vec();
        used_dice.sort_unstable();
        return Ok(Evaluation { score, used_dice });
    }

    let mut score = 0u32;
    let mut used_dice = Vec::with_capacity(values.len());

    for (face, count) in counts.iter() {
        if count >= 3 {
            score += set_base_score(face) << (count - 3);
            used_dice.extend(std::iter::repeat(face).take(count as usize));
        }
    }

    // Singles only count when their face did not already form a set.
    let ones = counts.get(1);
    if ones < 3 {
        score += SINGLE_ONE_SCORE * ones as u32;
        used_dice.extend(std::iter::repeat(1).take(ones as usize));
    }
    let fives = counts.get(5);
    if fives < 3 {
        score += SINGLE_FIVE_SCORE * fives as u32;
        used_dice.extend(std::iter::repeat(5).take(fives as usize));
    }

    used_dice.sort_unstable();
    Ok(Evaluation { score, used_dice })
}
