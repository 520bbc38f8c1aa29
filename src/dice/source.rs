//! Injectable sources of die faces.
//!
//! The engine never calls a random number generator directly; every roll
//! pulls faces from a `DiceSource`, which keeps the rest of the engine
//! deterministic and testable.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::rules::{MAX_FACE, MIN_FACE};

/// Produces die faces in 1..=6.
pub trait DiceSource {
    fn roll_face(&mut self) -> u8;
}

/// Uniformly random faces backed by a `SmallRng`.
pub struct RandomDice {
    rng: SmallRng,
}

impl RandomDice {
    /// Creates a source with a fixed seed; equal seeds give equal rolls.
    pub fn from_seed(seed: u64) -> Self {
        RandomDice {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from the operating system.
    pub fn from_entropy() -> Self {
        RandomDice {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl DiceSource for RandomDice {
    fn roll_face(&mut self) -> u8 {
        self.rng.gen_range(MIN_FACE..=MAX_FACE)
    }
}

/// Replays a fixed sequence of faces. Panics when the sequence runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        ScriptedDice {
            faces: faces.into_iter().collect(),
        }
    }

    /// Appends more faces to the end of the script.
    pub fn push(&mut self, faces: &[u8]) {
        self.faces.extend(faces.iter().copied());
    }

    /// Number of faces not yet consumed.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_face(&mut self) -> u8 {
        self.faces
            .pop_front()
            .expect("scripted dice exhausted: add more faces to the script")
    }
}
