//! Roll scoring and classification.
//!
//! `evaluate` computes what a set of faces is worth; `scoring_faces` decides
//! which faces of a fresh roll a player may keep.

pub mod evaluate;
pub mod mask;

pub use evaluate::{evaluate, Evaluation, FaceCounts, ScoreError};
pub use mask::{is_forfeit, scoring_faces, FaceSet};
