//! Score ranges shared by the evaluator and the search
//!
//! Scores live in two disjoint bands. Heuristic scores of non-terminal
//! positions stay within `[-HEURISTIC_MAX, HEURISTIC_MAX]`. Proven results
//! sit at the far end, `WIN - ply` for a four completed `ply` moves after
//! the root, so a quicker win always ranks above a slower one.

use static_assertions::*;

use crate::{board::Color, MAX_PLY, MAX_SIZE};

pub type Score = i32;

/// Magnitude of a proven win or loss
pub const WIN: Score = 100_000_000;

/// Largest magnitude a heuristic evaluation may take
pub const HEURISTIC_MAX: Score = WIN / 2 - 1;

/// Initial alpha/beta bound, never returned as a node value
pub const INFINITY: Score = WIN + 1;

// sums of N sentinel-sized terms and their negations must fit an i32
const_assert!(WIN < Score::MAX / MAX_SIZE as Score);
const_assert!(INFINITY < Score::MAX);
// gap between the two bands
const_assert!(HEURISTIC_MAX < WIN - MAX_PLY as Score);

/// Value of a four completed `ply` moves below the root by the searching side
pub const fn win_in(ply: u32) -> Score {
    WIN - ply as Score
}

/// Value of a four completed `ply` moves below the root by the opponent
pub const fn loss_in(ply: u32) -> Score {
    -win_in(ply)
}

/// The win sentinel signed toward `owner`, seen from `perspective`
pub fn sentinel(owner: Color, perspective: Color) -> Score {
    owner.sign() * perspective.sign() * WIN
}

/// Whether a score is a proven result rather than a heuristic estimate
pub fn is_proven(score: Score) -> bool {
    score.abs() > HEURISTIC_MAX
}

/// Number of plies until the proven result, if the score is one
pub fn plies_to_result(score: Score) -> Option<u32> {
    if is_proven(score) {
        Some((WIN - score.abs()) as u32)
    } else {
        None
    }
}
