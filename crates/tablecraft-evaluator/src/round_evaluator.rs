use std::fmt;

use tablecraft_core::{BuildRound, PlacedPiece};

/// Scores the pieces of a finished round.
///
/// Implementations return an accuracy percentage in \[0, 100\], higher is
/// better, and never mutate their inputs.
pub trait RoundEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_round(&self, pieces: &[PlacedPiece]) -> f64;

    /// Closes `round` and scores the pieces placed in it.
    fn finish_round(&self, round: &mut BuildRound) -> f64 {
        self.evaluate_round(round.finish())
    }
}
