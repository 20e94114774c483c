//! Core types for the table-building mini-game.
//!
//! - [`core`] holds the plain value types: template points, placed pieces and
//!   the table template the player has to reproduce.
//! - [`engine`] holds the round state (piece collection and time limit) and the
//!   seeded [`Scribbler`] used to produce synthetic drawings for calibration.
//!
//! Scoring lives in the `tablecraft-evaluator` crate; nothing here knows how a
//! round is scored.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RoundError {
    #[display("time limit reached, no more pieces can be placed")]
    TimeUp,
    #[display("round already finished")]
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid round seed {input:?}: expected 32 hex characters")]
pub struct ParseRoundSeedError {
    input: String,
}
