//! Scoring for the table-building mini-game.
//!
//! - [`template_index`] - Grid spatial index answering "is this pixel near the template"
//! - [`coverage`] - Pixel-overlap scorer: template coverage minus an excess-drawing penalty
//! - [`proximity`] - Distance-based scorer matching each template point to its nearest piece
//! - [`round_evaluator`] - The trait both scorers implement, so hosts can pick one at runtime
//! - [`summary`] - Statistics over batches of scores, used when calibrating constants
//!
//! # Example
//!
//! ```
//! use tablecraft_core::{BuildRound, PlacedPiece, TableTemplate};
//! use tablecraft_evaluator::{
//!     coverage::{CoverageScorer, ScoringConfig},
//!     round_evaluator::RoundEvaluator,
//! };
//!
//! let template = TableTemplate::default().build();
//! let scorer = CoverageScorer::new(&template, ScoringConfig::default());
//!
//! let mut round = BuildRound::new(template);
//! round.place(PlacedPiece::centered_at(310, 250, 20)).unwrap();
//!
//! let accuracy = scorer.finish_round(&mut round);
//! println!("Accuracy: {accuracy:.2}%");
//! ```

pub mod coverage;
pub mod proximity;
pub mod round_evaluator;
pub mod summary;
pub mod template_index;
