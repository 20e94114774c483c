//! Distance-based scoring, the evaluation used before pixel-overlap scoring.
//!
//! Every template point is matched with the piece whose centre is closest to it:
//!
//! ```text
//! match(p)  = max(0, max over pieces of 100 − distance(p, centre) / 5)
//! accuracy  = clamp(mean over template points of match(p), 0, 100)
//! ```
//!
//! Unlike [`crate::coverage`], drawing extra pieces far from the table is never
//! penalised.

use tablecraft_core::{PlacedPiece, Template};

use crate::round_evaluator::RoundEvaluator;

/// Pixels of distance that cost one percentage point.
const DISTANCE_PER_POINT: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct ProximityEvaluator {
    template: Template,
}

impl ProximityEvaluator {
    #[must_use]
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn score(&self, pieces: &[PlacedPiece]) -> f64 {
        let points = self.template.points();
        if points.is_empty() {
            return 0.0;
        }
        let centers = pieces.iter().map(PlacedPiece::center).collect::<Vec<_>>();
        let total = points
            .iter()
            .map(|p| {
                centers
                    .iter()
                    .map(|&(x, y)| 100.0 - p.distance_to(x, y) / DISTANCE_PER_POINT)
                    .fold(0.0, f64::max)
            })
            .sum::<f64>();
        (total / points.len() as f64).max(0.0).min(100.0)
    }
}

impl RoundEvaluator for ProximityEvaluator {
    fn evaluate_round(&self, pieces: &[PlacedPiece]) -> f64 {
        self.score(pieces)
    }
}
