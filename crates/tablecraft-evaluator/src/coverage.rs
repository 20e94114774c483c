//! Pixel-overlap scoring of a drawn table against its template.
//!
//! # Algorithm
//!
//! ```text
//! budget    = template_size × pixels_per_template_unit
//! for every pixel of every piece:
//!     drawn += 1
//!     covered += 1 if some template point is within `tolerance` on both axes
//!     excess  += 1 otherwise
//! coverage% = 100 × covered / budget        (0 when budget = 0)
//! excess%   = 100 × excess / drawn          (0 when drawn = 0)
//! accuracy  = min(100, max(0, coverage% − excess_penalty_weight × excess%))
//! ```
//!
//! The budget models every template unit as a 20×20 pixel footprint even though
//! the template itself is a set of points. Overlapping pieces count every drawn
//! pixel, so `coverage%` may exceed 100; only the final accuracy is clamped.
//!
//! Rows are counted with [`TemplateIndex::covered_in_row`], which yields the
//! same count as testing each pixel individually.

use serde::{Deserialize, Serialize};
use tablecraft_core::{PlacedPiece, Template};

use crate::{round_evaluator::RoundEvaluator, template_index::TemplateIndex};

/// Tuning constants of the coverage scorer.
///
/// Defaults reproduce the game's behaviour. Fields missing from a config file
/// keep their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Half-width of the square window in which a drawn pixel counts as
    /// covering a template point.
    pub tolerance: i32,
    /// Pixel budget contributed by each template point.
    pub pixels_per_template_unit: u32,
    /// Weight of the excess percentage subtracted from the coverage percentage.
    pub excess_penalty_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tolerance: 10,
            pixels_per_template_unit: 400,
            excess_penalty_weight: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidConfigError {
    #[display("tolerance must not be negative, got {tolerance}")]
    NegativeTolerance { tolerance: i32 },
    #[display("excess penalty weight must be a finite non-negative number, got {weight}")]
    InvalidExcessWeight { weight: f64 },
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        if self.tolerance < 0 {
            return Err(InvalidConfigError::NegativeTolerance {
                tolerance: self.tolerance,
            });
        }
        let weight = self.excess_penalty_weight;
        if !weight.is_finite() || weight < 0.0 {
            return Err(InvalidConfigError::InvalidExcessWeight { weight });
        }
        Ok(())
    }
}

/// Intermediate counters of a coverage evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoverageBreakdown {
    pub template_pixel_budget: u64,
    pub total_drawn_pixels: u64,
    pub covered_pixels: u64,
    pub excess_pixels: u64,
    /// Unclamped; may exceed 100 when pieces overlap.
    pub coverage_percent: f64,
    pub excess_percent: f64,
    /// Final score in \[0, 100\].
    pub accuracy_percent: f64,
}

/// Scores drawn pieces by how much of the template they cover and how much
/// they spill outside it.
///
/// # Example
///
/// ```
/// use tablecraft_core::{PlacedPiece, Template, TemplatePoint};
/// use tablecraft_evaluator::coverage::{CoverageScorer, ScoringConfig};
///
/// let template = Template::new(vec![TemplatePoint::new(100, 100)]);
/// let scorer = CoverageScorer::new(&template, ScoringConfig::default());
///
/// let pieces = [PlacedPiece::new(95, 95, 105, 105)];
/// assert_eq!(scorer.score(&pieces), 25.0);
/// ```
#[derive(Debug, Clone)]
pub struct CoverageScorer {
    index: TemplateIndex,
    template_size: usize,
    config: ScoringConfig,
}

impl CoverageScorer {
    /// Indexes `template` and creates a scorer for it.
    #[must_use]
    pub fn new(template: &Template, config: ScoringConfig) -> Self {
        let index = TemplateIndex::for_tolerance(template.points(), config.tolerance);
        Self::from_index(index, template.size(), config)
    }

    /// Creates a scorer from a prebuilt index.
    ///
    /// `template_size` is the number of template units used for the pixel
    /// budget; it is not required to match the index's point count.
    #[must_use]
    pub fn from_index(index: TemplateIndex, template_size: usize, config: ScoringConfig) -> Self {
        Self {
            index,
            template_size,
            config,
        }
    }

    #[must_use]
    pub fn index(&self) -> &TemplateIndex {
        &self.index
    }

    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    #[must_use]
    pub fn template_pixel_budget(&self) -> u64 {
        u64::try_from(self.template_size)
            .unwrap_or(u64::MAX)
            .saturating_mul(u64::from(self.config.pixels_per_template_unit))
    }

    /// Accuracy percentage in \[0, 100\].
    #[must_use]
    pub fn score(&self, pieces: &[PlacedPiece]) -> f64 {
        self.breakdown(pieces).accuracy_percent
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn breakdown(&self, pieces: &[PlacedPiece]) -> CoverageBreakdown {
        let tolerance = self.config.tolerance;
        let template_pixel_budget = self.template_pixel_budget();

        let mut total_drawn_pixels = 0;
        let mut covered_pixels = 0;
        for piece in pieces {
            total_drawn_pixels = u64::saturating_add(total_drawn_pixels, piece.area());
            let covered = self
                .index
                .rows_near(piece.rows(), tolerance)
                .map(|y| self.index.covered_in_row(y, piece.columns(), tolerance))
                .fold(0, u64::saturating_add);
            covered_pixels = u64::saturating_add(covered_pixels, covered);
        }
        let excess_pixels = total_drawn_pixels - covered_pixels;

        let coverage_percent = if template_pixel_budget == 0 {
            0.0
        } else {
            100.0 * covered_pixels as f64 / template_pixel_budget as f64
        };
        let excess_percent = if total_drawn_pixels == 0 {
            0.0
        } else {
            100.0 * excess_pixels as f64 / total_drawn_pixels as f64
        };
        let accuracy_percent = (coverage_percent
            - self.config.excess_penalty_weight * excess_percent)
            .max(0.0)
            .min(100.0);

        CoverageBreakdown {
            template_pixel_budget,
            total_drawn_pixels,
            covered_pixels,
            excess_pixels,
            coverage_percent,
            excess_percent,
            accuracy_percent,
        }
    }
}

impl RoundEvaluator for CoverageScorer {
    fn evaluate_round(&self, pieces: &[PlacedPiece]) -> f64 {
        self.score(pieces)
    }
}

#[cfg(test)]
mod tests {
    use tablecraft_core::{
        BuildRound, Canvas, Scribbler, TABLE_PIECE_SIZE, TableTemplate, TemplatePoint,
    };

    use super::*;

    fn single_point_scorer() -> CoverageScorer {
        let template = Template::new(vec![TemplatePoint::new(100, 100)]);
        CoverageScorer::new(&template, ScoringConfig::default())
    }

    /// Reference implementation testing every pixel against every template point.
    #[expect(clippy::cast_precision_loss)]
    fn brute_force_score(template: &Template, config: &ScoringConfig, pieces: &[PlacedPiece]) -> f64 {
        let mut drawn = 0u64;
        let mut covered = 0u64;
        for piece in pieces {
            for x in piece.columns() {
                for y in piece.rows() {
                    drawn += 1;
                    if template
                        .points()
                        .iter()
                        .any(|p| p.is_within(x, y, config.tolerance))
                    {
                        covered += 1;
                    }
                }
            }
        }
        let budget = template.size() as u64 * u64::from(config.pixels_per_template_unit);
        let coverage = if budget == 0 {
            0.0
        } else {
            100.0 * covered as f64 / budget as f64
        };
        let excess = if drawn == 0 {
            0.0
        } else {
            100.0 * (drawn - covered) as f64 / drawn as f64
        };
        (coverage - config.excess_penalty_weight * excess)
            .max(0.0)
            .min(100.0)
    }

    #[test]
    fn test_piece_inside_tolerance_window() {
        let breakdown = single_point_scorer().breakdown(&[PlacedPiece::new(95, 95, 105, 105)]);
        assert_eq!(breakdown.template_pixel_budget, 400);
        assert_eq!(breakdown.total_drawn_pixels, 100);
        assert_eq!(breakdown.covered_pixels, 100);
        assert_eq!(breakdown.excess_pixels, 0);
        assert!((breakdown.coverage_percent - 25.0).abs() < 1e-9);
        assert_eq!(breakdown.excess_percent, 0.0);
        assert!((breakdown.accuracy_percent - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_piece_far_from_template() {
        let breakdown = single_point_scorer().breakdown(&[PlacedPiece::new(500, 500, 510, 510)]);
        assert_eq!(breakdown.covered_pixels, 0);
        assert_eq!(breakdown.excess_pixels, 100);
        assert_eq!(breakdown.coverage_percent, 0.0);
        assert!((breakdown.excess_percent - 100.0).abs() < 1e-9);
        assert_eq!(breakdown.accuracy_percent, 0.0);
    }

    #[test]
    fn test_partial_excess_penalty() {
        let template = Template::new(vec![TemplatePoint::new(0, 0)]);
        let scorer = CoverageScorer::new(&template, ScoringConfig::default());
        let pieces = [
            // 20 × 10 pixels, all inside the window around (0, 0)
            PlacedPiece::new(-10, 0, 10, 10),
            // 10 × 5 pixels, far away
            PlacedPiece::new(100, 100, 110, 105),
        ];
        let breakdown = scorer.breakdown(&pieces);
        assert_eq!(breakdown.total_drawn_pixels, 250);
        assert_eq!(breakdown.covered_pixels, 200);
        assert_eq!(breakdown.excess_pixels, 50);
        assert!((breakdown.coverage_percent - 50.0).abs() < 1e-9);
        assert!((breakdown.excess_percent - 20.0).abs() < 1e-9);
        assert!((breakdown.accuracy_percent - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_pieces_scores_zero() {
        let scorer = CoverageScorer::new(&TableTemplate::default().build(), ScoringConfig::default());
        let breakdown = scorer.breakdown(&[]);
        assert_eq!(breakdown.total_drawn_pixels, 0);
        assert_eq!(breakdown.excess_percent, 0.0);
        assert_eq!(breakdown.accuracy_percent, 0.0);
    }

    #[test]
    fn test_empty_template_scores_zero() {
        let scorer = CoverageScorer::new(&Template::default(), ScoringConfig::default());
        let pieces = [PlacedPiece::new(0, 0, 50, 50), PlacedPiece::new(-5, -5, 5, 5)];
        let breakdown = scorer.breakdown(&pieces);
        assert_eq!(breakdown.template_pixel_budget, 0);
        assert_eq!(breakdown.coverage_percent, 0.0);
        assert_eq!(breakdown.accuracy_percent, 0.0);
        assert!(!breakdown.accuracy_percent.is_nan());
    }

    #[test]
    fn test_degenerate_pieces_contribute_nothing() {
        let scorer = single_point_scorer();
        let base = [PlacedPiece::new(95, 95, 105, 105)];
        let with_degenerate = [
            base[0],
            PlacedPiece::new(100, 100, 100, 110),
            PlacedPiece::new(500, 500, 400, 400),
        ];
        assert_eq!(scorer.breakdown(&base), scorer.breakdown(&with_degenerate));
    }

    #[test]
    fn test_canvas_sized_pieces_saturate_pixel_counts() {
        let template = Template::new(vec![TemplatePoint::new(0, 0)]);
        let scorer = CoverageScorer::new(&template, ScoringConfig::default());
        let huge = PlacedPiece::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        let breakdown = scorer.breakdown(&[huge, huge]);
        assert_eq!(breakdown.total_drawn_pixels, u64::MAX);
        assert_eq!(breakdown.covered_pixels, 2 * 21 * 21);
        assert_eq!(breakdown.excess_pixels, u64::MAX - 2 * 21 * 21);
        assert!((0.0..=100.0).contains(&breakdown.accuracy_percent));
    }

    #[test]
    fn test_overlapping_pieces_are_not_deduplicated() {
        let scorer = single_point_scorer();
        // Each piece covers 400 pixels of the window; four copies exceed the budget
        let piece = PlacedPiece::centered_at(100, 100, 20);
        let breakdown = scorer.breakdown(&[piece; 4]);
        assert_eq!(breakdown.covered_pixels, 1600);
        assert!((breakdown.coverage_percent - 400.0).abs() < 1e-9);
        assert_eq!(breakdown.accuracy_percent, 100.0);
    }

    #[test]
    fn test_score_bounds_and_order_invariance() {
        let template = TableTemplate::default().build();
        let scorer = CoverageScorer::new(&template, ScoringConfig::default());
        let mut scribbler = Scribbler::new();
        for count in [1, 5, 40, 150] {
            let mut pieces = scribbler.traced(&template, count, 15, TABLE_PIECE_SIZE);
            pieces.extend(scribbler.scattered(Canvas::default(), count / 2, TABLE_PIECE_SIZE));
            let score = scorer.score(&pieces);
            assert!((0.0..=100.0).contains(&score), "score {score} out of range");

            let mut reversed = pieces.clone();
            reversed.reverse();
            assert_eq!(scorer.breakdown(&reversed), scorer.breakdown(&pieces));
        }
    }

    #[test]
    fn test_far_piece_never_increases_score() {
        let template = TableTemplate::default().build();
        let scorer = CoverageScorer::new(&template, ScoringConfig::default());
        let mut scribbler = Scribbler::new();
        let mut pieces = scribbler.traced(&template, 30, 6, TABLE_PIECE_SIZE);
        let mut previous = scorer.score(&pieces);
        for i in 0..5 {
            pieces.push(PlacedPiece::centered_at(-1000 - 50 * i, -1000, TABLE_PIECE_SIZE));
            let score = scorer.score(&pieces);
            assert!(score <= previous, "{score} > {previous}");
            previous = score;
        }
    }

    #[test]
    fn test_exact_tracing_is_bounded() {
        let template = TableTemplate::default().build();
        let scorer = CoverageScorer::new(&template, ScoringConfig::default());
        let pieces = template
            .points()
            .iter()
            .map(|p| PlacedPiece::centered_at(p.x, p.y, TABLE_PIECE_SIZE))
            .collect::<Vec<_>>();
        let breakdown = scorer.breakdown(&pieces);
        assert_eq!(breakdown.excess_pixels, 0);
        assert!((breakdown.accuracy_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_matches_brute_force() {
        let template = TableTemplate::default().build();
        let mut scribbler = Scribbler::new();
        let configs = [
            ScoringConfig::default(),
            ScoringConfig {
                tolerance: 3,
                pixels_per_template_unit: 100,
                excess_penalty_weight: 1.5,
            },
            ScoringConfig {
                tolerance: 0,
                ..ScoringConfig::default()
            },
        ];
        for config in configs {
            let scorer = CoverageScorer::new(&template, config);
            for _ in 0..5 {
                let mut pieces = scribbler.traced(&template, 25, 12, TABLE_PIECE_SIZE);
                pieces.extend(scribbler.scattered(Canvas::default(), 5, TABLE_PIECE_SIZE));
                let expected = brute_force_score(&template, &config, &pieces);
                let actual = scorer.score(&pieces);
                assert!(
                    (expected - actual).abs() < 1e-9,
                    "{actual} != {expected} with {config:?}"
                );
            }
        }
    }

    #[test]
    fn test_index_built_for_other_tolerance() {
        let template = TableTemplate::default().build();
        let index = TemplateIndex::build(template.points(), 4);
        let config = ScoringConfig::default();
        let scorer = CoverageScorer::from_index(index, template.size(), config);
        let pieces = [PlacedPiece::new(280, 230, 330, 280)];
        let expected = brute_force_score(&template, &config, &pieces);
        assert!((scorer.score(&pieces) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_finish_round_scores_pieces() {
        let template = TableTemplate::default().build();
        let scorer = CoverageScorer::new(&template, ScoringConfig::default());
        let mut round = BuildRound::new(template);
        round.place(PlacedPiece::centered_at(310, 250, 20)).unwrap();
        let score = scorer.finish_round(&mut round);
        assert!(round.is_finished());
        assert!((score - scorer.score(round.pieces())).abs() < f64::EPSILON);
        assert!(score > 0.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(ScoringConfig::default().validate().is_ok());
        let negative = ScoringConfig {
            tolerance: -1,
            ..ScoringConfig::default()
        };
        assert_eq!(
            negative.validate(),
            Err(InvalidConfigError::NegativeTolerance { tolerance: -1 })
        );
        let nan = ScoringConfig {
            excess_penalty_weight: f64::NAN,
            ..ScoringConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_config_file_defaults() {
        let config: ScoringConfig = serde_json::from_str(r#"{"tolerance": 5}"#).unwrap();
        assert_eq!(config.tolerance, 5);
        assert_eq!(config.pixels_per_template_unit, 400);
        assert!((config.excess_penalty_weight - 0.5).abs() < f64::EPSILON);
    }
}
