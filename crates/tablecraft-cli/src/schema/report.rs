use serde::Serialize;
use tablecraft_core::{RoundSeed, Template};
use tablecraft_evaluator::{
    coverage::{CoverageBreakdown, ScoringConfig},
    summary::ScoreSummary,
};

use crate::util::Report;

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub evaluator: String,
    pub accuracy_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<CoverageBreakdown>,
}

impl Report for ScoreReport {
    fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Accuracy: {:.2}%", self.accuracy_percent)];
        if let Some(b) = &self.breakdown {
            lines.push(format!(
                "Coverage: {:.2}% ({} of {} budget pixels)",
                b.coverage_percent, b.covered_pixels, b.template_pixel_budget
            ));
            lines.push(format!(
                "Excess:   {:.2}% ({} of {} drawn pixels)",
                b.excess_percent, b.excess_pixels, b.total_drawn_pixels
            ));
        }
        lines
    }
}

impl Report for Template {
    fn text_lines(&self) -> Vec<String> {
        self.points()
            .iter()
            .map(|point| format!("{},{}", point.x, point.y))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub seed: RoundSeed,
    pub mode: String,
    pub evaluator: String,
    pub pieces_per_round: usize,
    pub config: ScoringConfig,
    pub summary: ScoreSummary,
}

impl Report for SimulationReport {
    fn text_lines(&self) -> Vec<String> {
        let s = &self.summary;
        let mut lines = vec![
            format!("Seed:     {}", self.seed),
            format!(
                "Rounds:   {} ({}, {}, {} pieces each)",
                s.count, self.mode, self.evaluator, self.pieces_per_round
            ),
            format!("Mean:     {:.2}% (std dev {:.2})", s.mean, s.std_dev),
            format!("Median:   {:.2}%", s.median),
            format!("Range:    {:.2}% .. {:.2}%", s.min, s.max),
        ];
        lines.extend(
            s.percentiles
                .iter()
                .map(|(p, value)| format!("P{p:<7} {value:.2}%")),
        );
        lines
    }
}
