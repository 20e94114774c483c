use std::path::PathBuf;

use tablecraft_evaluator::coverage::CoverageScorer;

use crate::{
    schema::{report::ScoreReport, round_file::RoundFile},
    util,
};

use super::{EvaluatorKind, ScoringArgs};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScoreArg {
    /// Round file with the drawn pieces and optional template
    round: PathBuf,
    /// Scoring method
    #[arg(long, default_value = "coverage")]
    evaluator: EvaluatorKind,
    #[clap(flatten)]
    scoring: ScoringArgs,
    /// Write the report as JSON
    #[arg(long)]
    json: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let ScoreArg {
        round,
        evaluator,
        scoring,
        json,
        output,
    } = arg;

    let round_file: RoundFile = util::load_json("round", round)?;
    let template = round_file.template_or_default();
    let config = scoring.resolve()?;
    tracing::info!(
        template_points = template.size(),
        pieces = round_file.pieces.len(),
        %evaluator,
        "scoring round"
    );

    let report = match evaluator {
        EvaluatorKind::Coverage => {
            let breakdown = CoverageScorer::new(&template, config).breakdown(&round_file.pieces);
            ScoreReport {
                evaluator: evaluator.to_string(),
                accuracy_percent: breakdown.accuracy_percent,
                breakdown: Some(breakdown),
            }
        }
        EvaluatorKind::Proximity => ScoreReport {
            evaluator: evaluator.to_string(),
            accuracy_percent: evaluator
                .build(&template, config)
                .evaluate_round(&round_file.pieces),
            breakdown: None,
        },
    };

    util::write_report(&report, *json, output.as_deref())
}
