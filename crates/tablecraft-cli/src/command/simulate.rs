use std::path::PathBuf;

use anyhow::Context as _;
use tablecraft_core::{BuildRound, Canvas, RoundSeed, Scribbler, TABLE_PIECE_SIZE, TableTemplate};
use tablecraft_evaluator::{coverage::ScoringConfig, summary::ScoreSummary};

use crate::{schema::report::SimulationReport, util};

use super::{EvaluatorKind, ScoringArgs};

const PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];
const PROGRESS_INTERVAL: usize = 100;

#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display,
)]
pub(crate) enum ScribbleMode {
    /// Pieces follow the template with random jitter
    #[default]
    #[display("traced")]
    Traced,
    /// Pieces land anywhere on the canvas
    #[display("scattered")]
    Scattered,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of rounds to simulate
    #[arg(long, default_value_t = 1000)]
    rounds: usize,
    /// Pieces drawn per round
    #[arg(long, default_value_t = 70)]
    pieces: usize,
    /// Maximum offset in pixels of a traced piece from its template point
    #[arg(long, default_value_t = 10)]
    jitter: i32,
    /// How synthetic pieces are placed
    #[arg(long, default_value = "traced")]
    mode: ScribbleMode,
    /// Scoring method
    #[arg(long, default_value = "coverage")]
    evaluator: EvaluatorKind,
    /// 32 hex digit seed to reproduce a previous run
    #[arg(long)]
    seed: Option<RoundSeed>,
    #[clap(flatten)]
    scoring: ScoringArgs,
    /// Write the report as JSON
    #[arg(long)]
    json: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let config = arg.scoring.resolve()?;
    let seed = arg.seed.unwrap_or_else(|| Scribbler::new().seed());
    let summary = simulate_rounds(arg, config, seed)?;
    tracing::info!(
        mean = summary.mean,
        median = summary.median,
        std_dev = summary.std_dev,
        "simulation finished"
    );

    let report = SimulationReport {
        seed,
        mode: arg.mode.to_string(),
        evaluator: arg.evaluator.to_string(),
        pieces_per_round: arg.pieces,
        config,
        summary,
    };
    util::write_report(&report, arg.json, arg.output.as_deref())
}

/// Scores `arg.rounds` synthetic drawings of the default table. The same seed
/// always gives the same summary.
fn simulate_rounds(
    arg: &SimulateArg,
    config: ScoringConfig,
    seed: RoundSeed,
) -> anyhow::Result<ScoreSummary> {
    let SimulateArg {
        rounds,
        pieces,
        jitter,
        mode,
        evaluator,
        ..
    } = arg;

    let template = TableTemplate::default().build();
    let round_evaluator = evaluator.build(&template, config);
    let mut scribbler = Scribbler::with_seed(seed);
    tracing::info!(%seed, rounds, pieces, %mode, %evaluator, "simulating rounds");

    let mut round = BuildRound::new(template);
    let mut scores = Vec::with_capacity(*rounds);
    for i in 0..*rounds {
        round.restart();
        let drawing = match mode {
            ScribbleMode::Traced => {
                scribbler.traced(round.template(), *pieces, *jitter, TABLE_PIECE_SIZE)
            }
            ScribbleMode::Scattered => {
                scribbler.scattered(Canvas::default(), *pieces, TABLE_PIECE_SIZE)
            }
        };
        for piece in drawing {
            round.place(piece)?;
        }
        scores.push(round_evaluator.finish_round(&mut round));

        if (i + 1) % PROGRESS_INTERVAL == 0 {
            tracing::debug!(completed = i + 1, "simulation progress");
        }
    }

    ScoreSummary::new(&scores, &PERCENTILES).context("No rounds were simulated")
}
