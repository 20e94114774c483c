use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tablecraft_core::Template;
use tablecraft_evaluator::{
    coverage::{CoverageScorer, ScoringConfig},
    proximity::ProximityEvaluator,
    round_evaluator::RoundEvaluator,
};

use crate::util;

use self::{score::ScoreArg, simulate::SimulateArg, template::TemplateArg};

mod score;
mod simulate;
mod template;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Score a recorded round
    Score(#[clap(flatten)] ScoreArg),
    /// Write the default table template
    Template(#[clap(flatten)] TemplateArg),
    /// Score synthetic drawings to calibrate scoring constants
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Score(arg) => score::run(&arg)?,
        Mode::Template(arg) => template::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display,
)]
pub(crate) enum EvaluatorKind {
    #[default]
    #[display("coverage")]
    Coverage,
    #[display("proximity")]
    Proximity,
}

impl EvaluatorKind {
    fn build(self, template: &Template, config: ScoringConfig) -> Box<dyn RoundEvaluator> {
        match self {
            EvaluatorKind::Coverage => Box::new(CoverageScorer::new(template, config)),
            EvaluatorKind::Proximity => Box::new(ProximityEvaluator::new(template.clone())),
        }
    }
}

/// Scoring constants, layered as defaults < config file < command-line flags.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScoringArgs {
    /// JSON file with scoring constants (missing fields keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Half-width in pixels of the window around each template point
    #[arg(long)]
    tolerance: Option<i32>,
    /// Pixel budget per template point
    #[arg(long)]
    pixels_per_unit: Option<u32>,
    /// Weight of the excess percentage subtracted from coverage
    #[arg(long)]
    excess_weight: Option<f64>,
}

impl ScoringArgs {
    fn resolve(&self) -> anyhow::Result<ScoringConfig> {
        let mut config = match &self.config {
            Some(path) => util::load_json("scoring config", path)?,
            None => ScoringConfig::default(),
        };
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(pixels) = self.pixels_per_unit {
            config.pixels_per_template_unit = pixels;
        }
        if let Some(weight) = self.excess_weight {
            config.excess_penalty_weight = weight;
        }
        config
            .validate()
            .context("Invalid scoring configuration")?;
        tracing::debug!(?config, "resolved scoring configuration");
        Ok(config)
    }
}
