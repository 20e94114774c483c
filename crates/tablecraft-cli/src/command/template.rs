use std::path::PathBuf;

use tablecraft_core::TableTemplate;

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TemplateArg {
    /// Write the template as JSON instead of `x,y` lines
    #[arg(long)]
    json: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TemplateArg) -> anyhow::Result<()> {
    let template = TableTemplate::default().build();
    tracing::info!(points = template.size(), "generated table template");
    util::write_report(&template, arg.json, arg.output.as_deref())
}
