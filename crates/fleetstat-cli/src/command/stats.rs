use anyhow::Context;
use fleetstat_dataset::{
    analysis,
    report::{Report, StatisticsReport},
};
use fleetstat_stats::summary::DEFAULT_PERCENTILE_LEVELS;

use crate::util::InputOutputArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StatsArg {
    #[clap(flatten)]
    io: InputOutputArg,
    /// Numeric attribute to summarize
    #[arg(long, default_value = "Price")]
    attribute: String,
    /// Percentile level between 0.0 and 1.0 (repeatable)
    #[arg(long = "percentile", value_name = "LEVEL", default_values_t = DEFAULT_PERCENTILE_LEVELS)]
    percentiles: Vec<f64>,
}

pub(crate) fn run(arg: &StatsArg) -> anyhow::Result<()> {
    let records = arg.io.read_records()?;
    let numeric = analysis::analyze_numeric(&records, &arg.attribute, &arg.percentiles)
        .with_context(|| format!("Failed to summarize attribute {}", arg.attribute))?;
    tracing::info!("{}", numeric.interpretation());
    arg.io
        .save_json(&Report::new(records.len(), StatisticsReport::from(&numeric)))
}
