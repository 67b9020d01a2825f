use std::num::NonZeroUsize;

use fleetstat_dataset::{
    categorical,
    report::{CategoryReport, Report},
};

use crate::util::InputOutputArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TopArg {
    #[clap(flatten)]
    io: InputOutputArg,
    /// Categorical attribute to rank
    #[arg(long, default_value = "Brand")]
    attribute: String,
    /// Number of categories to keep
    #[arg(long, default_value = "5")]
    top_n: NonZeroUsize,
}

pub(crate) fn run(arg: &TopArg) -> anyhow::Result<()> {
    let records = arg.io.read_records()?;
    let dist = categorical::bin_categorical(&records, &arg.attribute, arg.top_n.get());
    tracing::info!(
        attribute = %arg.attribute,
        distinct = dist.distinct,
        total = dist.total,
        "ranked categories"
    );
    arg.io
        .save_json(&Report::new(records.len(), CategoryReport::from(&dist)))
}
