use std::num::NonZeroUsize;

use fleetstat_dataset::{
    overview::Overview,
    report::{OverviewReport, Report},
};

use crate::util::InputOutputArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct OverviewArg {
    #[clap(flatten)]
    io: InputOutputArg,
    /// Money attribute to average
    #[arg(long, default_value = "Price")]
    money: String,
    /// Categorical attribute to count
    #[arg(long, default_value = "Brand")]
    category: String,
    /// Number of categories to list
    #[arg(long, default_value = "10")]
    top_n: NonZeroUsize,
}

pub(crate) fn run(arg: &OverviewArg) -> anyhow::Result<()> {
    let records = arg.io.read_records()?;
    let overview = Overview::from_records(&records, &arg.money, &arg.category, arg.top_n.get());
    if overview.mean_money.is_none() {
        tracing::warn!(attribute = %arg.money, "no usable values to average");
    }
    arg.io
        .save_json(&Report::new(records.len(), OverviewReport::from(&overview)))
}
