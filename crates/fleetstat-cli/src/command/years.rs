use fleetstat_dataset::{
    report::{Report, YearReport},
    years::{DEFAULT_YEAR_WINDOW, YearDistribution},
};

use crate::util::InputOutputArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct YearsArg {
    #[clap(flatten)]
    io: InputOutputArg,
    /// First year counted
    #[arg(long, default_value_t = *DEFAULT_YEAR_WINDOW.start())]
    from: i64,
    /// Last year counted
    #[arg(long, default_value_t = *DEFAULT_YEAR_WINDOW.end())]
    to: i64,
}

pub(crate) fn run(arg: &YearsArg) -> anyhow::Result<()> {
    anyhow::ensure!(
        arg.from <= arg.to,
        "Invalid year window: {} is after {}",
        arg.from,
        arg.to
    );
    let records = arg.io.read_records()?;
    let dist = YearDistribution::from_records(&records, arg.from..=arg.to);
    if dist.out_of_window > 0 {
        tracing::info!(
            out_of_window = dist.out_of_window,
            "skipped records outside the year window"
        );
    }
    arg.io
        .save_json(&Report::new(records.len(), YearReport::from(&dist)))
}
