use std::num::NonZeroUsize;

use anyhow::Context;
use fleetstat_cluster::ClusterSeed;
use fleetstat_dataset::{
    analysis,
    features::FeatureSpec,
    report::{ClusterReport, Report},
};
use rand::Rng as _;

use crate::util::InputOutputArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClusterArg {
    #[clap(flatten)]
    io: InputOutputArg,
    /// Numeric attribute used as a feature (repeatable)
    #[arg(long = "feature", value_name = "ATTRIBUTE", default_value = "Year")]
    features: Vec<String>,
    /// Number of clusters
    #[arg(long, default_value = "4")]
    k: NonZeroUsize,
    /// Seed for centroid initialization, as up to 16 hex digits
    #[arg(long)]
    seed: Option<ClusterSeed>,
    /// Scale features to zero mean and unit deviation before clustering
    #[arg(long)]
    standardize: bool,
}

pub(crate) fn run(arg: &ClusterArg) -> anyhow::Result<()> {
    let records = arg.io.read_records()?;
    let seed = arg.seed.unwrap_or_else(|| {
        let seed: ClusterSeed = rand::rng().random();
        tracing::info!(%seed, "drew random seed; pass --seed to reproduce");
        seed
    });
    let specs = arg.features.iter().map(FeatureSpec::new).collect::<Vec<_>>();
    let result = analysis::cluster_records(&records, &specs, arg.k.get(), seed, arg.standardize)
        .with_context(|| format!("Failed to cluster records on {}", arg.features.join(", ")))?;
    arg.io
        .save_json(&Report::new(records.len(), ClusterReport::from(&result)))
}
