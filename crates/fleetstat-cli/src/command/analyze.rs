use std::path::PathBuf;

use anyhow::Context;
use fleetstat_cluster::ClusterSeed;
use fleetstat_dataset::{
    analysis,
    params::AnalysisParams,
    report::{FullReport, Report},
};

use crate::util::{self, InputOutputArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    #[clap(flatten)]
    io: InputOutputArg,
    /// JSON file with analysis parameters; flags below override its values
    #[arg(long)]
    params: Option<PathBuf>,
    /// Numeric attribute to summarize
    #[arg(long)]
    attribute: Option<String>,
    /// Percentile level between 0.0 and 1.0 (repeatable)
    #[arg(long = "percentile", value_name = "LEVEL")]
    percentiles: Vec<f64>,
    /// Categorical attribute to rank
    #[arg(long)]
    category: Option<String>,
    /// Number of categories to keep
    #[arg(long, allow_negative_numbers = true)]
    top_n: Option<i64>,
    /// Number of clusters
    #[arg(long, allow_negative_numbers = true)]
    k: Option<i64>,
    /// Numeric attribute used as a clustering feature (repeatable)
    #[arg(long = "feature", value_name = "ATTRIBUTE")]
    features: Vec<String>,
    /// Seed for centroid initialization, as up to 16 hex digits
    #[arg(long)]
    seed: Option<ClusterSeed>,
    /// Scale features before clustering
    #[arg(long)]
    standardize: bool,
}

impl AnalyzeArg {
    fn load_params(&self) -> anyhow::Result<AnalysisParams> {
        let mut params = match &self.params {
            Some(path) => util::read_params_file(path)?,
            None => AnalysisParams::default(),
        };
        self.apply_overrides(&mut params);
        Ok(params)
    }

    fn apply_overrides(&self, params: &mut AnalysisParams) {
        if let Some(attribute) = &self.attribute {
            params.attribute.clone_from(attribute);
        }
        if !self.percentiles.is_empty() {
            params.percentile_levels.clone_from(&self.percentiles);
        }
        if let Some(category) = &self.category {
            params.category.clone_from(category);
        }
        if let Some(top_n) = self.top_n {
            params.top_n = top_n;
        }
        if let Some(k) = self.k {
            params.k = k;
        }
        if !self.features.is_empty() {
            params.features.clone_from(&self.features);
        }
        if self.seed.is_some() {
            params.seed = self.seed;
        }
        if self.standardize {
            params.standardize = true;
        }
    }
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let params = arg.load_params()?;
    tracing::debug!(?params, "resolved analysis parameters");
    let records = arg.io.read_records()?;
    let full = analysis::analyze(&records, &params, &mut rand::rng()).context("Analysis failed")?;
    if params.seed.is_none() {
        tracing::info!(seed = %full.clusters.seed, "drew random seed; pass --seed to reproduce");
    }
    tracing::info!("{}", full.statistics.interpretation());
    arg.io
        .save_json(&Report::new(records.len(), FullReport::from(&full)))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[clap(flatten)]
        arg: AnalyzeArg,
    }

    fn parse(args: &[&str]) -> AnalyzeArg {
        Cli::try_parse_from(["analyze", "-i", "records.json"].iter().chain(args))
            .unwrap()
            .arg
    }

    #[test]
    fn test_no_flags_keep_params() {
        let params = AnalysisParams {
            attribute: "Kilometres".to_owned(),
            k: 7,
            ..AnalysisParams::default()
        };
        let mut resolved = params.clone();
        parse(&[]).apply_overrides(&mut resolved);
        assert_eq!(resolved, params);
    }

    #[test]
    fn test_flags_override_params() {
        let arg = parse(&[
            "--attribute",
            "Kilometres",
            "--percentile",
            "0.5",
            "--percentile",
            "0.95",
            "--k",
            "2",
            "--feature",
            "Price",
            "--seed",
            "ff",
            "--standardize",
        ]);
        let mut params = AnalysisParams::default();
        arg.apply_overrides(&mut params);
        assert_eq!(params.attribute, "Kilometres");
        assert_eq!(params.percentile_levels, [0.5, 0.95]);
        assert_eq!(params.k, 2);
        assert_eq!(params.top_n, 5);
        assert_eq!(params.features, ["Price"]);
        assert_eq!(params.seed, Some(ClusterSeed::new(255)));
        assert!(params.standardize);
        assert_eq!(params.category, "Brand");
    }

    #[test]
    fn test_negative_counts_reach_validation() {
        let arg = parse(&["--top-n", "-1"]);
        let mut params = AnalysisParams::default();
        arg.apply_overrides(&mut params);
        assert_eq!(params.top_n, -1);
        assert!(params.validate().is_err());
    }
}
