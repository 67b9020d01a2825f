//! JSON reports for analysis results
//!
//! Reports copy results at full precision and round only when serialized:
//! two decimals for statistics and money, four for probabilities and shares.

use chrono::{DateTime, Utc};
use fleetstat_cluster::{ClusterOutcome, ClusterSeed};
use fleetstat_stats::frequency::Bin;
use serde::Serialize;

use crate::{
    analysis::{ClusterAnalysis, FullAnalysis, NumericAnalysis},
    categorical::CategoricalDistribution,
    overview::Overview,
    years::{YearCount, YearDistribution},
};

/// Envelope shared by every report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<T> {
    pub generated_at: DateTime<Utc>,
    /// Number of records the report was computed from.
    pub records: usize,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Report<T> {
    /// Wraps `body`, stamped with the current time.
    #[must_use]
    pub fn new(records: usize, body: T) -> Self {
        Self {
            generated_at: Utc::now(),
            records,
            body,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub attribute: String,
    pub dropped: usize,
    pub summary: SummaryReport,
    pub points: Vec<EdfPointReport>,
    pub interpretation: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub count: usize,
    #[serde(serialize_with = "round::two")]
    pub mean: f64,
    #[serde(serialize_with = "round::two")]
    pub std_dev: f64,
    #[serde(serialize_with = "round::two")]
    pub variance: f64,
    #[serde(serialize_with = "round::two")]
    pub min: f64,
    #[serde(serialize_with = "round::two")]
    pub median: f64,
    #[serde(serialize_with = "round::two")]
    pub max: f64,
    pub percentiles: Vec<PercentileReport>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PercentileReport {
    #[serde(serialize_with = "round::four")]
    pub level: f64,
    #[serde(serialize_with = "round::two")]
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EdfPointReport {
    #[serde(serialize_with = "round::two")]
    pub x: f64,
    #[serde(serialize_with = "round::four")]
    pub edf: f64,
    #[serde(serialize_with = "round::four")]
    pub cdf: f64,
}

impl From<&NumericAnalysis> for StatisticsReport {
    fn from(numeric: &NumericAnalysis) -> Self {
        let summary = &numeric.analysis.summary;
        let stats = &summary.stats;
        Self {
            attribute: numeric.attribute.clone(),
            dropped: numeric.dropped,
            summary: SummaryReport {
                count: stats.count,
                mean: stats.mean,
                std_dev: stats.std_dev,
                variance: stats.variance,
                min: stats.min,
                median: stats.median,
                max: stats.max,
                percentiles: summary
                    .percentiles
                    .iter()
                    .map(|(level, value)| PercentileReport { level, value })
                    .collect(),
            },
            points: numeric
                .analysis
                .distribution
                .points()
                .iter()
                .map(|p| EdfPointReport {
                    x: p.x,
                    edf: p.edf,
                    cdf: p.cdf,
                })
                .collect(),
            interpretation: numeric.interpretation(),
        }
    }
}

/// One ranked category and its share of the grand total.
#[derive(Debug, Clone, Serialize)]
pub struct BinReport {
    pub label: String,
    pub count: usize,
    #[serde(serialize_with = "round::four")]
    pub share: f64,
}

impl BinReport {
    fn from_bins(bins: &[Bin<String>], total: usize) -> Vec<Self> {
        bins.iter()
            .map(|bin| Self {
                label: bin.label.clone(),
                count: bin.count,
                share: share(bin.count, total),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub attribute: String,
    pub total: usize,
    pub distinct: usize,
    pub bins: Vec<BinReport>,
}

impl From<&CategoricalDistribution> for CategoryReport {
    fn from(dist: &CategoricalDistribution) -> Self {
        Self {
            attribute: dist.attribute.clone(),
            total: dist.total,
            distinct: dist.distinct,
            bins: BinReport::from_bins(&dist.bins, dist.total),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterReport {
    pub features: Vec<String>,
    pub k: usize,
    pub seed: ClusterSeed,
    pub standardized: bool,
    pub outcome: ClusterOutcome,
    pub iterations: usize,
    /// Within-cluster sum of squares, in the units clustering ran in.
    #[serde(serialize_with = "round::two")]
    pub inertia: f64,
    pub duplicate_centroids: bool,
    pub vectors: usize,
    pub skipped: usize,
    pub clusters: Vec<ClusterSummaryReport>,
    pub assignments: Vec<AssignmentReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummaryReport {
    pub cluster: usize,
    #[serde(serialize_with = "round::two_all")]
    pub centroid: Vec<f64>,
    pub count: usize,
    #[serde(serialize_with = "round::four")]
    pub share: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentReport {
    pub record_index: usize,
    pub cluster: usize,
}

impl From<&ClusterAnalysis> for ClusterReport {
    fn from(analysis: &ClusterAnalysis) -> Self {
        let clustering = &analysis.clustering;
        let vectors = analysis.matrix.len();
        Self {
            features: analysis.matrix.attributes().to_vec(),
            k: clustering.k(),
            seed: analysis.seed,
            standardized: analysis.scaler.is_some(),
            outcome: clustering.outcome(),
            iterations: clustering.iterations(),
            inertia: clustering.inertia(),
            duplicate_centroids: clustering.duplicate_centroids(),
            vectors,
            skipped: analysis.skipped,
            clusters: analysis
                .centroids()
                .into_iter()
                .zip(clustering.counts())
                .enumerate()
                .map(|(cluster, (centroid, &count))| ClusterSummaryReport {
                    cluster,
                    centroid,
                    count,
                    share: share(count, vectors),
                })
                .collect(),
            assignments: analysis
                .record_assignments()
                .map(|(record_index, cluster)| AssignmentReport {
                    record_index,
                    cluster,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearReport {
    pub from: i64,
    pub to: i64,
    pub counts: Vec<YearCount>,
    pub first_year: Option<i64>,
    pub last_year: Option<i64>,
    pub total: usize,
    #[serde(serialize_with = "round::two_opt")]
    pub mean_per_year: Option<f64>,
    pub out_of_window: usize,
    pub dropped: usize,
}

impl From<&YearDistribution> for YearReport {
    fn from(dist: &YearDistribution) -> Self {
        Self {
            from: *dist.window.start(),
            to: *dist.window.end(),
            counts: dist.counts.clone(),
            first_year: dist.first_year(),
            last_year: dist.last_year(),
            total: dist.total(),
            mean_per_year: dist.mean_per_year(),
            out_of_window: dist.out_of_window,
            dropped: dist.dropped,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewReport {
    pub money_attribute: String,
    #[serde(serialize_with = "round::two_opt")]
    pub mean_money: Option<f64>,
    pub category_attribute: String,
    pub distinct_categories: usize,
    pub top_categories: Vec<BinReport>,
}

impl From<&Overview> for OverviewReport {
    fn from(overview: &Overview) -> Self {
        Self {
            money_attribute: overview.money_attribute.clone(),
            mean_money: overview.mean_money,
            category_attribute: overview.category_attribute.clone(),
            distinct_categories: overview.distinct_categories,
            top_categories: BinReport::from_bins(&overview.top_categories, overview.total_records),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FullReport {
    pub statistics: StatisticsReport,
    pub categories: CategoryReport,
    pub clusters: ClusterReport,
    pub years: YearReport,
}

impl From<&FullAnalysis> for FullReport {
    fn from(full: &FullAnalysis) -> Self {
        Self {
            statistics: (&full.statistics).into(),
            categories: (&full.categories).into(),
            clusters: (&full.clusters).into(),
            years: (&full.years).into(),
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

mod round {
    use serde::{Serialize as _, Serializer};

    pub(super) fn places(x: f64, places: i32) -> f64 {
        let scale = 10_f64.powi(places);
        (x * scale).round() / scale
    }

    #[expect(clippy::trivially_copy_pass_by_ref)]
    pub(super) fn two<S>(x: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(places(*x, 2))
    }

    #[expect(clippy::trivially_copy_pass_by_ref)]
    pub(super) fn four<S>(x: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(places(*x, 4))
    }

    #[expect(clippy::ref_option)]
    pub(super) fn two_opt<S>(x: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        x.map(|x| places(x, 2)).serialize(serializer)
    }

    pub(super) fn two_all<S>(xs: &[f64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(xs.iter().map(|&x| places(x, 2)))
    }
}
