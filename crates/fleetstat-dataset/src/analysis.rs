//! Record-level analyses built from the numeric and clustering primitives
//!
//! Each entry point takes the raw record collection plus request parameters,
//! extracts what it needs, and returns a fresh result. Nothing is cached
//! between calls.

use fleetstat_cluster::{ClusterError, ClusterSeed, Clustering, KMeans, Standardizer};
use fleetstat_stats::summary::DistributionAnalysis;
use rand::Rng;

use crate::{
    categorical::{self, CategoricalDistribution},
    error::AnalysisError,
    extract::{self, YEAR_ATTRIBUTE},
    features::{FeatureMatrix, FeatureSpec},
    params::{self, AnalysisParams},
    record::Record,
    years::{DEFAULT_YEAR_WINDOW, YearDistribution},
};

/// Fraction of the sample read by [`NumericAnalysis::interpretation`].
pub const INTERPRETATION_FRACTION: f64 = 0.8;

/// Distribution of one numeric attribute across a record collection.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericAnalysis {
    /// The analyzed attribute.
    pub attribute: String,
    /// Summary, percentiles, and EDF of the extracted sample.
    pub analysis: DistributionAnalysis,
    /// Records skipped because the attribute did not extract.
    pub dropped: usize,
}

impl NumericAnalysis {
    /// Describes the value below which 80% of the sample falls.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetstat_dataset::{analysis::analyze_numeric, record::Record};
    ///
    /// let records = (2011..=2020).map(|y| Record::new().with("Year", y)).collect::<Vec<_>>();
    /// let years = analyze_numeric(&records, "Year", &[0.5])?;
    /// assert_eq!(years.interpretation(), "80% of records have a Year of 2019 or earlier");
    ///
    /// let records = (1..=10).map(|p| Record::new().with("Price", p * 100)).collect::<Vec<_>>();
    /// let prices = analyze_numeric(&records, "Price", &[0.5])?;
    /// assert_eq!(prices.interpretation(), "80% of values are below 900.00");
    /// # Ok::<(), fleetstat_dataset::AnalysisError>(())
    /// ```
    #[must_use]
    pub fn interpretation(&self) -> String {
        let x = self
            .analysis
            .distribution
            .point_at_fraction(INTERPRETATION_FRACTION)
            .x;
        if self.attribute == YEAR_ATTRIBUTE {
            format!(
                "80% of records have a {} of {} or earlier",
                self.attribute,
                x.floor()
            )
        } else {
            format!("80% of values are below {x:.2}")
        }
    }
}

/// Summarizes `attribute` over `records` at the given percentile levels.
///
/// Records without a usable value are skipped.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidParameter`] if a level is outside
/// `0.0..=1.0`, and [`AnalysisError::EmptySample`] if no record has a usable
/// value.
pub fn analyze_numeric(
    records: &[Record],
    attribute: &str,
    levels: &[f64],
) -> Result<NumericAnalysis, AnalysisError> {
    params::validate_percentile_levels(levels)?;
    let extraction = extract::extract_sample(records, attribute);
    let dropped = extraction.dropped;
    let analysis = DistributionAnalysis::new(extraction.values, levels)
        .map_err(|_| AnalysisError::empty_sample(attribute))?;

    tracing::info!(
        attribute,
        count = analysis.summary.stats.count,
        dropped,
        "analyzed numeric attribute"
    );
    if analysis.distribution.is_degenerate() {
        tracing::debug!(attribute, "all values are identical; Gaussian CDF is a step");
    }

    Ok(NumericAnalysis {
        attribute: attribute.to_owned(),
        analysis,
        dropped,
    })
}

/// A clustering run over feature vectors derived from records.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAnalysis {
    /// The clustered vectors, in unscaled units.
    pub matrix: FeatureMatrix,
    /// Records that did not produce a vector.
    pub skipped: usize,
    /// Scaling applied before clustering, if any.
    pub scaler: Option<Standardizer>,
    /// Seed that drew the initial centroids.
    pub seed: ClusterSeed,
    /// The clustering, in scaled units when `scaler` is set.
    pub clustering: Clustering,
}

impl ClusterAnalysis {
    /// Final centroids in the units of the source attributes.
    #[must_use]
    pub fn centroids(&self) -> Vec<Vec<f64>> {
        let centroids = self.clustering.centroids();
        match &self.scaler {
            Some(scaler) => centroids
                .iter()
                .map(|c| scaler.inverse_transform(c))
                .collect(),
            None => centroids.to_vec(),
        }
    }

    /// Pairs of (record index, cluster index), in record order.
    pub fn record_assignments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matrix
            .record_indices()
            .iter()
            .copied()
            .zip(self.clustering.assignments().iter().copied())
    }
}

/// Clusters `records` on the given features into `k` clusters.
///
/// # Errors
///
/// Returns [`AnalysisError::Cluster`] if `k` is zero or no record has every
/// feature.
///
/// # Examples
///
/// ```
/// use fleetstat_cluster::ClusterSeed;
/// use fleetstat_dataset::{analysis::cluster_records, features::FeatureSpec, record::Record};
///
/// let records = [1990, 1991, 2020, 2021].map(|y| Record::new().with("Year", y));
/// let result = cluster_records(&records, &[FeatureSpec::new("Year")], 2, ClusterSeed::new(7), false)?;
///
/// let a = result.clustering.assignments();
/// assert_eq!(a[0], a[1]);
/// assert_ne!(a[1], a[2]);
/// # Ok::<(), fleetstat_dataset::AnalysisError>(())
/// ```
pub fn cluster_records(
    records: &[Record],
    specs: &[FeatureSpec],
    k: usize,
    seed: ClusterSeed,
    standardize: bool,
) -> Result<ClusterAnalysis, AnalysisError> {
    let kmeans = KMeans::new(k)?;
    let matrix = FeatureMatrix::from_records(records, specs);
    if matrix.is_empty() {
        return Err(ClusterError::EmptyInput.into());
    }

    let (scaler, clustering) = if standardize {
        let scaler = Standardizer::fit(matrix.vectors())?;
        let scaled = scaler.transform_all(matrix.vectors());
        let clustering = kmeans.fit_seeded(&scaled, seed)?;
        (Some(scaler), clustering)
    } else {
        (None, kmeans.fit_seeded(matrix.vectors(), seed)?)
    };

    tracing::info!(
        k,
        %seed,
        vectors = matrix.len(),
        iterations = clustering.iterations(),
        outcome = %clustering.outcome(),
        "clustered records"
    );
    if clustering.duplicate_centroids() {
        tracing::warn!(k, %seed, "initial centroids were duplicated");
    }

    Ok(ClusterAnalysis {
        skipped: records.len() - matrix.len(),
        matrix,
        scaler,
        seed,
        clustering,
    })
}

/// Every analysis of a combined request.
#[derive(Debug, Clone, PartialEq)]
pub struct FullAnalysis {
    pub statistics: NumericAnalysis,
    pub categories: CategoricalDistribution,
    pub clusters: ClusterAnalysis,
    pub years: YearDistribution,
}

/// Runs every analysis with `params`.
///
/// When `params.seed` is unset a seed is drawn from `rng`; the seed used is
/// available as `clusters.seed`.
///
/// # Errors
///
/// Returns the first error raised by parameter validation or by any
/// individual analysis.
pub fn analyze<R>(
    records: &[Record],
    params: &AnalysisParams,
    rng: &mut R,
) -> Result<FullAnalysis, AnalysisError>
where
    R: Rng + ?Sized,
{
    params.validate()?;
    let top_n = params.checked_top_n()?;
    let k = params.checked_k()?;
    let seed = params.seed.unwrap_or_else(|| rng.random());

    tracing::info!(records = records.len(), %seed, "running full analysis");
    let statistics = analyze_numeric(records, &params.attribute, &params.percentile_levels)?;
    let categories = categorical::bin_categorical(records, &params.category, top_n);
    let clusters = cluster_records(
        records,
        &params.feature_specs(),
        k,
        seed,
        params.standardize,
    )?;
    let years = YearDistribution::from_records(records, DEFAULT_YEAR_WINDOW);

    Ok(FullAnalysis {
        statistics,
        categories,
        clusters,
        years,
    })
}
