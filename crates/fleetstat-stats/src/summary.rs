use crate::{
    descriptive::{DescriptiveStats, EmptySampleError},
    edf::EmpiricalDistribution,
    percentiles::Percentiles,
};

/// Default percentile levels reported for a numeric attribute.
pub const DEFAULT_PERCENTILE_LEVELS: [f64; 5] = [0.25, 0.5, 0.75, 0.8, 0.9];

/// Distribution summary of a sample.
///
/// Combines descriptive statistics with nearest-rank percentiles. Every
/// percentile lies within `stats.min..=stats.max`, and `stats.count` equals
/// the sample size.
///
/// # Examples
///
/// ```
/// use fleetstat_stats::summary::DistributionSummary;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let summary = DistributionSummary::new(values, &[0.5, 0.8]).unwrap();
///
/// assert_eq!(summary.stats.mean, 5.5);
/// assert_eq!(summary.percentiles.get(0.8), Some(9.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSummary {
    /// Basic descriptive statistics for the sample.
    pub stats: DescriptiveStats,
    /// Precomputed percentile values for quick lookup.
    pub percentiles: Percentiles,
}

impl DistributionSummary {
    /// Computes the summary from unsorted values.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySampleError`] if `values` yields nothing.
    pub fn new<I>(values: I, levels: &[f64]) -> Result<Self, EmptySampleError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, levels)
    }

    /// Computes the summary from pre-sorted values.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySampleError`] if `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    pub fn from_sorted(sorted_values: &[f64], levels: &[f64]) -> Result<Self, EmptySampleError> {
        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        let percentiles = Percentiles::from_sorted(sorted_values, levels)?;
        Ok(Self { stats, percentiles })
    }
}

/// Summary and empirical distribution of one sample, computed together so
/// the Gaussian model and the summary share the same mean and deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionAnalysis {
    /// Count, moments, extremes, and percentiles.
    pub summary: DistributionSummary,
    /// EDF and Gaussian CDF, one point per value.
    pub distribution: EmpiricalDistribution,
}

impl DistributionAnalysis {
    /// Analyzes unsorted values.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySampleError`] if `values` yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetstat_stats::summary::DistributionAnalysis;
    ///
    /// let analysis = DistributionAnalysis::new([2.0, 1.0, 3.0], &[0.5]).unwrap();
    /// assert_eq!(analysis.summary.stats.count, analysis.distribution.len());
    /// ```
    pub fn new<I>(values: I, levels: &[f64]) -> Result<Self, EmptySampleError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        let summary = DistributionSummary::from_sorted(&sorted, levels)?;
        let distribution = EmpiricalDistribution::with_stats(&sorted, &summary.stats);
        Ok(Self {
            summary,
            distribution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_to_ten_scenario() {
        let summary =
            DistributionSummary::new((1..=10).map(f64::from), &DEFAULT_PERCENTILE_LEVELS).unwrap();
        assert_eq!(summary.stats.count, 10);
        assert!((summary.stats.mean - 5.5).abs() < 1e-12);
        assert!((summary.stats.std_dev - 2.8723).abs() < 1e-4);
        assert_eq!(summary.percentiles.get(0.8), Some(9.0));
    }

    #[test]
    fn test_percentiles_within_bounds() {
        let values = [12.5, -4.0, 33.0, 7.0, 7.0, 19.25, 0.0];
        let levels = [0.0, 0.1, 0.33, 0.5, 0.66, 0.99, 1.0];
        let summary = DistributionSummary::new(values, &levels).unwrap();
        let mut prev = f64::NEG_INFINITY;
        for (_, value) in summary.percentiles.iter() {
            assert!(summary.stats.min <= value && value <= summary.stats.max);
            assert!(value >= prev);
            prev = value;
        }
    }

    #[test]
    fn test_empty_sample() {
        assert_eq!(
            DistributionSummary::new(Vec::new(), &DEFAULT_PERCENTILE_LEVELS),
            Err(EmptySampleError)
        );
        assert_eq!(
            DistributionAnalysis::new(Vec::new(), &DEFAULT_PERCENTILE_LEVELS),
            Err(EmptySampleError)
        );
    }

    #[test]
    fn test_analysis_shares_moments() {
        let analysis = DistributionAnalysis::new([10.0, 20.0, 30.0, 40.0], &[0.5]).unwrap();
        assert!((analysis.distribution.mean() - analysis.summary.stats.mean).abs() < f64::EPSILON);
        assert!(
            (analysis.distribution.std_dev() - analysis.summary.stats.std_dev).abs()
                < f64::EPSILON
        );
    }
}
