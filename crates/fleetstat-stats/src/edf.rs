//! Empirical distribution function and the matching Gaussian model.
//!
//! For a sample of `n` values sorted ascending, the point at rank `i`
//! (1-indexed) has `edf = i / n`, so the final point is exactly `1.0`. Each
//! point also carries `cdf`, the normal CDF evaluated at the same `x` using the
//! sample's mean and population standard deviation.
//!
//! # Examples
//!
//! ```
//! use fleetstat_stats::edf::EmpiricalDistribution;
//!
//! let dist = EmpiricalDistribution::new([3.0, 1.0, 2.0, 4.0]).unwrap();
//! let edf = dist.points().iter().map(|p| p.edf).collect::<Vec<_>>();
//! assert_eq!(edf, [0.25, 0.5, 0.75, 1.0]);
//! ```

use std::cmp::Ordering;

use crate::{
    descriptive::{DescriptiveStats, EmptySampleError},
    percentiles,
};

const ERF_P: f64 = 0.327_591_1;
const ERF_A1: f64 = 0.254_829_592;
const ERF_A2: f64 = -0.284_496_736;
const ERF_A3: f64 = 1.421_413_741;
const ERF_A4: f64 = -1.453_152_027;
const ERF_A5: f64 = 1.061_405_429;

/// Approximates the error function.
///
/// Uses the Abramowitz-Stegun rational approximation 7.1.26, whose maximum
/// absolute error is about `1.5e-7`. The result is odd by construction and
/// `erf(0.0)` is exactly zero.
///
/// # Examples
///
/// ```
/// use fleetstat_stats::edf::erf;
///
/// assert_eq!(erf(0.0), 0.0);
/// assert!((erf(1.0) - 0.842_700_79).abs() < 2e-7);
/// assert_eq!(erf(-0.5), -erf(0.5));
/// ```
#[must_use]
pub fn erf(x: f64) -> f64 {
    let sign = match x.partial_cmp(&0.0) {
        Some(Ordering::Greater) => 1.0,
        Some(Ordering::Less) => -1.0,
        // zero (of either sign) and NaN pass through unchanged
        _ => return x,
    };
    let x = x.abs();
    let t = 1.0 / (1.0 + ERF_P * x);
    let poly = ((((ERF_A5 * t + ERF_A4) * t + ERF_A3) * t + ERF_A2) * t + ERF_A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Evaluates the normal CDF with the given mean and standard deviation at `x`.
///
/// A non-positive `std_dev` describes a degenerate distribution with all mass
/// at `mean`; the CDF is then a step: `1.0` for `x >= mean`, `0.0` otherwise.
///
/// # Examples
///
/// ```
/// use fleetstat_stats::edf::normal_cdf;
///
/// assert!((normal_cdf(5.0, 5.0, 2.0) - 0.5).abs() < 1e-9);
/// assert_eq!(normal_cdf(4.0, 5.0, 0.0), 0.0);
/// assert_eq!(normal_cdf(5.0, 5.0, 0.0), 1.0);
/// ```
#[must_use]
pub fn normal_cdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev > 0.0 {
        let z = (x - mean) / (std_dev * std::f64::consts::SQRT_2);
        (0.5 * (1.0 + erf(z))).clamp(0.0, 1.0)
    } else if x >= mean {
        1.0
    } else {
        0.0
    }
}

/// A single point of the empirical distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdfPoint {
    /// The sample value.
    pub x: f64,
    /// Fraction of the sample at ranks up to and including this point.
    pub edf: f64,
    /// Gaussian-model CDF at `x`.
    pub cdf: f64,
}

/// Empirical distribution of a sample, point-aligned with its Gaussian model.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalDistribution {
    points: Vec<EdfPoint>,
    mean: f64,
    std_dev: f64,
}

impl EmpiricalDistribution {
    /// Builds the distribution from unsorted values.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySampleError`] if `values` yields nothing.
    pub fn new<I>(values: I) -> Result<Self, EmptySampleError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Builds the distribution from pre-sorted values.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySampleError`] if `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    pub fn from_sorted(sorted_values: &[f64]) -> Result<Self, EmptySampleError> {
        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        Ok(Self::with_stats(sorted_values, &stats))
    }

    /// Builds the distribution from pre-sorted values whose statistics are
    /// already known, so the Gaussian model shares them exactly.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted, or if `stats.count` does not
    /// match its length.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn with_stats(sorted_values: &[f64], stats: &DescriptiveStats) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        assert_eq!(
            sorted_values.len(),
            stats.count,
            "statistics must describe the same sample"
        );

        let n = sorted_values.len() as f64;
        let points = sorted_values
            .iter()
            .enumerate()
            .map(|(i, &x)| EdfPoint {
                x,
                edf: (i + 1) as f64 / n,
                cdf: normal_cdf(x, stats.mean, stats.std_dev),
            })
            .collect();
        Self {
            points,
            mean: stats.mean,
            std_dev: stats.std_dev,
        }
    }

    /// Returns the points in ascending `x` order.
    #[must_use]
    pub fn points(&self) -> &[EdfPoint] {
        &self.points
    }

    /// Returns the number of points (equal to the sample size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; an empty sample cannot produce a distribution.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean used by the Gaussian model.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation used by the Gaussian model.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Returns `true` when the Gaussian model collapsed to a step function.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.std_dev <= 0.0
    }

    /// Returns the point at index `floor(n * fraction)`, clamped to the last
    /// point, using the same convention as nearest-rank percentiles.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetstat_stats::edf::EmpiricalDistribution;
    ///
    /// let dist = EmpiricalDistribution::new((1..=10).map(f64::from)).unwrap();
    /// assert_eq!(dist.point_at_fraction(0.8).x, 9.0);
    /// assert_eq!(dist.point_at_fraction(1.0).x, 10.0);
    /// ```
    #[must_use]
    pub fn point_at_fraction(&self, fraction: f64) -> &EdfPoint {
        &self.points[percentiles::percentile_index(self.points.len(), fraction)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERF_TOLERANCE: f64 = 2e-7;

    mod erf_approximation {
        use super::*;

        #[test]
        fn test_zero_is_exact() {
            assert!(erf(0.0).abs() < f64::MIN_POSITIVE);
            assert!(erf(-0.0).abs() < f64::MIN_POSITIVE);
        }

        #[test]
        fn test_odd_symmetry() {
            for step in 1..=60 {
                let x = f64::from(step) * 0.1;
                assert!((erf(-x) + erf(x)).abs() <= ERF_TOLERANCE, "x = {x}");
            }
        }

        #[test]
        fn test_known_values() {
            let expected = [
                (0.5, 0.520_499_877_8),
                (1.0, 0.842_700_792_9),
                (2.0, 0.995_322_265_0),
                (3.0, 0.999_977_909_5),
            ];
            for (x, want) in expected {
                assert!((erf(x) - want).abs() <= ERF_TOLERANCE, "erf({x})");
            }
        }

        #[test]
        fn test_saturates_within_unit_interval() {
            assert!((erf(10.0) - 1.0).abs() <= ERF_TOLERANCE);
            assert!((erf(-10.0) + 1.0).abs() <= ERF_TOLERANCE);
        }

        #[test]
        fn test_nan_propagates() {
            assert!(erf(f64::NAN).is_nan());
        }
    }

    mod gaussian_cdf {
        use super::*;

        #[test]
        fn test_mean_is_half() {
            assert!((normal_cdf(10.0, 10.0, 3.0) - 0.5).abs() < 1e-9);
        }

        #[test]
        fn test_one_sigma() {
            let cdf = normal_cdf(1.0, 0.0, 1.0);
            assert!((cdf - 0.841_344_746).abs() < 1e-6);
        }

        #[test]
        fn test_degenerate_step() {
            assert!(normal_cdf(2.999, 3.0, 0.0).abs() < f64::EPSILON);
            assert!((normal_cdf(3.0, 3.0, 0.0) - 1.0).abs() < f64::EPSILON);
            assert!((normal_cdf(3.001, 3.0, 0.0) - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_empty_sample_is_an_error() {
        assert_eq!(
            EmpiricalDistribution::new(Vec::new()),
            Err(EmptySampleError)
        );
    }

    #[test]
    fn test_edf_is_non_decreasing_and_ends_at_one() {
        let samples: [&[f64]; 4] = [
            &[1.0],
            &[5.0, 5.0, 5.0],
            &[10.0, -2.0, 7.5, 7.5, 3.0, 1e6],
            &[0.3, 0.1, 0.2],
        ];
        for sample in samples {
            let dist = EmpiricalDistribution::new(sample.iter().copied()).unwrap();
            assert_eq!(dist.len(), sample.len());
            assert!(dist.points().is_sorted_by(|a, b| a.edf <= b.edf && a.x <= b.x));
            assert_eq!(dist.points().last().map(|p| p.edf), Some(1.0));
        }
    }

    #[test]
    fn test_cdf_uses_sample_mean_and_std_dev() {
        let dist = EmpiricalDistribution::new((1..=10).map(f64::from)).unwrap();
        let stats = DescriptiveStats::new((1..=10).map(f64::from)).unwrap();
        assert!((dist.mean() - stats.mean).abs() < f64::EPSILON);
        assert!((dist.std_dev() - stats.std_dev).abs() < f64::EPSILON);
        for point in dist.points() {
            assert!((0.0..=1.0).contains(&point.cdf));
            let want = normal_cdf(point.x, stats.mean, stats.std_dev);
            assert!((point.cdf - want).abs() < f64::EPSILON);
        }
        // values symmetric around the mean get complementary CDFs
        let first = dist.points()[0].cdf;
        let last = dist.points()[9].cdf;
        assert!((first + last - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_identical_values_use_step_cdf() {
        let dist = EmpiricalDistribution::new([4.0; 5]).unwrap();
        assert!(dist.is_degenerate());
        assert!(dist.points().iter().all(|p| (p.cdf - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_repeated_inexact_values_use_step_cdf() {
        for (value, len) in [(0.1, 3), (0.3, 10), (0.7, 7), (1.1, 7), (19_999.99, 10)] {
            let dist = EmpiricalDistribution::new(vec![value; len]).unwrap();
            assert!(dist.is_degenerate(), "{value} x {len}");
            for point in dist.points() {
                assert_eq!(point.cdf.to_bits(), 1.0_f64.to_bits(), "{value} x {len}");
            }
        }
    }

    #[test]
    fn test_point_at_fraction_clamps() {
        let dist = EmpiricalDistribution::new([2.0, 1.0]).unwrap();
        assert!((dist.point_at_fraction(0.0).x - 1.0).abs() < f64::EPSILON);
        assert!((dist.point_at_fraction(0.8).x - 2.0).abs() < f64::EPSILON);
        assert!((dist.point_at_fraction(1.0).x - 2.0).abs() < f64::EPSILON);
    }
}
