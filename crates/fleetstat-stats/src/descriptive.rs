/// Error returned when statistics are requested over a sample with no values.
///
/// Statistics of an empty sample are never synthesized as zero or NaN; callers
/// must surface this as a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("sample contains no valid numeric values")]
pub struct EmptySampleError;

/// Descriptive statistics summarizing a sample.
///
/// This structure contains common measures of central tendency and dispersion
/// for a sample of finite `f64` values. Variance and standard deviation are
/// population measures (divided by `n`, not `n - 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The number of values in the sample.
    pub count: usize,
    /// The minimum value in the sample.
    pub min: f64,
    /// The maximum value in the sample.
    pub max: f64,
    /// The arithmetic mean of the sample.
    pub mean: f64,
    /// The nearest-rank median (value at index `floor(n / 2)` of the sorted sample).
    pub median: f64,
    /// The population variance of the sample.
    pub variance: f64,
    /// The population standard deviation of the sample.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySampleError`] if `values` yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fleetstat_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    pub fn new<I>(values: I) -> Result<Self, EmptySampleError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// Use this when the sample is already sorted to avoid unnecessary work.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySampleError`] if `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fleetstat_stats::descriptive::DescriptiveStats;
    /// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    /// let stats = DescriptiveStats::from_sorted(&values).unwrap();
    /// assert_eq!(stats.mean, 5.5);
    /// assert!((stats.std_dev - 2.8723).abs() < 1e-4);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn from_sorted(sorted_values: &[f64]) -> Result<Self, EmptySampleError> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Err(EmptySampleError);
        };
        let count = sorted_values.len();
        let median = sorted_values[count / 2];
        // Summing identical values can still round away from them.
        if min.total_cmp(&max).is_eq() {
            return Ok(Self {
                count,
                min,
                max,
                mean: min,
                median,
                variance: 0.0,
                std_dev: 0.0,
            });
        }

        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();

        Ok(Self {
            count,
            min,
            max,
            mean,
            median,
            variance,
            std_dev,
        })
    }

    /// Returns `true` when every value in the sample is identical.
    ///
    /// A degenerate sample has no spread, so z-scores against it are undefined.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.std_dev <= 0.0
    }
}
