use crate::descriptive::EmptySampleError;

/// Precomputed percentile values for a sample.
///
/// Percentile levels are fractions in `0.0..=1.0` (so the 80th percentile is
/// `0.8`). Values are looked up with the nearest-rank method described in
/// [`percentile_index`].
///
/// # Examples
///
/// ```
/// use fleetstat_stats::percentiles::Percentiles;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let percentiles = Percentiles::from_sorted(&values, &[0.25, 0.5, 0.8]).unwrap();
///
/// assert_eq!(percentiles.get(0.5), Some(6.0));
/// assert_eq!(percentiles.get(0.8), Some(9.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles {
    /// `(level, value)` pairs in the order the levels were requested.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from sorted values.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySampleError`] if `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    pub fn from_sorted(
        sorted_values: &[f64],
        levels: &[f64],
    ) -> Result<Self, EmptySampleError> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        if sorted_values.is_empty() {
            return Err(EmptySampleError);
        }
        let values = levels
            .iter()
            .map(|&level| {
                let idx = percentile_index(sorted_values.len(), level);
                (level, sorted_values[idx])
            })
            .collect();
        Ok(Self { values })
    }

    /// Computes percentiles from unsorted values.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySampleError`] if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetstat_stats::percentiles::Percentiles;
    ///
    /// let percentiles = Percentiles::new(&[5.0, 2.0, 8.0, 1.0, 9.0], &[0.0, 1.0]).unwrap();
    /// assert_eq!(percentiles.get(0.0), Some(1.0));
    /// assert_eq!(percentiles.get(1.0), Some(9.0));
    /// ```
    pub fn new(values: &[f64], levels: &[f64]) -> Result<Self, EmptySampleError> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, levels)
    }

    /// Gets the value at a specific percentile level.
    ///
    /// Returns `None` if the level was not precomputed.
    #[must_use]
    pub fn get(&self, level: f64) -> Option<f64> {
        self.values
            .iter()
            .find(|(l, _)| (*l - level).abs() < f64::EPSILON)
            .map(|(_, value)| *value)
    }

    /// Returns an iterator over all `(level, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }

    /// Returns all `(level, value)` pairs as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.values
    }
}

/// Returns the index read by the nearest-rank percentile `level` in a sorted
/// sample of `len` values.
///
/// The index is `floor(len * level)`, clamped to `0..=len - 1`. Without the
/// clamp, `level == 1.0` would address one past the last element. Levels
/// below zero clamp to the first element.
///
/// # Panics
///
/// Panics if `len` is zero.
///
/// # Examples
///
/// ```
/// use fleetstat_stats::percentiles::percentile_index;
///
/// assert_eq!(percentile_index(10, 0.8), 8);
/// assert_eq!(percentile_index(10, 1.0), 9);
/// assert_eq!(percentile_index(10, 0.0), 0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn percentile_index(len: usize, level: f64) -> usize {
    assert!(len > 0, "percentile of an empty sample");
    // float-to-int casts saturate: negative and NaN levels become 0
    let idx = (len as f64 * level).floor() as usize;
    idx.min(len - 1)
}

/// Computes a single nearest-rank percentile from sorted data.
///
/// Returns `None` if `sorted_values` is empty. The result always lies
/// between the sample minimum and maximum, and is non-decreasing in `level`.
///
/// # Examples
///
/// ```
/// use fleetstat_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&values, 0.5), Some(3.0));
/// assert_eq!(compute_percentile(&values, 0.25), Some(2.0));
/// assert_eq!(compute_percentile(&[], 0.5), None);
/// ```
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], level: f64) -> Option<f64> {
    if sorted_values.is_empty() {
        return None;
    }
    Some(sorted_values[percentile_index(sorted_values.len(), level)])
}
