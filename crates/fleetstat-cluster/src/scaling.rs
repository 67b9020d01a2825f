use fleetstat_stats::descriptive::DescriptiveStats;

use crate::kmeans::ClusterError;

/// Per-dimension z-score scaling fitted on a set of feature vectors.
///
/// Features such as price and mileage differ in magnitude by orders of
/// magnitude; scaling keeps one from dominating the Euclidean distance.
/// A dimension with zero spread maps every value to `0.0`.
///
/// # Example
///
/// ```
/// use fleetstat_cluster::Standardizer;
///
/// let vectors = [[10.0, 1000.0], [20.0, 1000.0], [30.0, 1000.0]];
/// let scaler = Standardizer::fit(&vectors)?;
///
/// let scaled = scaler.transform(&[20.0, 1000.0]);
/// assert_eq!(scaled, [0.0, 0.0]);
/// # Ok::<(), fleetstat_cluster::ClusterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    means: Vec<f64>,
    std_devs: Vec<f64>,
}

impl Standardizer {
    /// Fits means and population standard deviations per dimension.
    pub fn fit<V>(vectors: &[V]) -> Result<Self, ClusterError>
    where
        V: AsRef<[f64]>,
    {
        let first = vectors.first().ok_or(ClusterError::EmptyInput)?;
        let dims = first.as_ref().len();
        if let Some((index, v)) = vectors
            .iter()
            .enumerate()
            .find(|(_, v)| v.as_ref().len() != dims)
        {
            return Err(ClusterError::DimensionMismatch {
                index,
                expected: dims,
                actual: v.as_ref().len(),
            });
        }

        let mut means = Vec::with_capacity(dims);
        let mut std_devs = Vec::with_capacity(dims);
        for d in 0..dims {
            let stats = DescriptiveStats::new(vectors.iter().map(|v| v.as_ref()[d]))
                .map_err(|_| ClusterError::EmptyInput)?;
            means.push(stats.mean);
            std_devs.push(stats.std_dev);
        }
        Ok(Self { means, std_devs })
    }

    /// Number of dimensions the scaler was fitted on.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.means.len()
    }

    /// Per-dimension means.
    #[must_use]
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Per-dimension population standard deviations.
    #[must_use]
    pub fn std_devs(&self) -> &[f64] {
        &self.std_devs
    }

    /// Scales one vector.
    ///
    /// # Panics
    ///
    /// Panics if `vector` does not have [`Self::dims`] entries.
    #[must_use]
    pub fn transform(&self, vector: &[f64]) -> Vec<f64> {
        assert_eq!(vector.len(), self.dims(), "dimension mismatch");
        vector
            .iter()
            .zip(self.means.iter().zip(&self.std_devs))
            .map(|(x, (mean, std_dev))| {
                if *std_dev > 0.0 {
                    (x - mean) / std_dev
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Scales every vector.
    #[must_use]
    pub fn transform_all<V>(&self, vectors: &[V]) -> Vec<Vec<f64>>
    where
        V: AsRef<[f64]>,
    {
        vectors.iter().map(|v| self.transform(v.as_ref())).collect()
    }

    /// Maps a scaled vector back to the original units.
    #[must_use]
    pub fn inverse_transform(&self, scaled: &[f64]) -> Vec<f64> {
        assert_eq!(scaled.len(), self.dims(), "dimension mismatch");
        scaled
            .iter()
            .zip(self.means.iter().zip(&self.std_devs))
            .map(|(z, (mean, std_dev))| z * std_dev + mean)
            .collect()
    }
}
