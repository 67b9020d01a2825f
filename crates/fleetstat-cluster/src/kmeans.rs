use rand::Rng;

use crate::seed::ClusterSeed;

/// Upper bound on assignment passes per clustering run.
pub const MAX_ITERATIONS: usize = 50;

/// Errors raised for clustering requests that cannot be run at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ClusterError {
    #[display("cluster count must be positive, got {k}")]
    InvalidClusterCount { k: usize },
    #[display("cannot cluster an empty set of feature vectors")]
    EmptyInput,
    #[display("feature vector #{index} has {actual} dimensions, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// How a clustering run terminated. Both outcomes are successful.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant, serde::Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterOutcome {
    /// An assignment pass reproduced the previous pass exactly.
    #[display("converged")]
    Converged,
    /// The pass cap was hit before assignments settled.
    #[display("max-iterations-reached")]
    MaxIterationsReached,
}

/// Simplified Lloyd-style k-means over dense feature vectors.
///
/// # Algorithm
///
/// 1. Sample `k` initial centroids uniformly from the input vectors, with
///    replacement (duplicate centroids are allowed and reported)
/// 2. Assign every vector to its nearest centroid by Euclidean distance;
///    ties go to the lowest cluster index
/// 3. Recompute each centroid as the component-wise mean of its vectors; a
///    centroid that received no vectors keeps its previous position
/// 4. Repeat from 2 until a pass changes no assignment, or until
///    [`MAX_ITERATIONS`] passes have run
///
/// The first pass always counts as a change, since there is no previous
/// assignment to compare against.
///
/// # Example
///
/// ```
/// use fleetstat_cluster::{ClusterSeed, KMeans};
///
/// let vectors = [[1.0], [2.0], [10.0], [11.0]];
/// let clustering = KMeans::new(2)?.fit_seeded(&vectors, ClusterSeed::new(1))?;
///
/// let a = clustering.assignments();
/// assert_eq!(a[0], a[1]);
/// assert_eq!(a[2], a[3]);
/// assert_ne!(a[0], a[2]);
/// # Ok::<(), fleetstat_cluster::ClusterError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeans {
    k: usize,
}

impl KMeans {
    /// Creates a clusterer producing `k` clusters.
    ///
    /// `k` may exceed the number of input vectors; centroids are then
    /// necessarily duplicated.
    pub fn new(k: usize) -> Result<Self, ClusterError> {
        if k == 0 {
            return Err(ClusterError::InvalidClusterCount { k });
        }
        Ok(Self { k })
    }

    /// Returns the number of clusters.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Runs k-means with centroids sampled from a generator seeded by `seed`.
    pub fn fit_seeded<V>(&self, vectors: &[V], seed: ClusterSeed) -> Result<Clustering, ClusterError>
    where
        V: AsRef<[f64]>,
    {
        self.fit(vectors, &mut seed.rng())
    }

    /// Runs k-means with centroids sampled from `rng`.
    pub fn fit<V, R>(&self, vectors: &[V], rng: &mut R) -> Result<Clustering, ClusterError>
    where
        V: AsRef<[f64]>,
        R: Rng + ?Sized,
    {
        let dims = validate_dimensions(vectors)?;

        let mut centroids = (0..self.k)
            .map(|_| vectors[rng.random_range(0..vectors.len())].as_ref().to_vec())
            .collect::<Vec<_>>();
        let duplicate_centroids = has_duplicates(&centroids);
        if duplicate_centroids {
            tracing::debug!(k = self.k, "initial centroids contain duplicates");
        }

        let mut assignments = assign(vectors, &centroids);
        update_centroids(vectors, &assignments, &mut centroids, dims);
        let mut iterations = 1;
        let mut outcome = ClusterOutcome::MaxIterationsReached;
        while iterations < MAX_ITERATIONS {
            let next = assign(vectors, &centroids);
            iterations += 1;
            if next == assignments {
                outcome = ClusterOutcome::Converged;
                break;
            }
            assignments = next;
            update_centroids(vectors, &assignments, &mut centroids, dims);
        }

        let mut counts = vec![0; self.k];
        for &cluster in &assignments {
            counts[cluster] += 1;
        }
        let inertia = vectors
            .iter()
            .zip(&assignments)
            .map(|(v, &cluster)| squared_distance(v.as_ref(), &centroids[cluster]))
            .sum();

        tracing::debug!(
            k = self.k,
            vectors = vectors.len(),
            dims,
            iterations,
            %outcome,
            "k-means finished"
        );

        Ok(Clustering {
            assignments,
            centroids,
            counts,
            iterations,
            outcome,
            inertia,
            duplicate_centroids,
        })
    }
}

/// Result of one k-means run.
///
/// Every value here belongs to a single run; nothing is cached or shared
/// between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    assignments: Vec<usize>,
    centroids: Vec<Vec<f64>>,
    counts: Vec<usize>,
    iterations: usize,
    outcome: ClusterOutcome,
    inertia: f64,
    duplicate_centroids: bool,
}

impl Clustering {
    /// Cluster index of each input vector, in input order.
    #[must_use]
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Final centroid of each cluster.
    #[must_use]
    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    /// Number of vectors assigned to each cluster. Sums to the input size.
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of assignment passes performed, at most [`MAX_ITERATIONS`].
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// How the run terminated.
    #[must_use]
    pub fn outcome(&self) -> ClusterOutcome {
        self.outcome
    }

    /// Sum of squared distances from each vector to its centroid.
    #[must_use]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Whether two or more initial centroids were sampled from identical vectors.
    #[must_use]
    pub fn duplicate_centroids(&self) -> bool {
        self.duplicate_centroids
    }

    /// Number of clusters.
    #[must_use]
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Returns the cluster whose centroid is nearest to `vector`.
    #[must_use]
    pub fn predict(&self, vector: &[f64]) -> usize {
        nearest_centroid(vector, &self.centroids)
    }
}

/// Euclidean distance between two vectors of equal length.
///
/// # Examples
///
/// ```
/// use fleetstat_cluster::kmeans::euclidean_distance;
///
/// assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
/// ```
#[must_use]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    squared_distance(a, b).sqrt()
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

fn validate_dimensions<V>(vectors: &[V]) -> Result<usize, ClusterError>
where
    V: AsRef<[f64]>,
{
    let first = vectors.first().ok_or(ClusterError::EmptyInput)?;
    let expected = first.as_ref().len();
    for (index, v) in vectors.iter().enumerate() {
        let actual = v.as_ref().len();
        if actual != expected {
            return Err(ClusterError::DimensionMismatch {
                index,
                expected,
                actual,
            });
        }
    }
    Ok(expected)
}

fn has_duplicates(centroids: &[Vec<f64>]) -> bool {
    centroids
        .iter()
        .enumerate()
        .any(|(i, a)| centroids[i + 1..].iter().any(|b| a == b))
}

// Squared distance orders candidates exactly like Euclidean distance.
fn nearest_centroid(vector: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (cluster, centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(vector, centroid);
        if dist < best_dist {
            best = cluster;
            best_dist = dist;
        }
    }
    best
}

fn assign<V>(vectors: &[V], centroids: &[Vec<f64>]) -> Vec<usize>
where
    V: AsRef<[f64]>,
{
    vectors
        .iter()
        .map(|v| nearest_centroid(v.as_ref(), centroids))
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn update_centroids<V>(vectors: &[V], assignments: &[usize], centroids: &mut [Vec<f64>], dims: usize)
where
    V: AsRef<[f64]>,
{
    let mut sums = vec![vec![0.0; dims]; centroids.len()];
    let mut counts = vec![0_usize; centroids.len()];
    for (v, &cluster) in vectors.iter().zip(assignments) {
        counts[cluster] += 1;
        for (sum, x) in sums[cluster].iter_mut().zip(v.as_ref()) {
            *sum += x;
        }
    }
    for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
        // empty clusters keep their previous centroid
        if count > 0 {
            let n = count as f64;
            *centroid = sum.into_iter().map(|s| s / n).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn seeds() -> impl Iterator<Item = ClusterSeed> {
        (0..200).map(ClusterSeed::new)
    }

    mod validation {
        use super::*;

        #[test]
        fn test_zero_clusters_rejected() {
            assert_eq!(
                KMeans::new(0),
                Err(ClusterError::InvalidClusterCount { k: 0 })
            );
        }

        #[test]
        fn test_empty_input_rejected() {
            let vectors: [[f64; 2]; 0] = [];
            let result = KMeans::new(3).unwrap().fit_seeded(&vectors, ClusterSeed::new(0));
            assert_eq!(result, Err(ClusterError::EmptyInput));
        }

        #[test]
        fn test_ragged_input_rejected() {
            let vectors = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0]];
            let result = KMeans::new(2).unwrap().fit_seeded(&vectors, ClusterSeed::new(0));
            assert_eq!(
                result,
                Err(ClusterError::DimensionMismatch {
                    index: 2,
                    expected: 2,
                    actual: 1
                })
            );
        }
    }

    #[test]
    fn test_well_separated_data_for_every_seed() {
        let vectors = [[1.0], [2.0], [10.0], [11.0]];
        let kmeans = KMeans::new(2).unwrap();
        for seed in seeds() {
            let clustering = kmeans.fit_seeded(&vectors, seed).unwrap();
            let a = clustering.assignments();
            assert_eq!(clustering.outcome(), ClusterOutcome::Converged, "{seed}");
            assert_eq!(a[0], a[1], "{seed}");
            assert_eq!(a[2], a[3], "{seed}");
            assert_ne!(a[0], a[2], "{seed}");
            assert_eq!(clustering.counts(), [2, 2], "{seed}");
        }
    }

    #[test]
    fn test_counts_sum_and_termination() {
        let vectors = (0..60)
            .map(|i| {
                let i = f64::from(i);
                vec![(i * 7.3) % 13.0, (i * 3.1) % 5.0, i.sqrt()]
            })
            .collect::<Vec<_>>();
        for k in [1, 2, 3, 5, 8] {
            let kmeans = KMeans::new(k).unwrap();
            for seed in seeds().take(20) {
                let clustering = kmeans.fit_seeded(&vectors, seed).unwrap();
                assert!(clustering.iterations() >= 1);
                assert!(clustering.iterations() <= MAX_ITERATIONS);
                assert_eq!(clustering.counts().len(), k);
                assert_eq!(clustering.counts().iter().sum::<usize>(), vectors.len());
                assert!(clustering.assignments().iter().all(|&c| c < k));
            }
        }
    }

    #[test]
    fn test_converged_assignment_is_stable() {
        let vectors = [
            [0.0, 0.0],
            [0.5, 0.2],
            [0.1, 0.9],
            [5.0, 5.0],
            [5.5, 4.8],
            [9.0, 0.0],
            [9.2, 0.3],
            [8.8, 0.1],
        ];
        let kmeans = KMeans::new(3).unwrap();
        for seed in seeds() {
            let clustering = kmeans.fit_seeded(&vectors, seed).unwrap();
            if clustering.outcome().is_converged() {
                for (v, &cluster) in vectors.iter().zip(clustering.assignments()) {
                    assert_eq!(clustering.predict(v), cluster, "{seed}");
                }
            }
        }
    }

    #[test]
    fn test_single_cluster_is_mean() {
        let vectors = [[1.0, 10.0], [3.0, 20.0], [5.0, 30.0]];
        let clustering = KMeans::new(1)
            .unwrap()
            .fit_seeded(&vectors, ClusterSeed::new(9))
            .unwrap();
        assert_eq!(clustering.outcome(), ClusterOutcome::Converged);
        assert_eq!(clustering.iterations(), 2);
        assert_eq!(clustering.centroids(), [vec![3.0, 20.0]]);
        assert_eq!(clustering.counts(), [3]);
        // (4 + 100) + 0 + (4 + 100)
        assert!((clustering.inertia() - 208.0).abs() < 1e-9);
    }

    #[test]
    fn test_more_clusters_than_vectors() {
        let vectors = [[4.0], [8.0]];
        let clustering = KMeans::new(5)
            .unwrap()
            .fit_seeded(&vectors, ClusterSeed::new(3))
            .unwrap();
        assert!(clustering.duplicate_centroids());
        assert_eq!(clustering.k(), 5);
        assert_eq!(clustering.counts().iter().sum::<usize>(), 2);
    }

    #[test]
    fn test_identical_vectors() {
        let vectors = [[2.5, 2.5]; 6];
        let clustering = KMeans::new(3)
            .unwrap()
            .fit_seeded(&vectors, ClusterSeed::new(11))
            .unwrap();
        // all centroids coincide, so the tie rule sends everything to cluster 0
        assert!(clustering.duplicate_centroids());
        assert_eq!(clustering.counts(), [6, 0, 0]);
        assert!(clustering.inertia().abs() < f64::EPSILON);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let vectors = (0..40)
            .map(|i| [f64::from(i % 7), f64::from(i % 3)])
            .collect::<Vec<_>>();
        let kmeans = KMeans::new(4).unwrap();
        let a = kmeans.fit_seeded(&vectors, ClusterSeed::new(1234)).unwrap();
        let b = kmeans.fit_seeded(&vectors, ClusterSeed::new(1234)).unwrap();
        assert_eq!(a, b);

        let mut rng = Pcg32::seed_from_u64(1234);
        let c = kmeans.fit(&vectors, &mut rng).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn test_nearest_centroid_tie_prefers_lowest_index() {
        let centroids = vec![vec![0.0], vec![2.0], vec![2.0]];
        assert_eq!(nearest_centroid(&[1.0], &centroids), 0);
        assert_eq!(nearest_centroid(&[3.0], &centroids), 1);
    }

    #[test]
    fn test_empty_cluster_keeps_centroid() {
        let vectors = [[0.0], [1.0]];
        let mut centroids = vec![vec![0.0], vec![100.0]];
        update_centroids(&vectors, &[0, 0], &mut centroids, 1);
        assert_eq!(centroids, [vec![0.5], vec![100.0]]);
    }
}
