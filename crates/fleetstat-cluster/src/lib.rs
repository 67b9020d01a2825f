//! K-means clustering over derived feature vectors.
//!
//! # Overview
//!
//! A clustering run moves through `Initialized -> Iterating` and ends in one
//! of two successful states, [`ClusterOutcome::Converged`] or
//! [`ClusterOutcome::MaxIterationsReached`]. Initialization is random; the
//! randomness is injected, either as any [`rand::Rng`] or as a
//! [`ClusterSeed`] that makes the run reproducible.
//!
//! - [`kmeans`]: the clusterer, its result type and errors
//! - [`scaling`]: optional z-score scaling of features before clustering
//! - [`seed`]: serializable seeds for deterministic runs
//!
//! # Example
//!
//! ```
//! use fleetstat_cluster::{ClusterSeed, KMeans, Standardizer};
//!
//! // price and mileage of four vehicles
//! let vectors = [
//!     [12_000.0, 150_000.0],
//!     [13_000.0, 140_000.0],
//!     [45_000.0, 10_000.0],
//!     [47_000.0, 12_000.0],
//! ];
//! let scaled = Standardizer::fit(&vectors)?.transform_all(&vectors);
//! let clustering = KMeans::new(2)?.fit_seeded(&scaled, ClusterSeed::new(42))?;
//!
//! assert_eq!(clustering.counts().iter().sum::<usize>(), 4);
//! # Ok::<(), fleetstat_cluster::ClusterError>(())
//! ```

pub mod kmeans;
pub mod scaling;
pub mod seed;

pub use self::{
    kmeans::{ClusterError, ClusterOutcome, Clustering, KMeans, MAX_ITERATIONS},
    scaling::Standardizer,
    seed::{ClusterSeed, ParseSeedError},
};
