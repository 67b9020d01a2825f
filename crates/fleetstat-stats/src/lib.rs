//! Statistical primitives for the fleetstat analytics engine.
//!
//! This crate provides pure functions over numeric samples and label streams:
//!
//! - **Descriptive statistics**: count, mean, population variance and standard deviation, extremes
//! - **Percentiles**: nearest-rank percentiles with an explicit index clamp
//! - **Empirical distribution**: EDF step points aligned with an approximate Gaussian CDF
//! - **Summaries**: descriptive statistics and percentiles computed in one pass
//! - **Frequency ranking**: categorical counts with top-N selection
//!
//! Nothing in this crate performs I/O or keeps state between calls, so every
//! function can be called concurrently on independent inputs.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing samples
//! - [`percentiles`]: Percentile computation and storage
//! - [`edf`]: Empirical distribution function, `erf`, and normal CDF
//! - [`summary`]: Combined summary and distribution analysis
//! - [`frequency`]: Categorical frequency tables and top-N ranking
//!
//! # Examples
//!
//! ## Summarizing a sample
//!
//! ```
//! use fleetstat_stats::summary::DistributionSummary;
//!
//! let values = (1..=10).map(f64::from);
//! let summary = DistributionSummary::new(values, &[0.8]).unwrap();
//! assert_eq!(summary.stats.mean, 5.5);
//! assert_eq!(summary.percentiles.get(0.8), Some(9.0));
//! ```
//!
//! ## Empty samples are errors
//!
//! ```
//! use fleetstat_stats::{EmptySampleError, descriptive::DescriptiveStats};
//!
//! assert_eq!(DescriptiveStats::new(Vec::new()), Err(EmptySampleError));
//! ```
//!
//! ## Ranking categories
//!
//! ```
//! use fleetstat_stats::frequency::FrequencyTable;
//!
//! let table = FrequencyTable::from_labels(["Toyota", "Toyota", "Honda"]);
//! assert_eq!(table.top_n(1)[0].label, "Toyota");
//! ```

pub mod descriptive;
pub mod edf;
pub mod frequency;
pub mod percentiles;
pub mod summary;

pub use self::descriptive::EmptySampleError;
