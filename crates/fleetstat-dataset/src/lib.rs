//! Record-level analytics for vehicle listings.
//!
//! Listings arrive as loosely typed JSON objects ([`record::Record`]). This
//! crate pulls numeric and categorical attributes out of them, hands the
//! clean samples to `fleetstat_stats` and `fleetstat_cluster`, and shapes the
//! results into JSON reports.
//!
//! Records with missing or malformed attributes are skipped and counted,
//! never treated as errors. Errors ([`AnalysisError`]) are reserved for
//! requests that cannot be answered at all, such as an attribute with no
//! usable values or a non-positive cluster count.
//!
//! # Modules
//!
//! - [`record`] - the record type
//! - [`extract`] - numeric extraction policies
//! - [`categorical`] - top-N category binning
//! - [`features`] - feature matrices for clustering
//! - [`years`] - per-year record counts
//! - [`overview`] - collection-wide headline figures
//! - [`params`] - request parameters
//! - [`analysis`] - analysis entry points
//! - [`report`] - serializable reports

pub mod analysis;
pub mod categorical;
pub mod extract;
pub mod features;
pub mod overview;
pub mod params;
pub mod record;
pub mod report;
pub mod years;

mod error;

pub use self::error::AnalysisError;
