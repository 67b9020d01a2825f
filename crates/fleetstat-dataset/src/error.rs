use fleetstat_cluster::ClusterError;

/// Errors that fail an analysis request as a whole.
///
/// Malformed individual records are not errors; they are skipped during
/// extraction. These variants describe requests that cannot be answered.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AnalysisError {
    #[display("no valid numeric values for attribute '{attribute}'")]
    EmptySample { attribute: String },
    #[display("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[display("clustering failed: {_0}")]
    #[from]
    Cluster(#[error(source)] ClusterError),
}

impl AnalysisError {
    pub(crate) fn empty_sample(attribute: &str) -> Self {
        Self::EmptySample {
            attribute: attribute.to_owned(),
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
