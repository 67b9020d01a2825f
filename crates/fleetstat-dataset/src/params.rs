use fleetstat_cluster::ClusterSeed;
use fleetstat_stats::summary::DEFAULT_PERCENTILE_LEVELS;
use serde::{Deserialize, Serialize};

use crate::{error::AnalysisError, extract::YEAR_ATTRIBUTE, features::FeatureSpec};

/// Request parameters for a combined analysis.
///
/// Every field has a default, so a partial JSON object is a valid request.
/// Counts are signed so that negative values can be reported as invalid
/// parameters rather than as parse failures.
///
/// # Example
///
/// ```
/// use fleetstat_dataset::params::AnalysisParams;
///
/// let params: AnalysisParams = serde_json::from_str(r#"{ "attribute": "Kilometres", "k": 3 }"#)?;
/// assert_eq!(params.attribute, "Kilometres");
/// assert_eq!(params.checked_k()?, 3);
/// assert_eq!(params.checked_top_n()?, 5);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalysisParams {
    /// Numeric attribute summarized by the statistics section.
    pub attribute: String,
    /// Percentile levels in `0.0..=1.0`.
    pub percentile_levels: Vec<f64>,
    /// Categorical attribute ranked by the categories section.
    pub category: String,
    /// Number of categories to keep.
    pub top_n: i64,
    /// Number of clusters.
    pub k: i64,
    /// Attributes used as clustering features, in vector order.
    pub features: Vec<String>,
    /// Whether to z-score scale features before clustering.
    pub standardize: bool,
    /// Fixed seed for centroid initialization; drawn fresh when absent.
    pub seed: Option<ClusterSeed>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            attribute: "Price".to_owned(),
            percentile_levels: DEFAULT_PERCENTILE_LEVELS.to_vec(),
            category: "Brand".to_owned(),
            top_n: 5,
            k: 4,
            features: vec![YEAR_ATTRIBUTE.to_owned()],
            standardize: false,
            seed: None,
        }
    }
}

impl AnalysisParams {
    /// Checks every parameter, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        validate_attribute("attribute", &self.attribute)?;
        validate_attribute("category", &self.category)?;
        validate_percentile_levels(&self.percentile_levels)?;
        self.checked_top_n()?;
        self.checked_k()?;
        if self.features.is_empty() {
            return Err(AnalysisError::invalid_parameter(
                "features",
                "at least one feature is required",
            ));
        }
        for feature in &self.features {
            validate_attribute("features", feature)?;
        }
        Ok(())
    }

    /// Returns `top_n` if it is a positive integer.
    pub fn checked_top_n(&self) -> Result<usize, AnalysisError> {
        positive("topN", self.top_n)
    }

    /// Returns `k` if it is a positive integer.
    pub fn checked_k(&self) -> Result<usize, AnalysisError> {
        positive("k", self.k)
    }

    /// Feature specs for the selected attributes.
    #[must_use]
    pub fn feature_specs(&self) -> Vec<FeatureSpec> {
        self.features.iter().map(FeatureSpec::new).collect()
    }
}

fn positive(name: &'static str, value: i64) -> Result<usize, AnalysisError> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or_else(|| {
            AnalysisError::invalid_parameter(name, format!("must be a positive integer, got {value}"))
        })
}

fn validate_attribute(name: &'static str, attribute: &str) -> Result<(), AnalysisError> {
    if attribute.trim().is_empty() {
        return Err(AnalysisError::invalid_parameter(
            name,
            "attribute name must not be empty",
        ));
    }
    Ok(())
}

/// Checks that every level is a finite fraction in `0.0..=1.0`.
pub fn validate_percentile_levels(levels: &[f64]) -> Result<(), AnalysisError> {
    if let Some(level) = levels.iter().find(|l| !(0.0..=1.0).contains(*l)) {
        return Err(AnalysisError::invalid_parameter(
            "percentileLevels",
            format!("level {level} is outside 0.0..=1.0"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = AnalysisParams::default();
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.feature_specs(), [FeatureSpec::new("Year")]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: AnalysisParams =
            serde_json::from_str(r#"{ "topN": 10, "seed": "00000000000000ff" }"#).unwrap();
        assert_eq!(params.checked_top_n(), Ok(10));
        assert_eq!(params.seed, Some(ClusterSeed::new(255)));
        assert_eq!(params.attribute, "Price");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(serde_json::from_str::<AnalysisParams>(r#"{ "clusters": 3 }"#).is_err());
    }

    #[test]
    fn test_non_positive_counts_are_invalid() {
        for k in [0, -1, i64::MIN] {
            let params = AnalysisParams {
                k,
                ..AnalysisParams::default()
            };
            assert!(matches!(
                params.validate(),
                Err(AnalysisError::InvalidParameter { name: "k", .. })
            ));
        }
        let params = AnalysisParams {
            top_n: 0,
            ..AnalysisParams::default()
        };
        assert!(matches!(
            params.checked_top_n(),
            Err(AnalysisError::InvalidParameter { name: "topN", .. })
        ));
    }

    #[test]
    fn test_percentile_levels_must_be_fractions() {
        assert_eq!(validate_percentile_levels(&[0.0, 0.5, 1.0]), Ok(()));
        for bad in [-0.1, 1.5, f64::NAN, 80.0] {
            assert!(validate_percentile_levels(&[0.5, bad]).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_empty_features_are_invalid() {
        let params = AnalysisParams {
            features: vec![],
            ..AnalysisParams::default()
        };
        assert!(params.validate().is_err());
    }
}
