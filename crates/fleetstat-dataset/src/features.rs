use crate::{
    extract::ExtractPolicy,
    record::Record,
};

/// One clustering feature: an attribute and how to coerce it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSpec {
    /// Attribute name in the source records.
    pub attribute: String,
    /// Coercion applied to the raw value.
    pub policy: ExtractPolicy,
}

impl FeatureSpec {
    /// Creates a feature using the attribute's conventional policy.
    #[must_use]
    pub fn new(attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        let policy = ExtractPolicy::for_attribute(&attribute);
        Self { attribute, policy }
    }

    /// Creates a feature with an explicit policy.
    #[must_use]
    pub fn with_policy(attribute: impl Into<String>, policy: ExtractPolicy) -> Self {
        Self {
            attribute: attribute.into(),
            policy,
        }
    }
}

/// Feature vectors derived from a record collection.
///
/// A record contributes a vector only if every selected feature extracts.
/// Vectors keep record order, and each remembers the index of the record it
/// came from so results can be joined back to the records.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    attributes: Vec<String>,
    record_indices: Vec<usize>,
    vectors: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Builds the matrix from records.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetstat_dataset::{features::{FeatureMatrix, FeatureSpec}, record::Record};
    ///
    /// let records = [
    ///     Record::new().with("Year", "2015").with("Price", 12000),
    ///     Record::new().with("Year", 2019),
    ///     Record::new().with("Year", "n/a").with("Price", "9000"),
    /// ];
    /// let specs = [FeatureSpec::new("Year"), FeatureSpec::new("Price")];
    /// let matrix = FeatureMatrix::from_records(&records, &specs);
    ///
    /// assert_eq!(matrix.vectors(), [vec![2015.0, 12000.0], vec![2000.0, 9000.0]]);
    /// assert_eq!(matrix.record_indices(), [0, 2]);
    /// ```
    #[must_use]
    pub fn from_records(records: &[Record], specs: &[FeatureSpec]) -> Self {
        let mut record_indices = Vec::new();
        let mut vectors = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let vector = specs
                .iter()
                .map(|spec| {
                    record
                        .get(&spec.attribute)
                        .and_then(|v| spec.policy.extract(v))
                })
                .collect::<Option<Vec<_>>>();
            if let Some(vector) = vector {
                record_indices.push(index);
                vectors.push(vector);
            }
        }

        let skipped = records.len() - vectors.len();
        if skipped > 0 {
            tracing::debug!(
                kept = vectors.len(),
                skipped,
                "skipped records missing a feature value"
            );
        }

        Self {
            attributes: specs.iter().map(|s| s.attribute.clone()).collect(),
            record_indices,
            vectors,
        }
    }

    /// Attribute name of each vector dimension.
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Index in the source collection of the record behind each vector.
    #[must_use]
    pub fn record_indices(&self) -> &[usize] {
        &self.record_indices
    }

    /// The feature vectors, all of length `attributes().len()`.
    #[must_use]
    pub fn vectors(&self) -> &[Vec<f64>] {
        &self.vectors
    }

    /// Number of vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Returns `true` if no record produced a vector.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_drops_incomplete_records() {
        let records: Vec<Record> = serde_json::from_value(json!([
            { "Price": 1, "Kilometres": 10 },
            { "Price": 2 },
            { "Kilometres": 30 },
            { "Price": "4", "Kilometres": "40" },
        ]))
        .unwrap();
        let specs = [FeatureSpec::new("Price"), FeatureSpec::new("Kilometres")];
        let matrix = FeatureMatrix::from_records(&records, &specs);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.record_indices(), [0, 3]);
        assert_eq!(matrix.vectors(), [vec![1.0, 10.0], vec![4.0, 40.0]]);
        assert_eq!(matrix.attributes(), ["Price", "Kilometres"]);
    }

    #[test]
    fn test_explicit_policy() {
        let records = [Record::new().with("Mileage", "about 120000 km")];
        let strict = FeatureMatrix::from_records(&records, &[FeatureSpec::new("Mileage")]);
        assert!(strict.is_empty());

        let lenient = FeatureMatrix::from_records(
            &records,
            &[FeatureSpec::with_policy(
                "Mileage",
                ExtractPolicy::EmbeddedInteger { default: 0.0 },
            )],
        );
        assert_eq!(lenient.vectors(), [vec![120_000.0]]);
    }

    #[test]
    fn test_no_features_yields_empty_vectors() {
        let records = [Record::new(), Record::new()];
        let matrix = FeatureMatrix::from_records(&records, &[]);
        assert_eq!(matrix.len(), 2);
        assert!(matrix.vectors().iter().all(Vec::is_empty));
    }
}
