use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schemaless vehicle record: attribute name to JSON value.
///
/// Records are read-only inputs to every analysis. Attributes of interest are
/// looked up by name and may be missing, `null`, or of an unexpected type.
///
/// # Example
///
/// ```
/// use fleetstat_dataset::record::Record;
/// use serde_json::json;
///
/// let record: Record = serde_json::from_value(json!({
///     "Brand": "Toyota",
///     "Price": 18500,
///     "Kilometres": null,
/// }))
/// .unwrap();
///
/// assert_eq!(record.get("Brand"), Some(&json!("Toyota")));
/// assert_eq!(record.get("Kilometres"), None);
/// assert_eq!(record.get("Model"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `attribute`, treating `null` as absent.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.0.get(attribute).filter(|v| !v.is_null())
    }

    /// Sets `attribute` to `value`, returning the record for chaining.
    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(attribute.into(), value.into());
        self
    }

    /// Number of attributes present, including `null` ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_collection() {
        let records: Vec<Record> = serde_json::from_value(json!([
            { "Brand": "Toyota", "Year": "2015" },
            {},
            { "Brand": null }
        ]))
        .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("Year"), Some(&json!("2015")));
        assert!(records[1].is_empty());
        assert_eq!(records[2].len(), 1);
        assert_eq!(records[2].get("Brand"), None);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(serde_json::from_value::<Record>(json!([1, 2])).is_err());
        assert!(serde_json::from_value::<Record>(json!("Toyota")).is_err());
    }

    #[test]
    fn test_builder_and_roundtrip() {
        let record = Record::new().with("Brand", "Honda").with("Price", 9999.5);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({ "Brand": "Honda", "Price": 9999.5 }));
    }
}
