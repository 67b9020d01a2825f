use fleetstat_stats::frequency::{Bin, FrequencyTable};
use serde_json::Value;

use crate::record::Record;

/// Label given to records whose category is missing, `null`, or empty.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Ranked top-N view of one categorical attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalDistribution {
    /// The attribute that was binned.
    pub attribute: String,
    /// At most `top_n` bins, most frequent first; ties keep first-seen order.
    pub bins: Vec<Bin<String>>,
    /// Count over all categories, including those not in `bins`.
    pub total: usize,
    /// Number of distinct categories, including those not in `bins`.
    pub distinct: usize,
}

/// Returns the category label of a raw attribute value.
///
/// Missing, `null`, and empty-string values are all [`UNKNOWN_CATEGORY`];
/// they are counted, never dropped. Non-string values use their JSON text.
///
/// # Examples
///
/// ```
/// use fleetstat_dataset::categorical::category_label;
/// use serde_json::json;
///
/// assert_eq!(category_label(Some(&json!("SUV"))), "SUV");
/// assert_eq!(category_label(Some(&json!(4))), "4");
/// assert_eq!(category_label(Some(&json!(""))), "Unknown");
/// assert_eq!(category_label(None), "Unknown");
/// ```
#[must_use]
pub fn category_label(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN_CATEGORY.to_owned(),
        Some(Value::String(s)) if s.is_empty() => UNKNOWN_CATEGORY.to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Counts the categories of `attribute` across all records.
#[must_use]
pub fn frequency_table(records: &[Record], attribute: &str) -> FrequencyTable<String> {
    FrequencyTable::from_labels(
        records
            .iter()
            .map(|record| category_label(record.get(attribute))),
    )
}

/// Groups records by `attribute` and keeps the `top_n` most frequent categories.
///
/// # Examples
///
/// ```
/// use fleetstat_dataset::{categorical::bin_categorical, record::Record};
///
/// let records = [
///     Record::new().with("Brand", "Toyota"),
///     Record::new().with("Brand", "Toyota"),
///     Record::new().with("Brand", "Honda"),
/// ];
/// let dist = bin_categorical(&records, "Brand", 2);
///
/// assert_eq!(dist.bins[0].label, "Toyota");
/// assert_eq!(dist.bins[0].count, 2);
/// assert_eq!(dist.bins[1].label, "Honda");
/// assert_eq!(dist.total, 3);
/// ```
#[must_use]
pub fn bin_categorical(records: &[Record], attribute: &str, top_n: usize) -> CategoricalDistribution {
    let table = frequency_table(records, attribute);
    CategoricalDistribution {
        attribute: attribute.to_owned(),
        bins: table.top_n(top_n),
        total: table.total(),
        distinct: table.distinct(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(values: Value) -> Vec<Record> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn test_missing_values_are_unknown() {
        let records = records(json!([
            { "Brand": "Kia" },
            {},
            { "Brand": null },
            { "Brand": "" },
            { "Brand": "Kia" },
        ]));
        let dist = bin_categorical(&records, "Brand", 5);
        assert_eq!(
            dist.bins,
            [
                Bin {
                    label: UNKNOWN_CATEGORY.to_owned(),
                    count: 3
                },
                Bin {
                    label: "Kia".to_owned(),
                    count: 2
                },
            ]
        );
        assert_eq!(dist.total, 5);
    }

    #[test]
    fn test_top_n_truncates_but_total_counts_everything() {
        let records = records(json!([
            { "Brand": "A" }, { "Brand": "B" }, { "Brand": "C" },
            { "Brand": "B" }, { "Brand": "D" }, { "Brand": "C" },
            { "Brand": "C" },
        ]));
        let dist = bin_categorical(&records, "Brand", 2);
        let labels = dist.bins.iter().map(|b| b.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, ["C", "B"]);
        assert_eq!(dist.total, 7);
        assert_eq!(dist.distinct, 4);
        assert!(dist.bins.iter().map(|b| b.count).sum::<usize>() <= dist.total);
    }

    #[test]
    fn test_numeric_categories() {
        let records = records(json!([{ "Doors": 4 }, { "Doors": 2 }, { "Doors": 4 }]));
        let dist = bin_categorical(&records, "Doors", 10);
        assert_eq!(dist.bins[0].label, "4");
        assert_eq!(dist.bins[0].count, 2);
    }

    #[test]
    fn test_empty_collection() {
        let dist = bin_categorical(&[], "Brand", 5);
        assert!(dist.bins.is_empty());
        assert_eq!(dist.total, 0);
    }
}
