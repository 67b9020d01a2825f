use fleetstat_stats::frequency::Bin;

use crate::{categorical, extract, record::Record};

/// Default number of categories listed in an overview.
pub const DEFAULT_OVERVIEW_TOP_N: usize = 10;

/// Collection-wide headline figures.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    /// Number of records in the collection.
    pub total_records: usize,
    /// Attribute averaged for `mean_money`.
    pub money_attribute: String,
    /// Mean of the money attribute, or `None` if no record has a usable value.
    pub mean_money: Option<f64>,
    /// Attribute whose categories are counted.
    pub category_attribute: String,
    /// Number of distinct categories, including [`categorical::UNKNOWN_CATEGORY`].
    pub distinct_categories: usize,
    /// Most frequent categories, most frequent first.
    pub top_categories: Vec<Bin<String>>,
}

impl Overview {
    /// Summarizes `records`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetstat_dataset::{overview::Overview, record::Record};
    ///
    /// let records = [
    ///     Record::new().with("Brand", "Mazda").with("Price", 10000),
    ///     Record::new().with("Brand", "Mazda").with("Price", "n/a"),
    ///     Record::new().with("Brand", "Audi").with("Price", 30000),
    /// ];
    /// let overview = Overview::from_records(&records, "Price", "Brand", 10);
    ///
    /// assert_eq!(overview.total_records, 3);
    /// assert_eq!(overview.mean_money, Some(20000.0));
    /// assert_eq!(overview.distinct_categories, 2);
    /// assert_eq!(overview.top_categories[0].label, "Mazda");
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_records(
        records: &[Record],
        money_attribute: &str,
        category_attribute: &str,
        top_n: usize,
    ) -> Self {
        let money = extract::extract_sample(records, money_attribute).values;
        let mean_money =
            (!money.is_empty()).then(|| money.iter().sum::<f64>() / money.len() as f64);
        let table = categorical::frequency_table(records, category_attribute);

        Self {
            total_records: records.len(),
            money_attribute: money_attribute.to_owned(),
            mean_money,
            category_attribute: category_attribute.to_owned(),
            distinct_categories: table.distinct(),
            top_categories: table.top_n(top_n),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_collection() {
        let overview = Overview::from_records(&[], "Price", "Brand", DEFAULT_OVERVIEW_TOP_N);
        assert_eq!(overview.total_records, 0);
        assert_eq!(overview.mean_money, None);
        assert_eq!(overview.distinct_categories, 0);
        assert!(overview.top_categories.is_empty());
    }

    #[test]
    fn test_mean_ignores_unusable_values() {
        let records: Vec<Record> = serde_json::from_value(json!([
            { "Price": 100 }, { "Price": "300" }, { "Price": null }, { "Brand": "Kia" },
        ]))
        .unwrap();
        let overview = Overview::from_records(&records, "Price", "Brand", 3);
        assert_eq!(overview.total_records, 4);
        assert_eq!(overview.mean_money, Some(200.0));
        assert_eq!(overview.distinct_categories, 2);
        assert_eq!(overview.top_categories[0].label, "Unknown");
        assert_eq!(overview.top_categories[0].count, 3);
    }

    #[test]
    fn test_top_n_limits_categories() {
        let records = ["A", "B", "C", "D"].map(|b| Record::new().with("Brand", b));
        let overview = Overview::from_records(&records, "Price", "Brand", 2);
        assert_eq!(overview.distinct_categories, 4);
        assert_eq!(overview.top_categories.len(), 2);
    }
}
