use std::{collections::BTreeMap, ops::RangeInclusive};

use crate::{
    extract::{self, YEAR_ATTRIBUTE},
    record::Record,
};

/// Default window of model years considered plausible.
pub const DEFAULT_YEAR_WINDOW: RangeInclusive<i64> = 1980..=2025;

/// Number of records for one model year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct YearCount {
    pub year: i64,
    pub count: usize,
}

/// Record counts per model year within a window.
#[derive(Debug, Clone, PartialEq)]
pub struct YearDistribution {
    /// Inclusive range of years counted.
    pub window: RangeInclusive<i64>,
    /// Counts ascending by year; years without records are omitted.
    pub counts: Vec<YearCount>,
    /// Records whose year fell outside the window.
    pub out_of_window: usize,
    /// Records without a usable year.
    pub dropped: usize,
}

impl YearDistribution {
    /// Counts records per year of `YEAR_ATTRIBUTE`, keeping only years in `window`.
    ///
    /// Fractional years are truncated toward negative infinity.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetstat_dataset::{record::Record, years::{YearDistribution, DEFAULT_YEAR_WINDOW}};
    ///
    /// let records = [
    ///     Record::new().with("Year", 2015),
    ///     Record::new().with("Year", "2015"),
    ///     Record::new().with("Year", 2018),
    ///     Record::new().with("Year", 1950),
    /// ];
    /// let dist = YearDistribution::from_records(&records, DEFAULT_YEAR_WINDOW);
    ///
    /// assert_eq!(dist.first_year(), Some(2015));
    /// assert_eq!(dist.last_year(), Some(2018));
    /// assert_eq!(dist.mean_per_year(), Some(1.5));
    /// assert_eq!(dist.out_of_window, 1);
    /// ```
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn from_records(records: &[Record], window: RangeInclusive<i64>) -> Self {
        let extraction = extract::extract_sample(records, YEAR_ATTRIBUTE);
        let mut counts = BTreeMap::<i64, usize>::new();
        let mut out_of_window = 0;
        tracing::debug!(
            start = *window.start(),
            end = *window.end(),
            years = extraction.values.len(),
            "counting records per year"
        );
        for value in extraction.values {
            let year = value.floor() as i64;
            if window.contains(&year) {
                *counts.entry(year).or_insert(0) += 1;
            } else {
                out_of_window += 1;
            }
        }
        Self {
            window,
            counts: counts
                .into_iter()
                .map(|(year, count)| YearCount { year, count })
                .collect(),
            out_of_window,
            dropped: extraction.dropped,
        }
    }

    /// Earliest year with at least one record.
    #[must_use]
    pub fn first_year(&self) -> Option<i64> {
        self.counts.first().map(|c| c.year)
    }

    /// Latest year with at least one record.
    #[must_use]
    pub fn last_year(&self) -> Option<i64> {
        self.counts.last().map(|c| c.year)
    }

    /// Records inside the window.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Mean number of records per year that has any records.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean_per_year(&self) -> Option<f64> {
        if self.counts.is_empty() {
            return None;
        }
        Some(self.total() as f64 / self.counts.len() as f64)
    }
}
