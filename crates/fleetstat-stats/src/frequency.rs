//! Frequency counting and top-N ranking for categorical data
//!
//! This module counts how often each distinct label occurs and ranks labels
//! by frequency. Unlike value-range binning, every distinct label is its own
//! bin, and only the `N` most frequent bins are reported.
//!
//! # Ranking Rules
//!
//! - Bins are ordered by count, most frequent first
//! - Equal counts keep the order in which labels were first seen
//! - Labels outside the top `N` are dropped; no "other" bin is synthesized
//! - The grand total always covers every label, reported or not
//!
//! # Examples
//!
//! ```
//! use fleetstat_stats::frequency::FrequencyTable;
//!
//! let table = FrequencyTable::from_labels(["Toyota", "Honda", "Toyota", "Ford"]);
//! let top = table.top_n(2);
//!
//! assert_eq!(top[0].label, "Toyota");
//! assert_eq!(top[0].count, 2);
//! assert_eq!(top[1].label, "Honda");
//! assert_eq!(table.total(), 4);
//! ```

use std::{collections::HashMap, hash::Hash};

/// A single categorical bin
///
/// `count` is always at least 1: a bin exists only for labels that occurred.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bin<K> {
    /// The category label
    pub label: K,
    /// Number of occurrences of the label
    pub count: usize,
}

/// Occurrence counts for a stream of labels, kept in first-seen order
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    bins: Vec<Bin<K>>,
    index: HashMap<K, usize>,
    total: usize,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            bins: Vec::new(),
            index: HashMap::new(),
            total: 0,
        }
    }
}

impl<K> FrequencyTable<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every label produced by `labels`.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut table = Self::new();
        for label in labels {
            table.push(label);
        }
        table
    }

    /// Records one occurrence of `label`.
    pub fn push(&mut self, label: K) {
        self.total += 1;
        if let Some(&pos) = self.index.get(&label) {
            self.bins[pos].count += 1;
            return;
        }
        self.index.insert(label.clone(), self.bins.len());
        self.bins.push(Bin { label, count: 1 });
    }

    /// Total number of labels counted, across all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.bins.len()
    }

    /// Returns the occurrence count of `label` (zero if never seen).
    #[must_use]
    pub fn count_of(&self, label: &K) -> usize {
        self.index.get(label).map_or(0, |&pos| self.bins[pos].count)
    }

    /// Returns every bin ranked by count, most frequent first.
    ///
    /// The sort is stable over first-seen order, so equal counts keep the
    /// order in which their labels first appeared.
    #[must_use]
    pub fn ranked(&self) -> Vec<Bin<K>> {
        let mut bins = self.bins.clone();
        bins.sort_by(|a, b| b.count.cmp(&a.count));
        bins
    }

    /// Returns at most `n` bins ranked by count, most frequent first.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleetstat_stats::frequency::FrequencyTable;
    ///
    /// // "b" and "c" tie; "b" was seen first
    /// let table = FrequencyTable::from_labels(["a", "b", "c", "a", "c", "b", "a"]);
    /// let labels = table.top_n(2).into_iter().map(|b| b.label).collect::<Vec<_>>();
    /// assert_eq!(labels, ["a", "b"]);
    /// ```
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<Bin<K>> {
        let mut bins = self.ranked();
        bins.truncate(n);
        bins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::<&str>::new();
        assert_eq!(table.total(), 0);
        assert_eq!(table.distinct(), 0);
        assert!(table.top_n(5).is_empty());
    }

    #[test]
    fn test_toyota_honda_top_two() {
        let table = FrequencyTable::from_labels(["Toyota", "Toyota", "Honda"]);
        assert_eq!(
            table.top_n(2),
            [
                Bin {
                    label: "Toyota",
                    count: 2
                },
                Bin {
                    label: "Honda",
                    count: 1
                },
            ]
        );
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let table = FrequencyTable::from_labels(["z", "y", "x", "w"]);
        let labels = table.ranked().into_iter().map(|b| b.label).collect::<Vec<_>>();
        assert_eq!(labels, ["z", "y", "x", "w"]);
    }

    #[test]
    fn test_top_n_is_sorted_and_bounded_by_total() {
        let labels = "abracadabra alakazam".chars().collect::<Vec<_>>();
        let table = FrequencyTable::from_labels(labels.iter().copied());
        for n in 0..=table.distinct() + 2 {
            let top = table.top_n(n);
            assert!(top.len() <= n);
            assert!(top.is_sorted_by(|a, b| a.count >= b.count));
            assert!(top.iter().map(|b| b.count).sum::<usize>() <= table.total());
            assert!(top.iter().all(|b| b.count >= 1));
        }
        assert_eq!(table.total(), labels.len());
        assert_eq!(
            table.ranked().iter().map(|b| b.count).sum::<usize>(),
            table.total()
        );
    }

    #[test]
    fn test_remainder_is_not_synthesized() {
        let table = FrequencyTable::from_labels(["a", "a", "b", "c", "d"]);
        let top = table.top_n(2);
        assert_eq!(top.len(), 2);
        assert_eq!(table.total(), 5);
        assert_eq!(table.count_of(&"d"), 1);
        assert_eq!(table.count_of(&"e"), 0);
    }
}
