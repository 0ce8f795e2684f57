//! Categorical count/percentage distribution over retrieved records.

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::CategoryValue;

/// One category's share of the records seen so far.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistributionEntry {
    /// Categorical value in display form.
    pub category: CategoryValue,
    /// Occurrences of the category in the current query's records.
    pub count: usize,
    /// `count / total * 100`, plain floating-point division. Rounding is a
    /// presentation concern of the sink.
    pub percentage: f64,
}

/// Tally `values` and convert counts to percentages of `total`.
///
/// Deterministic and side-effect free. Entries appear in first-seen order of
/// their category. `total == 0` yields an empty distribution rather than NaN
/// percentages; no entry is produced for categories absent from `values`.
pub fn distribution(values: &[CategoryValue], total: usize) -> Vec<DistributionEntry> {
    if total == 0 {
        return Vec::new();
    }
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(category, count)| DistributionEntry {
            category: category.to_string(),
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect()
}
