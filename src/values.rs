//! Distinct attribute values for populating a selection control.

use crate::errors::QueryError;
use crate::source::{RecordSource, SortDirection};
use crate::types::CategoryValue;

/// Reduce raw attribute values to the sorted distinct choices.
///
/// Blanks are dropped, duplicates collapse to their first occurrence, and
/// the result sorts descending numerically. Values that do not parse as
/// numbers group after the numerics, keeping their relative order (the sort
/// is stable).
pub fn unique_values<I, S>(values: I) -> Vec<CategoryValue>
where
    I: IntoIterator<Item = S>,
    S: Into<CategoryValue>,
{
    let mut unique: Vec<CategoryValue> = Vec::new();
    for value in values {
        let value = value.into();
        if value.trim().is_empty() {
            continue;
        }
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    // Total order: numerics descending, then non-numerics in first-seen order.
    unique.sort_by(|a, b| {
        match (a.trim().parse::<f64>().ok(), b.trim().parse::<f64>().ok()) {
            (Some(lhs), Some(rhs)) => rhs.total_cmp(&lhs),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
    unique
}

/// Query the unfiltered listing of `source` and extract the distinct values
/// of `field`, descending.
///
/// The listing is requested already ordered descending on `field`; the
/// extraction then projects, deduplicates, and re-sorts defensively so the
/// result does not depend on the service honoring the requested order.
pub fn load_choices(
    source: &dyn RecordSource,
    field: &str,
) -> Result<Vec<CategoryValue>, QueryError> {
    let listing = source.query_all(field, SortDirection::Descending)?;
    let values = listing
        .records
        .iter()
        .map(|record| record.category(field));
    Ok(unique_values(values))
}
