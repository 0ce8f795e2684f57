use std::cmp::Ordering;

use crate::errors::QueryError;
use crate::record::Record;
use crate::source::{Filter, RecordPage, RecordSource, SortDirection};
use crate::types::SourceId;

/// In-memory `RecordSource` backed by a record vector.
///
/// Used by tests and demos; paging slices the filtered set in stored order,
/// so repeated page queries observe one stable overall order.
pub struct InMemorySource {
    id: SourceId,
    records: Vec<Record>,
}

impl InMemorySource {
    /// Create a source over `records` with stable id `id`.
    pub fn new(id: impl Into<SourceId>, records: Vec<Record>) -> Self {
        Self {
            id: id.into(),
            records,
        }
    }

    /// Number of records held, ignoring any filter.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn query(
        &self,
        filter: &Filter,
        start: usize,
        page_size: usize,
    ) -> Result<RecordPage, QueryError> {
        let records = self
            .records
            .iter()
            .filter(|record| {
                record
                    .attribute(&filter.field)
                    .is_some_and(|value| value.matches_literal(&filter.value))
            })
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();
        Ok(RecordPage::new(records))
    }

    fn query_all(
        &self,
        order_by: &str,
        direction: SortDirection,
    ) -> Result<RecordPage, QueryError> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| {
            let ordering = compare_attribute(a, b, order_by);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        Ok(RecordPage::new(records))
    }
}

/// Compare two records on one attribute, numerically when both sides parse.
fn compare_attribute(a: &Record, b: &Record, field: &str) -> Ordering {
    let left = a.attribute(field);
    let right = b.attribute(field);
    match (
        left.and_then(|value| value.as_number()),
        right.and_then(|value| value.as_number()),
    ) {
        (Some(lhs), Some(rhs)) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
        _ => {
            let lhs = left.map(|value| value.display()).unwrap_or_default();
            let rhs = right.map(|value| value.display()).unwrap_or_default();
            lhs.cmp(&rhs)
        }
    }
}
