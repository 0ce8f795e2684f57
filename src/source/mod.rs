//! Record source interfaces and paging contract.
//!
//! Ownership model:
//! - `RecordSource` is the engine-facing boundary of the backing service.
//! - A page request is immutable once issued: filter, start offset, page size.
//! - A returned page of exactly `page_size` records means more may exist;
//!   a short page terminates a batched fetch.

use std::fmt;

use crate::errors::QueryError;
use crate::record::Record;
use crate::types::FieldName;

/// Built-in source implementations.
pub mod memory;
pub use memory::InMemorySource;

/// Equality filter predicate (`attribute = literal`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    /// Attribute to compare.
    pub field: FieldName,
    /// Literal the attribute must equal, in display form.
    pub value: String,
}

impl Filter {
    /// Create an equality filter on `field`.
    pub fn new(field: impl Into<FieldName>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Filter {
    /// Definition-expression form, e.g. `WIND_SPEED = '15'`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = '{}'", self.field, self.value)
    }
}

/// Sort direction for unfiltered listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest values first.
    Ascending,
    /// Largest values first.
    Descending,
}

/// One bounded-size response from a source.
#[derive(Clone, Debug, Default)]
pub struct RecordPage {
    /// Records in source order.
    pub records: Vec<Record>,
}

impl RecordPage {
    /// Page over an owned record vector.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Engine-facing interface of the paginated backing service.
///
/// Implementations must honor the paging contract: return at most
/// `page_size` records starting at `start` among the records matching
/// `filter`, preserving one stable overall order across calls.
pub trait RecordSource: Send + Sync {
    /// Stable source identifier used in errors and logs.
    fn id(&self) -> &str;

    /// Fetch one page of records matching `filter`.
    fn query(
        &self,
        filter: &Filter,
        start: usize,
        page_size: usize,
    ) -> Result<RecordPage, QueryError>;

    /// Fetch the full unfiltered listing ordered by `order_by`.
    ///
    /// Feeds the unique-value extractor; ordering is the service's, not a
    /// re-sort done by the engine.
    fn query_all(&self, order_by: &str, direction: SortDirection)
        -> Result<RecordPage, QueryError>;
}
