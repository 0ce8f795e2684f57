//! Batched fetch: drain every page of a filtered query into one result set.

use tracing::debug;

use crate::errors::QueryError;
use crate::record::Record;
use crate::source::{Filter, RecordSource};

/// Result of one complete batched fetch.
#[derive(Clone, Debug)]
pub struct FetchOutcome {
    /// All retrieved records in page order.
    pub records: Vec<Record>,
    /// Number of page round trips issued, including a trailing empty page
    /// when the record count is an exact multiple of the page size.
    pub pages: usize,
    /// Total records retrieved; equals `records.len()`.
    pub record_count: usize,
}

/// Per-invocation fetch state.
///
/// Created fresh for every batched fetch so concurrent fetches can never
/// share counters or a record buffer. Invariant: the next page request
/// starts at `batch_index * page_size`.
struct FetchState {
    batch_index: usize,
    records: Vec<Record>,
}

/// Drain all pages of `filter` against `source`.
///
/// Issues page queries until a short page (fewer than `page_size` records)
/// terminates the loop. On a source error the accumulated buffer is
/// discarded and the error propagates; callers must not render anything for
/// the failed attempt.
pub fn fetch_all(
    source: &dyn RecordSource,
    filter: &Filter,
    page_size: usize,
) -> Result<FetchOutcome, QueryError> {
    fetch_all_with(source, filter, page_size, || false)
}

/// [`fetch_all`] with a supersede check evaluated between pages.
///
/// When `superseded` returns true the fetch aborts with
/// [`QueryError::Superseded`] instead of issuing the next page request.
/// Sessions use this to let a newer query cancel an older in-flight fetch.
pub fn fetch_all_with(
    source: &dyn RecordSource,
    filter: &Filter,
    page_size: usize,
    mut superseded: impl FnMut() -> bool,
) -> Result<FetchOutcome, QueryError> {
    if page_size == 0 {
        return Err(QueryError::Configuration(
            "page_size must be at least 1".into(),
        ));
    }

    let mut state = FetchState {
        batch_index: 0,
        records: Vec::new(),
    };

    loop {
        if state.batch_index > 0 && superseded() {
            debug!(
                source = source.id(),
                filter = %filter,
                pages = state.batch_index,
                "batched fetch superseded"
            );
            return Err(QueryError::Superseded);
        }

        let start = state.batch_index * page_size;
        let page = source.query(filter, start, page_size)?;
        let page_len = page.len();
        if page_len > page_size {
            return Err(QueryError::SourceInconsistent {
                source_id: source.id().to_string(),
                details: format!(
                    "page of {page_len} records exceeds requested page size {page_size}"
                ),
            });
        }

        debug!(
            source = source.id(),
            filter = %filter,
            batch = state.batch_index,
            start,
            page_len,
            "fetched page"
        );

        state.records.extend(page.records);
        state.batch_index += 1;

        // A full page means more records may exist; a short page is final.
        if page_len < page_size {
            break;
        }
    }

    let record_count = state.records.len();
    Ok(FetchOutcome {
        records: state.records,
        pages: state.batch_index,
        record_count,
    })
}
