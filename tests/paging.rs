use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use windquery::{
    fetch_all, fetch_all_with, Filter, QueryError, Record, RecordPage, RecordSource,
    SortDirection,
};

/// Source holding `total` matching records, served in stable id order.
struct CountingSource {
    id: String,
    total: usize,
    calls: Arc<AtomicUsize>,
}

impl CountingSource {
    fn new(total: usize, calls: Arc<AtomicUsize>) -> Self {
        Self {
            id: "stations".to_string(),
            total,
            calls,
        }
    }
}

impl RecordSource for CountingSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn query(
        &self,
        filter: &Filter,
        start: usize,
        page_size: usize,
    ) -> Result<RecordPage, QueryError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let end = self.total.min(start.saturating_add(page_size));
        let records = (start..end)
            .map(|idx| {
                Record::new(format!("rec-{idx}"))
                    .with_attribute(filter.field.clone(), filter.value.clone())
            })
            .collect();
        Ok(RecordPage::new(records))
    }

    fn query_all(
        &self,
        _order_by: &str,
        _direction: SortDirection,
    ) -> Result<RecordPage, QueryError> {
        self.query(&Filter::new("WIND_SPEED", "any"), 0, self.total)
    }
}

/// Source that fails on its `fail_at`-th page query (0-based).
struct FailingAtSource {
    inner: CountingSource,
    fail_at: usize,
}

impl RecordSource for FailingAtSource {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn query(
        &self,
        filter: &Filter,
        start: usize,
        page_size: usize,
    ) -> Result<RecordPage, QueryError> {
        let call = self.inner.calls.load(Ordering::Relaxed);
        if call == self.fail_at {
            self.inner.calls.fetch_add(1, Ordering::Relaxed);
            return Err(QueryError::SourceUnavailable {
                source_id: self.id().to_string(),
                reason: "forced failure".into(),
            });
        }
        self.inner.query(filter, start, page_size)
    }

    fn query_all(
        &self,
        order_by: &str,
        direction: SortDirection,
    ) -> Result<RecordPage, QueryError> {
        self.inner.query_all(order_by, direction)
    }
}

fn expected_calls(total: usize, page_size: usize) -> usize {
    // ceil(total / page_size), except exact multiples (including zero) pay
    // one extra trip to observe the terminating short page. Both cases
    // collapse to the same integer expression.
    total / page_size + 1
}

#[test]
fn drains_all_pages_in_order() {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = CountingSource::new(7, calls.clone());
    let filter = Filter::new("WIND_SPEED", "15");

    let outcome = fetch_all(&source, &filter, 3).unwrap();
    assert_eq!(outcome.record_count, 7);
    assert_eq!(outcome.pages, 3);
    assert_eq!(calls.load(Ordering::Relaxed), 3);

    let ids: Vec<&str> = outcome.records.iter().map(|r| r.id.as_str()).collect();
    let expected: Vec<String> = (0..7).map(|idx| format!("rec-{idx}")).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn exact_multiple_costs_one_extra_round_trip() {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = CountingSource::new(6, calls.clone());
    let filter = Filter::new("WIND_SPEED", "15");

    let outcome = fetch_all(&source, &filter, 3).unwrap();
    assert_eq!(outcome.record_count, 6);
    assert_eq!(outcome.pages, 3);
    assert_eq!(calls.load(Ordering::Relaxed), 3);
}

#[test]
fn empty_result_terminates_after_one_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = CountingSource::new(0, calls.clone());
    let filter = Filter::new("WIND_SPEED", "99");

    let outcome = fetch_all(&source, &filter, 5).unwrap();
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.pages, 1);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn call_count_matches_page_math_across_sizes() {
    for total in 0..=10usize {
        for page_size in 1..=4usize {
            let calls = Arc::new(AtomicUsize::new(0));
            let source = CountingSource::new(total, calls.clone());
            let filter = Filter::new("WIND_SPEED", "15");

            let outcome = fetch_all(&source, &filter, page_size).unwrap();
            assert_eq!(outcome.record_count, total, "total={total} page={page_size}");
            assert_eq!(
                calls.load(Ordering::Relaxed),
                expected_calls(total, page_size),
                "total={total} page={page_size}"
            );
        }
    }
}

#[test]
fn zero_page_size_is_a_configuration_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = CountingSource::new(5, calls.clone());
    let filter = Filter::new("WIND_SPEED", "15");

    let result = fetch_all(&source, &filter, 0);
    assert!(matches!(result, Err(QueryError::Configuration(_))));
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn source_failure_aborts_and_propagates() {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = FailingAtSource {
        inner: CountingSource::new(9, calls.clone()),
        fail_at: 1,
    };
    let filter = Filter::new("WIND_SPEED", "15");

    let result = fetch_all(&source, &filter, 3);
    assert!(matches!(result, Err(QueryError::SourceUnavailable { .. })));
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn oversized_page_is_reported_as_inconsistent() {
    struct OversizedSource;
    impl RecordSource for OversizedSource {
        fn id(&self) -> &str {
            "broken"
        }
        fn query(
            &self,
            filter: &Filter,
            _start: usize,
            page_size: usize,
        ) -> Result<RecordPage, QueryError> {
            let records = (0..page_size + 1)
                .map(|idx| {
                    Record::new(format!("rec-{idx}"))
                        .with_attribute(filter.field.clone(), filter.value.clone())
                })
                .collect();
            Ok(RecordPage::new(records))
        }
        fn query_all(
            &self,
            _order_by: &str,
            _direction: SortDirection,
        ) -> Result<RecordPage, QueryError> {
            Ok(RecordPage::default())
        }
    }

    let filter = Filter::new("WIND_SPEED", "15");
    let result = fetch_all(&OversizedSource, &filter, 4);
    assert!(matches!(result, Err(QueryError::SourceInconsistent { .. })));
}

#[test]
fn supersede_check_aborts_between_pages() {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = CountingSource::new(9, calls.clone());
    let filter = Filter::new("WIND_SPEED", "15");
    let cancel = AtomicBool::new(false);

    let result = fetch_all_with(&source, &filter, 3, || {
        // Flip after the first page has been consumed.
        if calls.load(Ordering::Relaxed) >= 1 {
            cancel.store(true, Ordering::Relaxed);
        }
        cancel.load(Ordering::Relaxed)
    });
    assert!(matches!(result, Err(QueryError::Superseded)));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}
