//! Query session lifecycle: cumulative totals, overlap policy, clear semantics.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::config::{DenominatorPolicy, FetchConfig, OverlapPolicy};
use crate::distribution::{distribution, DistributionEntry};
use crate::errors::QueryError;
use crate::fetch::fetch_all_with;
use crate::record::{LayerKind, Record};
use crate::sink::VisualizationSink;
use crate::source::{Filter, RecordSource};
use crate::types::CategoryValue;
use crate::values::load_choices;

/// Lifecycle phase of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No query has run since creation or the last clear.
    Idle,
    /// A batched fetch is in flight.
    Fetching,
    /// A full result set has been delivered to the sink.
    Displayed,
}

/// Result of one successful query, returned to the caller after the sink
/// has consumed the same data.
#[derive(Clone, Debug)]
pub struct QueryOutcome {
    /// All retrieved records in page order.
    pub records: Vec<Record>,
    /// Record count for this query alone.
    pub record_count: usize,
    /// Page round trips issued by the batched fetch.
    pub pages: usize,
    /// Running total of records shown across the session, after this query.
    pub total_records_shown: usize,
    /// Distribution entries delivered to the sink.
    pub distribution: Vec<DistributionEntry>,
}

struct SessionCounters {
    total_records_shown: usize,
    phase: SessionPhase,
}

type ValueSelectedHook = Box<dyn FnMut(&str) + Send>;

/// One viewer session: the lifetime between clear operations, during which
/// totals accumulate.
///
/// Counters that the original viewer held at module scope live here, and the
/// per-fetch state lives inside each fetch invocation, so two sessions (or
/// two fetches) can never corrupt each other's batch index or record buffer.
pub struct QuerySession {
    config: FetchConfig,
    sink: Mutex<Box<dyn VisualizationSink>>,
    counters: Mutex<SessionCounters>,
    generation: AtomicU64,
    fetch_gate: AtomicBool,
    value_selected_hook: Mutex<Option<ValueSelectedHook>>,
}

impl QuerySession {
    /// Create a session that delivers results to `sink`.
    pub fn new(config: FetchConfig, sink: Box<dyn VisualizationSink>) -> Self {
        Self {
            config,
            sink: Mutex::new(sink),
            counters: Mutex::new(SessionCounters {
                total_records_shown: 0,
                phase: SessionPhase::Idle,
            }),
            generation: AtomicU64::new(0),
            fetch_gate: AtomicBool::new(false),
            value_selected_hook: Mutex::new(None),
        }
    }

    /// Running total of records shown since the last clear.
    pub fn total_records_shown(&self) -> usize {
        self.counters
            .lock()
            .expect("session counters poisoned")
            .total_records_shown
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.counters
            .lock()
            .expect("session counters poisoned")
            .phase
    }

    /// Register the hook invoked when a choice is implicitly selected.
    ///
    /// [`populate_choices`](Self::populate_choices) calls it with the first
    /// choice, mirroring a selection control that auto-selects its first
    /// option and must then trigger the same filtering a user would.
    pub fn set_value_selected_hook(&self, hook: impl FnMut(&str) + Send + 'static) {
        *self
            .value_selected_hook
            .lock()
            .expect("session hook poisoned") = Some(Box::new(hook));
    }

    /// Load the distinct choices of `field` from `source` and implicitly
    /// select the first one via the registered hook.
    pub fn populate_choices(
        &self,
        source: &dyn RecordSource,
        field: &str,
    ) -> Result<Vec<CategoryValue>, QueryError> {
        let choices = load_choices(source, field)?;
        if let Some(first) = choices.first() {
            let mut hook = self
                .value_selected_hook
                .lock()
                .expect("session hook poisoned");
            if let Some(hook) = hook.as_mut() {
                hook(first);
            }
        }
        Ok(choices)
    }

    /// Invalidate any in-flight fetch started under
    /// [`OverlapPolicy::Supersede`]; it aborts before its next page request.
    pub fn supersede(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Run one batched query for `field = value` against `source` and
    /// deliver the result set plus its distribution to the sink.
    ///
    /// On a source failure nothing reaches the sink and the totals of prior
    /// queries stay untouched.
    pub fn run_query(
        &self,
        source: &dyn RecordSource,
        layer: LayerKind,
        field: &str,
        value: &str,
    ) -> Result<QueryOutcome, QueryError> {
        self.config.validate()?;

        let _gate = match self.config.overlap {
            OverlapPolicy::Reject => Some(FetchGate::acquire(&self.fetch_gate)?),
            OverlapPolicy::Supersede => None,
        };
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.set_phase(SessionPhase::Fetching);

        let filter = Filter::new(field, value);
        let fetched = fetch_all_with(source, &filter, self.config.page_size, || {
            self.config.overlap == OverlapPolicy::Supersede
                && self.generation.load(Ordering::SeqCst) != my_generation
        });

        let outcome = match fetched {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(
                    source = source.id(),
                    filter = %filter,
                    %error,
                    "batched fetch failed; nothing rendered"
                );
                self.restore_phase_after_failure();
                return Err(error);
            }
        };

        let total_records_shown = {
            let mut counters = self.counters.lock().expect("session counters poisoned");
            counters.total_records_shown += outcome.record_count;
            counters.phase = SessionPhase::Displayed;
            counters.total_records_shown
        };

        let denominator = match self.config.denominator {
            DenominatorPolicy::Cumulative => total_records_shown,
            DenominatorPolicy::PerQuery => outcome.record_count,
        };
        let categories: Vec<CategoryValue> = outcome
            .records
            .iter()
            .map(|record| record.category(field))
            .collect();
        let entries = distribution(&categories, denominator);

        debug!(
            source = source.id(),
            layer = layer.as_str(),
            filter = %filter,
            records = outcome.record_count,
            pages = outcome.pages,
            total_records_shown,
            categories = entries.len(),
            "query complete"
        );

        {
            let mut sink = self.sink.lock().expect("session sink poisoned");
            sink.render_records(&outcome.records, layer);
            sink.render_distribution(&entries);
        }

        Ok(QueryOutcome {
            records: outcome.records,
            record_count: outcome.record_count,
            pages: outcome.pages,
            total_records_shown,
            distribution: entries,
        })
    }

    /// Reset the session: zero the running total, return to `Idle`, and
    /// signal the sink to remove all rendered artifacts.
    pub fn clear(&self) {
        {
            let mut counters = self.counters.lock().expect("session counters poisoned");
            counters.total_records_shown = 0;
            counters.phase = SessionPhase::Idle;
        }
        self.sink.lock().expect("session sink poisoned").clear();
        debug!("session cleared");
    }

    fn set_phase(&self, phase: SessionPhase) {
        self.counters
            .lock()
            .expect("session counters poisoned")
            .phase = phase;
    }

    fn restore_phase_after_failure(&self) {
        let mut counters = self.counters.lock().expect("session counters poisoned");
        counters.phase = if counters.total_records_shown > 0 {
            SessionPhase::Displayed
        } else {
            SessionPhase::Idle
        };
    }
}

/// Holds the reject-policy gate for the duration of one fetch.
struct FetchGate<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FetchGate<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, QueryError> {
        if flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(QueryError::FetchInProgress);
        }
        Ok(Self { flag })
    }
}

impl Drop for FetchGate<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::sink::CollectingSink;
    use crate::source::InMemorySource;

    fn speed_records(count: usize, speed: &str) -> Vec<Record> {
        (0..count)
            .map(|idx| {
                Record::new(format!("stations::{speed}-{idx}"))
                    .with_attribute("WIND_SPEED", speed)
            })
            .collect()
    }

    #[test]
    fn phases_advance_through_displayed_and_back_to_idle() {
        let source = InMemorySource::new("stations", speed_records(3, "10"));
        let sink = CollectingSink::new();
        let session = QuerySession::new(FetchConfig::default(), Box::new(sink));

        assert_eq!(session.phase(), SessionPhase::Idle);
        session
            .run_query(&source, LayerKind::Stations, "WIND_SPEED", "10")
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::Displayed);
        session.clear();
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn populate_choices_selects_first_via_hook() {
        let mut records = speed_records(2, "10");
        records.extend(speed_records(1, "25"));
        let source = InMemorySource::new("stations", records);
        let session = QuerySession::new(FetchConfig::default(), Box::new(CollectingSink::new()));

        let selected = std::sync::Arc::new(Mutex::new(None::<String>));
        let seen = selected.clone();
        session.set_value_selected_hook(move |value| {
            *seen.lock().unwrap() = Some(value.to_string());
        });

        let choices = session.populate_choices(&source, "WIND_SPEED").unwrap();
        assert_eq!(choices, vec!["25", "10"]);
        assert_eq!(selected.lock().unwrap().as_deref(), Some("25"));
    }

    #[test]
    fn populate_choices_without_values_skips_hook() {
        let source = InMemorySource::new("stations", Vec::new());
        let session = QuerySession::new(FetchConfig::default(), Box::new(CollectingSink::new()));
        session.set_value_selected_hook(|_| panic!("hook must not fire"));
        let choices = session.populate_choices(&source, "WIND_SPEED").unwrap();
        assert!(choices.is_empty());
    }
}
