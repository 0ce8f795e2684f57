//! Visualization sink boundary.
//!
//! Rendering is the host application's job: markers, legend, result list,
//! and the chart itself live behind this trait. The engine only delivers
//! plain data and a clear signal.

use std::sync::{Arc, Mutex};

use crate::distribution::DistributionEntry;
use crate::record::{LayerKind, Record};
use crate::types::RecordId;

/// Consumer of retrieved records and computed distributions.
pub trait VisualizationSink: Send {
    /// Render a complete query result set tagged with its layer kind.
    fn render_records(&mut self, records: &[Record], layer: LayerKind);

    /// Render the distribution computed for the latest query.
    fn render_distribution(&mut self, entries: &[DistributionEntry]);

    /// Remove all rendered artifacts.
    fn clear(&mut self);
}

/// One `render_records` call observed by a [`CollectingSink`].
#[derive(Clone, Debug)]
pub struct RenderedSet {
    /// Layer tag the records were rendered under.
    pub layer: LayerKind,
    /// Ids of the rendered records, in delivery order.
    pub record_ids: Vec<RecordId>,
}

#[derive(Default)]
struct Collected {
    record_sets: Vec<RenderedSet>,
    distributions: Vec<Vec<DistributionEntry>>,
    clears: usize,
}

/// Sink that records every call for inspection.
///
/// Clones share the same storage, so tests can keep a handle while the
/// session owns the boxed sink.
#[derive(Clone, Default)]
pub struct CollectingSink {
    inner: Arc<Mutex<Collected>>,
}

impl CollectingSink {
    /// Create an empty collecting sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All record sets delivered so far.
    pub fn record_sets(&self) -> Vec<RenderedSet> {
        self.inner.lock().expect("sink poisoned").record_sets.clone()
    }

    /// All distributions delivered so far.
    pub fn distributions(&self) -> Vec<Vec<DistributionEntry>> {
        self.inner
            .lock()
            .expect("sink poisoned")
            .distributions
            .clone()
    }

    /// Number of clear signals received.
    pub fn clear_count(&self) -> usize {
        self.inner.lock().expect("sink poisoned").clears
    }

    /// Whether nothing has been rendered since the last clear (or ever).
    pub fn is_empty(&self) -> bool {
        let inner = self.inner.lock().expect("sink poisoned");
        inner.record_sets.is_empty() && inner.distributions.is_empty()
    }
}

impl VisualizationSink for CollectingSink {
    fn render_records(&mut self, records: &[Record], layer: LayerKind) {
        let set = RenderedSet {
            layer,
            record_ids: records.iter().map(|record| record.id.clone()).collect(),
        };
        self.inner
            .lock()
            .expect("sink poisoned")
            .record_sets
            .push(set);
    }

    fn render_distribution(&mut self, entries: &[DistributionEntry]) {
        self.inner
            .lock()
            .expect("sink poisoned")
            .distributions
            .push(entries.to_vec());
    }

    fn clear(&mut self) {
        let mut inner = self.inner.lock().expect("sink poisoned");
        inner.record_sets.clear();
        inner.distributions.clear();
        inner.clears += 1;
    }
}
