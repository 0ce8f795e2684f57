#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Wind-speed class breaks for marker and legend styling.
pub mod breaks;
/// Chart and legend JSON payload builders.
pub mod chart;
/// Fetch and aggregation configuration types.
pub mod config;
/// Categorical distribution calculator.
pub mod distribution;
/// Batched page-draining fetch.
pub mod fetch;
/// Record payload and attribute types.
pub mod record;
/// Query session lifecycle and cumulative counters.
pub mod session;
/// Visualization sink boundary and test sink.
pub mod sink;
/// Record source traits and built-in sources.
pub mod source;
/// Shared type aliases.
pub mod types;
/// Distinct-value extraction for selection controls.
pub mod values;

mod errors;

pub use breaks::{classify, wind_speed_breaks, ClassBreak};
pub use chart::{class_breaks_json, percentage_color, pie_chart_json};
pub use config::{DenominatorPolicy, FetchConfig, OverlapPolicy};
pub use distribution::{distribution, DistributionEntry};
pub use errors::QueryError;
pub use fetch::{fetch_all, fetch_all_with, FetchOutcome};
pub use record::{AttributeValue, LayerKind, Position, Record};
pub use session::{QueryOutcome, QuerySession, SessionPhase};
pub use sink::{CollectingSink, RenderedSet, VisualizationSink};
pub use source::{Filter, InMemorySource, RecordPage, RecordSource, SortDirection};
pub use types::{CategoryValue, FieldName, RecordId, SourceId};
pub use values::{load_choices, unique_values};
