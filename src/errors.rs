use thiserror::Error;

use crate::types::SourceId;

/// Error type for source, configuration, and fetch-lifecycle failures.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The source rejected or could not serve a query.
    #[error("record source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable {
        /// Source that failed.
        source_id: SourceId,
        /// Reason reported by the source.
        reason: String,
    },
    /// The source violated the paging contract.
    #[error("record source '{source_id}' returned inconsistent state: {details}")]
    SourceInconsistent {
        /// Source that misbehaved.
        source_id: SourceId,
        /// Description of the violation.
        details: String,
    },
    /// Invalid fetch configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A second query was rejected under [`OverlapPolicy::Reject`].
    ///
    /// [`OverlapPolicy::Reject`]: crate::config::OverlapPolicy::Reject
    #[error("a batched fetch is already in flight for this session")]
    FetchInProgress,
    /// A newer query aborted this fetch under [`OverlapPolicy::Supersede`].
    ///
    /// [`OverlapPolicy::Supersede`]: crate::config::OverlapPolicy::Supersede
    #[error("batched fetch was superseded by a newer query")]
    Superseded,
}
