use crate::errors::QueryError;

/// Denominator used when converting category counts into percentages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenominatorPolicy {
    /// Divide by the running total of records shown across the whole session.
    ///
    /// This matches the observed behavior of the original viewer: after
    /// several queries, one query's slices no longer sum to 100%.
    Cumulative,
    /// Divide by the record count of the current query only.
    PerQuery,
}

/// Policy applied when a new query starts while a fetch is still in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Fail the new query with [`QueryError::FetchInProgress`].
    Reject,
    /// Let the new query proceed; the older fetch aborts between pages
    /// with [`QueryError::Superseded`].
    Supersede,
}

/// Top-level fetch and aggregation configuration.
#[derive(Clone, Debug)]
pub struct FetchConfig {
    /// Maximum records requested per page. The backing service caps single
    /// responses, so this is also the "more pages exist" threshold.
    pub page_size: usize,
    /// Percentage denominator policy for distributions.
    pub denominator: DenominatorPolicy,
    /// Behavior for overlapping fetches within one session.
    pub overlap: OverlapPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            // Hosted feature services commonly cap responses at 1000 records.
            page_size: 1000,
            denominator: DenominatorPolicy::Cumulative,
            overlap: OverlapPolicy::Reject,
        }
    }
}

impl FetchConfig {
    /// Validate the configuration before a session uses it.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page_size == 0 {
            return Err(QueryError::Configuration(
                "page_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Override the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Override the percentage denominator policy.
    pub fn with_denominator(mut self, denominator: DenominatorPolicy) -> Self {
        self.denominator = denominator;
        self
    }

    /// Override the overlapping-fetch policy.
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(FetchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = FetchConfig::default().with_page_size(0);
        assert!(matches!(
            config.validate(),
            Err(QueryError::Configuration(_))
        ));
    }
}
