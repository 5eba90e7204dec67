//! Report service: read access to recorded invocations.

use offhours_domain::error::{NotFoundError, OffhoursError};
use offhours_domain::id::InvocationId;
use offhours_domain::report::InvocationReport;

use crate::ports::DecisionLog;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_RECENT_LIMIT: usize = 20;
/// Largest page a caller can request.
pub const MAX_RECENT_LIMIT: usize = 200;

/// Application service for browsing the decision log.
pub struct ReportService<D> {
    log: D,
}

impl<D: DecisionLog> ReportService<D> {
    /// Create a new service backed by the given decision log.
    pub fn new(log: D) -> Self {
        Self { log }
    }

    /// Look up a report by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`OffhoursError::NotFound`] when no invocation with `id` was
    /// recorded, or a storage error from the log.
    #[tracing::instrument(skip(self))]
    pub async fn get_report(&self, id: InvocationId) -> Result<InvocationReport, OffhoursError> {
        self.log.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Invocation",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Most recent reports, newest first. `limit` is clamped to
    /// `1..=MAX_RECENT_LIMIT`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the log.
    pub async fn recent(&self, limit: Option<usize>) -> Result<Vec<InvocationReport>, OffhoursError> {
        let limit = limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT);
        self.log.recent(limit).await
    }
}
