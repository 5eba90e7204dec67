//! Decision log port: audit trail of invocation reports.

use std::future::Future;

use offhours_domain::error::OffhoursError;
use offhours_domain::id::InvocationId;
use offhours_domain::report::InvocationReport;

/// Append-only store for [`InvocationReport`]s.
pub trait DecisionLog {
    /// Persist a finished report.
    fn record(
        &self,
        report: &InvocationReport,
    ) -> impl Future<Output = Result<(), OffhoursError>> + Send;

    /// Get a report by its unique identifier.
    fn get_by_id(
        &self,
        id: InvocationId,
    ) -> impl Future<Output = Result<Option<InvocationReport>, OffhoursError>> + Send;

    /// Get the most recent reports, newest first.
    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<InvocationReport>, OffhoursError>> + Send;
}

impl<T: DecisionLog + Send + Sync> DecisionLog for std::sync::Arc<T> {
    fn record(
        &self,
        report: &InvocationReport,
    ) -> impl Future<Output = Result<(), OffhoursError>> + Send {
        (**self).record(report)
    }

    fn get_by_id(
        &self,
        id: InvocationId,
    ) -> impl Future<Output = Result<Option<InvocationReport>, OffhoursError>> + Send {
        (**self).get_by_id(id)
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<InvocationReport>, OffhoursError>> + Send {
        (**self).recent(limit)
    }
}
