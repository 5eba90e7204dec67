//! Shared application state for axum handlers.

use std::sync::Arc;

use chrono::TimeZone;
use offhours_app::scheduler::Scheduler;
use offhours_app::services::report_service::ReportService;

/// Application state shared across all axum handlers.
///
/// Generic over the port implementations to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`: only the `Arc` wrappers are cloned.
pub struct AppState<H, E, L, D, Tz: TimeZone> {
    /// Runs invocations; shared with the periodic trigger.
    pub scheduler: Arc<Scheduler<H, E, L, D, Tz>>,
    /// Reads the decision log.
    pub reports: Arc<ReportService<D>>,
}

impl<H, E, L, D, Tz: TimeZone> Clone for AppState<H, E, L, D, Tz> {
    fn clone(&self) -> Self {
        Self {
            scheduler: Arc::clone(&self.scheduler),
            reports: Arc::clone(&self.reports),
        }
    }
}

impl<H, E, L, D, Tz: TimeZone> AppState<H, E, L, D, Tz> {
    /// Create the state from services that may already be shared with
    /// background tasks.
    pub fn new(
        scheduler: Arc<Scheduler<H, E, L, D, Tz>>,
        reports: Arc<ReportService<D>>,
    ) -> Self {
        Self { scheduler, reports }
    }
}
