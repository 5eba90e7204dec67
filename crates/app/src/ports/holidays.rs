//! Holiday source port: the remote public-holiday calendar.

use std::future::Future;

use offhours_domain::error::OffhoursError;
use offhours_domain::holiday::HolidayCalendar;

/// Supplies the holiday calendar for one calendar year.
pub trait HolidaySource {
    /// Fetch all holidays of `year`, keyed by local date.
    ///
    /// Failures are fatal to the invocation and should be reported as
    /// [`OffhoursError::Upstream`].
    fn fetch(&self, year: i32) -> impl Future<Output = Result<HolidayCalendar, OffhoursError>> + Send;
}

impl<T: HolidaySource + Send + Sync> HolidaySource for std::sync::Arc<T> {
    fn fetch(&self, year: i32) -> impl Future<Output = Result<HolidayCalendar, OffhoursError>> + Send {
        (**self).fetch(year)
    }
}
