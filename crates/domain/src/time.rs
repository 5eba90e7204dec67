//! Clock access.
//!
//! Instants are always carried in UTC and localized by the caller with the
//! operating timezone just before evaluation.

use chrono::{DateTime, Utc};

/// An absolute instant: evaluation time, snapshot time, report time.
pub type Timestamp = DateTime<Utc>;

/// The current instant from the system clock.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
