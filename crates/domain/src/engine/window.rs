//! Time window matcher: is "now" inside the rule's fire window?

use chrono::{DateTime, TimeDelta, TimeZone};

use crate::rule::Rule;

/// Length of the fire window, starting at the rule's target minute.
pub const FIRE_WINDOW_SECS: i64 = 300;

/// The rule's target instant on the local date of `now`.
///
/// `None` when the target time is out of range or falls into a DST gap;
/// ambiguous local times resolve to the earliest instant.
#[must_use]
pub fn target_instant<Tz: TimeZone>(now: &DateTime<Tz>, rule: &Rule) -> Option<DateTime<Tz>> {
    let local = now.date_naive().and_time(rule.target_time()?);
    now.timezone().from_local_datetime(&local).earliest()
}

/// True iff `0 <= now - target < FIRE_WINDOW_SECS`.
#[must_use]
pub fn matches<Tz: TimeZone>(now: &DateTime<Tz>, rule: &Rule) -> bool {
    let Some(target) = target_instant(now, rule) else {
        return false;
    };
    let elapsed = now.naive_utc() - target.naive_utc();
    elapsed >= TimeDelta::zero() && elapsed < TimeDelta::seconds(FIRE_WINDOW_SECS)
}
