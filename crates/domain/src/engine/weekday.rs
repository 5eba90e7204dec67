//! Weekday filter: is today an operating day for the rule?

use chrono::{DateTime, Datelike, TimeZone};

use crate::rule::Rule;

/// True iff the local weekday of `now` is in `rule.weekdays`.
///
/// `now` must be the same localized instant handed to the window matcher.
#[must_use]
pub fn allowed<Tz: TimeZone>(now: &DateTime<Tz>, rule: &Rule) -> bool {
    rule.weekdays.contains(now.weekday())
}
