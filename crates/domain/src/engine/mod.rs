//! Decision engine: evaluates every rule against one shared snapshot.
//!
//! Per rule, gates run in a fixed order and the first one that disqualifies
//! the rule produces the skip:
//!
//! 1. [`window`]: is now inside the rule's 5-minute fire window?
//! 2. [`weekday`]: is today an operating day?
//! 3. [`holiday_guard`]: does today's holiday cancel the rule?
//! 4. operation resolution: is `(kind, action)` a supported pair?
//! 5. resource lookup in the [`ResourceSnapshot`]
//! 6. [`decider`]: fire, or idempotent skip
//!
//! The weekday gate runs before the holiday guard, so a holiday falling on
//! a non-operating day is reported as `NotOperatingWeekday`.
//!
//! Evaluation is pure: the same inputs always yield the same decisions, one
//! per rule, in input order.

pub mod decider;
pub mod holiday_guard;
pub mod weekday;
pub mod window;

use chrono::{DateTime, Datelike, TimeZone};

use crate::decision::{Decision, Reason};
use crate::holiday::HolidayCalendar;
use crate::resource::ResourceSnapshot;
use crate::rule::Rule;

/// Evaluate all `rules` at the localized instant `now`.
#[must_use]
pub fn evaluate<Tz: TimeZone>(
    now: &DateTime<Tz>,
    rules: &[Rule],
    calendar: &HolidayCalendar,
    snapshot: &ResourceSnapshot,
) -> Vec<Decision> {
    rules
        .iter()
        .map(|rule| Decision::new(rule, &evaluate_rule(now, rule, calendar, snapshot)))
        .collect()
}

/// Run the gate pipeline for a single rule.
#[must_use]
pub fn evaluate_rule<Tz: TimeZone>(
    now: &DateTime<Tz>,
    rule: &Rule,
    calendar: &HolidayCalendar,
    snapshot: &ResourceSnapshot,
) -> Reason {
    if !window::matches(now, rule) {
        return Reason::OutsideWindow;
    }
    if !weekday::allowed(now, rule) {
        return Reason::NotOperatingWeekday {
            weekday: now.weekday(),
        };
    }
    if let Some(holiday) = holiday_guard::cancelled(now, calendar, rule) {
        return Reason::HolidayCancelled {
            holiday: holiday.to_string(),
        };
    }
    let Some(operation) = rule.operation() else {
        return Reason::UnrecognizedConfiguration;
    };
    let status = snapshot.locate(operation.kind, &rule.resource_id);
    decider::decide(status, operation)
}
