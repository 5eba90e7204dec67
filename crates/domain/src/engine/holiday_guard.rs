//! Holiday guard: does today's holiday cancel the rule?

use chrono::{DateTime, TimeZone};

use crate::holiday::HolidayCalendar;
use crate::rule::{HolidayPolicy, Rule};

/// The name of today's holiday when it cancels `rule`.
///
/// Only rules with [`HolidayPolicy::CancelOnHoliday`] are ever cancelled.
#[must_use]
pub fn cancelled<'a, Tz: TimeZone>(
    now: &DateTime<Tz>,
    calendar: &'a HolidayCalendar,
    rule: &Rule,
) -> Option<&'a str> {
    match rule.holiday_policy {
        HolidayPolicy::Ignore => None,
        HolidayPolicy::CancelOnHoliday => calendar.holiday_on(now.date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};

    fn calendar() -> HolidayCalendar {
        let mut calendar = HolidayCalendar::new();
        calendar.insert(NaiveDate::from_ymd_opt(2026, 11, 3).unwrap(), "Culture Day");
        calendar
    }

    fn rule(policy: HolidayPolicy) -> Rule {
        Rule::builder()
            .name("holiday aware")
            .resource_id("i-1")
            .holiday_policy(policy)
            .build()
            .unwrap()
    }

    fn tokyo(day: u32, hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 11, day, hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn should_cancel_on_holiday_with_name() {
        let calendar = calendar();
        assert_eq!(
            cancelled(&tokyo(3, 9), &calendar, &rule(HolidayPolicy::CancelOnHoliday)),
            Some("Culture Day")
        );
    }

    #[test]
    fn should_not_cancel_when_policy_is_ignore() {
        let calendar = calendar();
        assert!(cancelled(&tokyo(3, 9), &calendar, &rule(HolidayPolicy::Ignore)).is_none());
    }

    #[test]
    fn should_not_cancel_on_regular_day() {
        let calendar = calendar();
        assert!(
            cancelled(&tokyo(4, 9), &calendar, &rule(HolidayPolicy::CancelOnHoliday)).is_none()
        );
    }

    #[test]
    fn should_use_local_date_for_lookup() {
        // 2026-11-03 00:30 in UTC+9 is still 2026-11-02 in UTC.
        let calendar = calendar();
        let local = tokyo(3, 0) + chrono::TimeDelta::minutes(30);
        let utc = local.with_timezone(&chrono::Utc);
        let rule = rule(HolidayPolicy::CancelOnHoliday);
        assert!(cancelled(&local, &calendar, &rule).is_some());
        assert!(cancelled(&utc, &calendar, &rule).is_none());
    }
}
