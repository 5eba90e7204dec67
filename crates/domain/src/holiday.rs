//! Holiday calendar: public holidays in the operating timezone.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Mapping from local calendar date to the holiday's display name.
///
/// A date absent from the mapping is not a holiday. Deserialises from the
/// common JSON shape `{"2026-01-01": "New Year's Day", …}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCalendar(BTreeMap<NaiveDate, String>);

impl HolidayCalendar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a holiday.
    pub fn insert(&mut self, date: NaiveDate, name: impl Into<String>) {
        self.0.insert(date, name.into());
    }

    /// Display name of the holiday on `date`, if any.
    #[must_use]
    pub fn holiday_on(&self, date: NaiveDate) -> Option<&str> {
        self.0.get(&date).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries that fall outside `year`.
    ///
    /// The holiday source is expected to return a single year; callers log
    /// a warning when this is non-zero.
    #[must_use]
    pub fn count_outside_year(&self, year: i32) -> usize {
        self.0.keys().filter(|date| date.year() != year).count()
    }
}

impl FromIterator<(NaiveDate, String)> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn should_return_name_when_date_is_holiday() {
        let mut calendar = HolidayCalendar::new();
        calendar.insert(date(2026, 5, 5), "Children's Day");
        assert_eq!(calendar.holiday_on(date(2026, 5, 5)), Some("Children's Day"));
    }

    #[test]
    fn should_return_none_when_date_is_absent() {
        let calendar = HolidayCalendar::new();
        assert!(calendar.holiday_on(date(2026, 5, 6)).is_none());
        assert!(calendar.is_empty());
    }

    #[test]
    fn should_deserialize_from_date_keyed_json_object() {
        let json = r#"{"2026-01-01": "New Year's Day", "2026-01-12": "Coming of Age Day"}"#;
        let calendar: HolidayCalendar = serde_json::from_str(json).unwrap();
        assert_eq!(calendar.len(), 2);
        assert_eq!(
            calendar.holiday_on(date(2026, 1, 12)),
            Some("Coming of Age Day")
        );
    }

    #[test]
    fn should_reject_malformed_date_keys() {
        let json = r#"{"tomorrow": "Someday"}"#;
        assert!(serde_json::from_str::<HolidayCalendar>(json).is_err());
    }

    #[test]
    fn should_count_entries_outside_requested_year() {
        let calendar: HolidayCalendar = [
            (date(2025, 12, 31), "Eve".to_string()),
            (date(2026, 1, 1), "New Year".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(calendar.count_outside_year(2026), 1);
        assert_eq!(calendar.count_outside_year(2025), 1);
    }
}
