//! Operating weekdays, numbered 0 = Sunday through 6 = Saturday.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Set of weekdays on which a rule may act.
///
/// Serialised as a list of day numbers (`[1, 2, 3, 4, 5]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Monday through Friday.
    pub const WORKDAYS: Self = Self(0b0011_1110);
    /// All seven days.
    pub const EVERY_DAY: Self = Self(0b0111_1111);

    /// Build a set from day numbers.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::WeekdayOutOfRange`] for any number above 6.
    pub fn from_numbers(days: impl IntoIterator<Item = u8>) -> Result<Self, ValidationError> {
        days.into_iter().try_fold(Self::default(), |set, day| {
            if day > 6 {
                return Err(ValidationError::WeekdayOutOfRange(day));
            }
            Ok(Self(set.0 | (1 << day)))
        })
    }

    /// Whether `day` is an operating day.
    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Day numbers in ascending order.
    pub fn numbers(self) -> impl Iterator<Item = u8> {
        (0..7).filter(move |day| self.0 & (1 << day) != 0)
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = ValidationError;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_numbers(days)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.numbers().collect()
    }
}

impl std::fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let days: Vec<String> = self.numbers().map(|d| d.to_string()).collect();
        write!(f, "{{{}}}", days.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_contain_only_listed_days() {
        let set = WeekdaySet::from_numbers([1, 3]).unwrap();
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Wed));
        assert!(!set.contains(Weekday::Sun));
        assert!(!set.contains(Weekday::Sat));
    }

    #[test]
    fn should_number_sunday_as_zero() {
        let set = WeekdaySet::from_numbers([0]).unwrap();
        assert!(set.contains(Weekday::Sun));
        assert!(!set.contains(Weekday::Mon));
    }

    #[test]
    fn should_match_workdays_constant() {
        assert_eq!(
            WeekdaySet::from_numbers([1, 2, 3, 4, 5]).unwrap(),
            WeekdaySet::WORKDAYS
        );
        assert!(!WeekdaySet::WORKDAYS.contains(Weekday::Sun));
        assert!(!WeekdaySet::WORKDAYS.contains(Weekday::Sat));
    }

    #[test]
    fn should_reject_day_number_above_six() {
        assert_eq!(
            WeekdaySet::from_numbers([1, 7]),
            Err(ValidationError::WeekdayOutOfRange(7))
        );
    }

    #[test]
    fn should_report_empty_when_no_days() {
        assert!(WeekdaySet::default().is_empty());
        assert!(!WeekdaySet::EVERY_DAY.is_empty());
    }

    #[test]
    fn should_deserialize_from_number_list_and_reject_invalid() {
        let set: WeekdaySet = serde_json::from_str("[5, 1, 1]").unwrap();
        assert_eq!(set.numbers().collect::<Vec<_>>(), vec![1, 5]);
        assert!(serde_json::from_str::<WeekdaySet>("[9]").is_err());
    }

    #[test]
    fn should_display_as_braced_list() {
        assert_eq!(WeekdaySet::WORKDAYS.to_string(), "{1,2,3,4,5}");
    }
}
