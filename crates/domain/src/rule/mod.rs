//! Rule, one schedule entry: when, on which days, and what to do to which
//! resource.
//!
//! Rules are immutable for the lifetime of one invocation. Each rule is
//! evaluated independently by the [`engine`](crate::engine).

mod target;
mod weekdays;

pub use target::{Declared, Operation, PowerAction, ResourceKind};
pub use weekdays::WeekdaySet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{OffhoursError, ValidationError};

/// What a rule does when today is a public holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayPolicy {
    /// Act regardless of holidays.
    #[default]
    Ignore,
    /// Skip the rule on any date present in the holiday calendar.
    CancelOnHoliday,
}

/// A single start/stop schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub kind: Declared<ResourceKind>,
    pub resource_id: String,
    pub action: Declared<PowerAction>,
    /// Local hour of the fire window start, 0–23.
    pub hour: u8,
    /// Local minute of the fire window start, 0–59.
    pub minute: u8,
    pub weekdays: WeekdaySet,
    #[serde(default)]
    pub holiday_policy: HolidayPolicy,
}

impl Rule {
    /// Create a builder for constructing a [`Rule`].
    #[must_use]
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// An unrecognised kind or action is **not** a validation failure: such
    /// rules are evaluated and skipped with
    /// [`ReasonCode::UnrecognizedConfiguration`](crate::decision::ReasonCode::UnrecognizedConfiguration).
    ///
    /// # Errors
    ///
    /// Returns [`OffhoursError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `resource_id` is empty ([`ValidationError::EmptyResourceId`])
    /// - `hour` > 23 or `minute` > 59
    /// - `weekdays` is empty ([`ValidationError::NoWeekdays`])
    pub fn validate(&self) -> Result<(), OffhoursError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.resource_id.trim().is_empty() {
            return Err(ValidationError::EmptyResourceId.into());
        }
        if self.hour > 23 {
            return Err(ValidationError::HourOutOfRange(self.hour).into());
        }
        if self.minute > 59 {
            return Err(ValidationError::MinuteOutOfRange(self.minute).into());
        }
        if self.weekdays.is_empty() {
            return Err(ValidationError::NoWeekdays.into());
        }
        Ok(())
    }

    /// Local wall-clock start of the fire window, `None` if out of range.
    #[must_use]
    pub fn target_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour.into(), self.minute.into(), 0)
    }

    /// The supported operation this rule maps to, if any.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        Operation::resolve(&self.kind, &self.action)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} {}:{} at {:02}:{:02})",
            self.name, self.action, self.kind, self.resource_id, self.hour, self.minute
        )
    }
}

/// Step-by-step builder for [`Rule`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    name: Option<String>,
    kind: Option<Declared<ResourceKind>>,
    resource_id: Option<String>,
    action: Option<Declared<PowerAction>>,
    hour: u8,
    minute: u8,
    weekdays: Option<WeekdaySet>,
    holiday_policy: HolidayPolicy,
}

impl RuleBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<Declared<ResourceKind>>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: impl Into<Declared<PowerAction>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Local time at which the fire window opens.
    #[must_use]
    pub fn at(mut self, hour: u8, minute: u8) -> Self {
        self.hour = hour;
        self.minute = minute;
        self
    }

    #[must_use]
    pub fn weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.weekdays = Some(weekdays);
        self
    }

    #[must_use]
    pub fn holiday_policy(mut self, policy: HolidayPolicy) -> Self {
        self.holiday_policy = policy;
        self
    }

    /// Consume the builder, validate, and return a [`Rule`].
    ///
    /// Defaults: kind `ec2`, action `start`, 00:00, every day.
    ///
    /// # Errors
    ///
    /// Returns [`OffhoursError::Validation`] if required fields are missing or invalid.
    pub fn build(self) -> Result<Rule, OffhoursError> {
        let rule = Rule {
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or(Declared::Known(ResourceKind::Ec2)),
            resource_id: self.resource_id.unwrap_or_default(),
            action: self.action.unwrap_or(Declared::Known(PowerAction::Start)),
            hour: self.hour,
            minute: self.minute,
            weekdays: self.weekdays.unwrap_or(WeekdaySet::EVERY_DAY),
            holiday_policy: self.holiday_policy,
        };
        rule.validate()?;
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_rule() -> Rule {
        Rule::builder()
            .name("start web in the morning")
            .kind(ResourceKind::Ec2)
            .resource_id("i-0123456789abcdef0")
            .action(PowerAction::Start)
            .at(9, 0)
            .weekdays(WeekdaySet::WORKDAYS)
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_valid_rule_when_required_fields_provided() {
        let rule = valid_rule();
        assert_eq!(rule.name, "start web in the morning");
        assert_eq!(rule.hour, 9);
        assert_eq!(rule.minute, 0);
        assert_eq!(rule.holiday_policy, HolidayPolicy::Ignore);
        assert_eq!(
            rule.operation(),
            Some(Operation {
                kind: ResourceKind::Ec2,
                action: PowerAction::Start,
            })
        );
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Rule::builder().resource_id("i-1").build();
        assert!(matches!(
            result,
            Err(OffhoursError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_resource_id_is_empty() {
        let result = Rule::builder().name("no target").build();
        assert!(matches!(
            result,
            Err(OffhoursError::Validation(ValidationError::EmptyResourceId))
        ));
    }

    #[test]
    fn should_return_validation_error_when_hour_out_of_range() {
        let result = Rule::builder().name("late").resource_id("i-1").at(24, 0).build();
        assert!(matches!(
            result,
            Err(OffhoursError::Validation(ValidationError::HourOutOfRange(24)))
        ));
    }

    #[test]
    fn should_return_validation_error_when_minute_out_of_range() {
        let result = Rule::builder().name("late").resource_id("i-1").at(8, 60).build();
        assert!(matches!(
            result,
            Err(OffhoursError::Validation(ValidationError::MinuteOutOfRange(60)))
        ));
    }

    #[test]
    fn should_return_validation_error_when_no_weekdays() {
        let result = Rule::builder()
            .name("never")
            .resource_id("i-1")
            .weekdays(WeekdaySet::default())
            .build();
        assert!(matches!(
            result,
            Err(OffhoursError::Validation(ValidationError::NoWeekdays))
        ));
    }

    #[test]
    fn should_accept_unrecognized_kind_as_valid() {
        let rule = Rule::builder()
            .name("database")
            .kind(Declared::Unrecognized("rds".to_string()))
            .resource_id("db-1")
            .build()
            .unwrap();
        assert!(rule.operation().is_none());
    }

    #[test]
    fn should_expose_target_time() {
        let rule = valid_rule();
        assert_eq!(rule.target_time(), NaiveTime::from_hms_opt(9, 0, 0));
    }

    #[test]
    fn should_display_rule_summary() {
        assert_eq!(
            valid_rule().to_string(),
            "start web in the morning (start ec2:i-0123456789abcdef0 at 09:00)"
        );
    }

    #[test]
    fn should_deserialize_rule_from_toml_document_entry() {
        let rule: Rule = toml::from_str(
            r#"
            name = "stop blog at night"
            kind = "lightsail"
            resource_id = "blog-1"
            action = "stop"
            hour = 22
            minute = 30
            weekdays = [0, 6]
            holiday_policy = "cancel_on_holiday"
            "#,
        )
        .unwrap();
        assert_eq!(rule.kind, Declared::Known(ResourceKind::Lightsail));
        assert_eq!(rule.action, Declared::Known(PowerAction::Stop));
        assert_eq!(rule.holiday_policy, HolidayPolicy::CancelOnHoliday);
        assert!(rule.weekdays.contains(chrono::Weekday::Sat));
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn should_keep_unknown_action_label_when_deserializing() {
        let json = serde_json::json!({
            "name": "reboot nightly",
            "kind": "ec2",
            "resource_id": "i-1",
            "action": "reboot",
            "hour": 3,
            "minute": 0,
            "weekdays": [1]
        });
        let rule: Rule = serde_json::from_value(json).unwrap();
        assert_eq!(rule.action, Declared::Unrecognized("reboot".to_string()));
        assert_eq!(rule.holiday_policy, HolidayPolicy::Ignore);
    }
}
