//! Decision: the engine's verdict for one rule, fire or skip, and why.
//!
//! Tests and callers match on [`ReasonCode`]; the rendered `detail` string
//! is for operators reading logs.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::resource::ResourceStatus;
use crate::rule::{Operation, Rule};

/// Whether the rule acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Fire,
    Skip,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fire => f.write_str("fire"),
            Self::Skip => f.write_str("skip"),
        }
    }
}

/// Machine-checkable reason attached to every decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// All gates passed and the resource is not yet in the target state.
    ReadyToAct,
    OutsideWindow,
    NotOperatingWeekday,
    HolidayCancelled,
    AlreadyInTargetState,
    ResourceNotFound,
    UnrecognizedConfiguration,
}

impl ReasonCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadyToAct => "ready_to_act",
            Self::OutsideWindow => "outside_window",
            Self::NotOperatingWeekday => "not_operating_weekday",
            Self::HolidayCancelled => "holiday_cancelled",
            Self::AlreadyInTargetState => "already_in_target_state",
            Self::ResourceNotFound => "resource_not_found",
            Self::UnrecognizedConfiguration => "unrecognized_configuration",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason with the context needed to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    ReadyToAct {
        operation: Operation,
        status: ResourceStatus,
    },
    OutsideWindow,
    NotOperatingWeekday {
        weekday: Weekday,
    },
    HolidayCancelled {
        holiday: String,
    },
    AlreadyInTargetState {
        status: ResourceStatus,
    },
    ResourceNotFound,
    UnrecognizedConfiguration,
}

impl Reason {
    #[must_use]
    pub fn code(&self) -> ReasonCode {
        match self {
            Self::ReadyToAct { .. } => ReasonCode::ReadyToAct,
            Self::OutsideWindow => ReasonCode::OutsideWindow,
            Self::NotOperatingWeekday { .. } => ReasonCode::NotOperatingWeekday,
            Self::HolidayCancelled { .. } => ReasonCode::HolidayCancelled,
            Self::AlreadyInTargetState { .. } => ReasonCode::AlreadyInTargetState,
            Self::ResourceNotFound => ReasonCode::ResourceNotFound,
            Self::UnrecognizedConfiguration => ReasonCode::UnrecognizedConfiguration,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::ReadyToAct { .. } => Outcome::Fire,
            _ => Outcome::Skip,
        }
    }
}

/// Render the operator-facing detail for `reason` on `rule`.
#[must_use]
pub fn render(rule: &Rule, reason: &Reason) -> String {
    match reason {
        Reason::ReadyToAct { operation, status } => format!(
            "{} {} {} (currently {status})",
            operation.action, operation.kind, rule.resource_id
        ),
        Reason::OutsideWindow => format!(
            "outside the fire window opening at {:02}:{:02}",
            rule.hour, rule.minute
        ),
        Reason::NotOperatingWeekday { weekday } => format!(
            "{weekday} is not an operating day (operating days {})",
            rule.weekdays
        ),
        Reason::HolidayCancelled { holiday } => format!("cancelled for holiday: {holiday}"),
        Reason::AlreadyInTargetState { status } => {
            format!("{} {} is already {status}", rule.kind, rule.resource_id)
        }
        Reason::ResourceNotFound => {
            format!("{} {} not found", rule.kind, rule.resource_id)
        }
        Reason::UnrecognizedConfiguration => format!(
            "unsupported kind/action combination: {}/{}",
            rule.kind, rule.action
        ),
    }
}

/// Progress of the provider command behind a [`Outcome::Fire`] decision.
///
/// Dispatch never changes the decision itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DispatchStatus {
    /// Skip decisions never dispatch.
    NotRequested,
    /// Decided to act; dispatch not (yet) confirmed.
    Pending,
    /// Evaluated without dispatching.
    DryRun,
    /// The provider accepted the command.
    Acknowledged,
    /// The provider rejected the command or the call failed.
    Failed { error: String },
    /// No answer within the dispatch timeout.
    TimedOut,
}

impl std::fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRequested => f.write_str("not_requested"),
            Self::Pending => f.write_str("pending"),
            Self::DryRun => f.write_str("dry_run"),
            Self::Acknowledged => f.write_str("acknowledged"),
            Self::Failed { error } => write!(f, "failed: {error}"),
            Self::TimedOut => f.write_str("timed_out"),
        }
    }
}

/// The engine's output for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub rule: Rule,
    pub outcome: Outcome,
    pub reason: ReasonCode,
    pub detail: String,
    /// Operation to dispatch; set only for fire decisions.
    pub operation: Option<Operation>,
    pub dispatch: DispatchStatus,
}

impl Decision {
    /// Build the decision for `rule`, rendering its detail.
    #[must_use]
    pub fn new(rule: &Rule, reason: &Reason) -> Self {
        let (operation, dispatch) = match reason {
            Reason::ReadyToAct { operation, .. } => (Some(*operation), DispatchStatus::Pending),
            _ => (None, DispatchStatus::NotRequested),
        };
        Self {
            rule: rule.clone(),
            outcome: reason.outcome(),
            reason: reason.code(),
            detail: render(rule, reason),
            operation,
            dispatch,
        }
    }

    #[must_use]
    pub fn is_fire(&self) -> bool {
        self.outcome == Outcome::Fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Declared, PowerAction, ResourceKind, WeekdaySet};

    fn rule() -> Rule {
        Rule::builder()
            .name("office hours")
            .kind(ResourceKind::Ec2)
            .resource_id("i-office")
            .action(PowerAction::Start)
            .at(8, 5)
            .weekdays(WeekdaySet::WORKDAYS)
            .build()
            .unwrap()
    }

    #[test]
    fn should_fire_only_for_ready_to_act() {
        let ready = Reason::ReadyToAct {
            operation: Operation {
                kind: ResourceKind::Ec2,
                action: PowerAction::Start,
            },
            status: ResourceStatus::Stopped,
        };
        assert_eq!(ready.outcome(), Outcome::Fire);
        assert_eq!(Reason::OutsideWindow.outcome(), Outcome::Skip);
        assert_eq!(Reason::ResourceNotFound.outcome(), Outcome::Skip);
    }

    #[test]
    fn should_mark_fire_decision_pending_with_operation() {
        let operation = Operation {
            kind: ResourceKind::Ec2,
            action: PowerAction::Start,
        };
        let decision = Decision::new(
            &rule(),
            &Reason::ReadyToAct {
                operation,
                status: ResourceStatus::Stopped,
            },
        );
        assert!(decision.is_fire());
        assert_eq!(decision.reason, ReasonCode::ReadyToAct);
        assert_eq!(decision.operation, Some(operation));
        assert_eq!(decision.dispatch, DispatchStatus::Pending);
        assert_eq!(decision.detail, "start ec2 i-office (currently stopped)");
    }

    #[test]
    fn should_mark_skip_decision_not_requested() {
        let decision = Decision::new(&rule(), &Reason::OutsideWindow);
        assert!(!decision.is_fire());
        assert!(decision.operation.is_none());
        assert_eq!(decision.dispatch, DispatchStatus::NotRequested);
    }

    #[test]
    fn should_render_holiday_name_in_detail() {
        let detail = render(
            &rule(),
            &Reason::HolidayCancelled {
                holiday: "Culture Day".to_string(),
            },
        );
        assert_eq!(detail, "cancelled for holiday: Culture Day");
    }

    #[test]
    fn should_render_window_start_in_detail() {
        assert_eq!(
            render(&rule(), &Reason::OutsideWindow),
            "outside the fire window opening at 08:05"
        );
    }

    #[test]
    fn should_render_weekday_and_operating_days() {
        let detail = render(
            &rule(),
            &Reason::NotOperatingWeekday {
                weekday: Weekday::Sat,
            },
        );
        assert_eq!(detail, "Sat is not an operating day (operating days {1,2,3,4,5})");
    }

    #[test]
    fn should_render_unrecognized_labels_verbatim() {
        let mut rule = rule();
        rule.action = Declared::Unrecognized("hibernate".to_string());
        assert_eq!(
            render(&rule, &Reason::UnrecognizedConfiguration),
            "unsupported kind/action combination: ec2/hibernate"
        );
    }

    #[test]
    fn should_serialize_reason_code_as_snake_case() {
        let json = serde_json::to_string(&ReasonCode::AlreadyInTargetState).unwrap();
        assert_eq!(json, "\"already_in_target_state\"");
    }

    #[test]
    fn should_serialize_dispatch_status_with_state_tag() {
        let json = serde_json::to_value(DispatchStatus::Failed {
            error: "throttled".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"state": "failed", "error": "throttled"}));
    }
}
