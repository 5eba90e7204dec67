//! Action decider: fire, or skip because the resource is already where the
//! rule wants it (or does not exist).

use crate::decision::Reason;
use crate::resource::ResourceStatus;
use crate::rule::{Operation, PowerAction};

/// Decide whether `operation` should be dispatched given the observed status.
///
/// | status   | start                | stop                 |
/// |----------|----------------------|----------------------|
/// | running  | already in target    | fire                 |
/// | stopped  | fire                 | already in target    |
/// | other    | fire                 | fire                 |
/// | missing  | resource not found   | resource not found   |
#[must_use]
pub fn decide(status: ResourceStatus, operation: Operation) -> Reason {
    match (status, operation.action) {
        (ResourceStatus::NotFound, _) => Reason::ResourceNotFound,
        (status @ ResourceStatus::Running, PowerAction::Start)
        | (status @ ResourceStatus::Stopped, PowerAction::Stop) => {
            Reason::AlreadyInTargetState { status }
        }
        (status, _) => Reason::ReadyToAct { operation, status },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::ReasonCode;
    use crate::rule::ResourceKind;

    fn op(action: PowerAction) -> Operation {
        Operation {
            kind: ResourceKind::Ec2,
            action,
        }
    }

    fn code(status: ResourceStatus, action: PowerAction) -> ReasonCode {
        decide(status, op(action)).code()
    }

    #[test]
    fn should_skip_start_when_running() {
        assert_eq!(
            code(ResourceStatus::Running, PowerAction::Start),
            ReasonCode::AlreadyInTargetState
        );
    }

    #[test]
    fn should_fire_stop_when_running() {
        assert_eq!(
            code(ResourceStatus::Running, PowerAction::Stop),
            ReasonCode::ReadyToAct
        );
    }

    #[test]
    fn should_fire_start_when_stopped() {
        assert_eq!(
            code(ResourceStatus::Stopped, PowerAction::Start),
            ReasonCode::ReadyToAct
        );
    }

    #[test]
    fn should_skip_stop_when_stopped() {
        assert_eq!(
            code(ResourceStatus::Stopped, PowerAction::Stop),
            ReasonCode::AlreadyInTargetState
        );
    }

    #[test]
    fn should_fire_either_action_when_in_transition() {
        let pending = ResourceStatus::Other("pending".to_string());
        assert_eq!(
            code(pending.clone(), PowerAction::Start),
            ReasonCode::ReadyToAct
        );
        assert_eq!(code(pending, PowerAction::Stop), ReasonCode::ReadyToAct);
    }

    #[test]
    fn should_skip_either_action_when_not_found() {
        assert_eq!(
            code(ResourceStatus::NotFound, PowerAction::Start),
            ReasonCode::ResourceNotFound
        );
        assert_eq!(
            code(ResourceStatus::NotFound, PowerAction::Stop),
            ReasonCode::ResourceNotFound
        );
    }

    #[test]
    fn should_carry_observed_status_in_reason() {
        let reason = decide(ResourceStatus::Running, op(PowerAction::Start));
        assert_eq!(
            reason,
            Reason::AlreadyInTargetState {
                status: ResourceStatus::Running
            }
        );
    }
}
