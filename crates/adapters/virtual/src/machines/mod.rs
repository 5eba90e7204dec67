//! Simulated machines: one type per provider listing shape.
//!
//! Both hold their power state behind a mutex so the fleet can be shared
//! between the scheduler and the HTTP API while commands flip states.

mod ec2;
mod lightsail;

pub use ec2::VirtualEc2Instance;
pub use lightsail::VirtualLightsailResource;

use std::sync::{Mutex, MutexGuard, PoisonError};

const RUNNING: &str = "running";
const STOPPED: &str = "stopped";

/// Errors a simulated provider raises for a power command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MachineError {
    /// Only `running` and `stopped` machines accept commands.
    #[error("{id} is in state {state} and cannot be {verb}")]
    IncorrectState {
        id: String,
        state: String,
        verb: &'static str,
    },
}

/// Mutable power state label of a machine.
#[derive(Debug)]
struct PowerState(Mutex<String>);

impl PowerState {
    fn new(state: impl Into<String>) -> Self {
        Self(Mutex::new(state.into()))
    }

    fn get(&self) -> String {
        self.lock().clone()
    }

    /// Move to `target`, accepting only settled states as the origin.
    fn transition(&self, id: &str, target: &'static str, verb: &'static str) -> Result<(), MachineError> {
        let mut state = self.lock();
        if state.as_str() != RUNNING && state.as_str() != STOPPED {
            return Err(MachineError::IncorrectState {
                id: id.to_string(),
                state: state.clone(),
                verb,
            });
        }
        target.clone_into(&mut *state);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_move_between_settled_states() {
        let state = PowerState::new(STOPPED);
        state.transition("m", RUNNING, "started").unwrap();
        assert_eq!(state.get(), RUNNING);
        state.transition("m", RUNNING, "started").unwrap();
        assert_eq!(state.get(), RUNNING);
    }

    #[test]
    fn should_reject_command_when_state_is_transitional() {
        let state = PowerState::new("stopping");
        let err = state.transition("m", RUNNING, "started").unwrap_err();
        assert_eq!(err.to_string(), "m is in state stopping and cannot be started");
        assert_eq!(state.get(), "stopping");
    }
}
