//! Virtual EC2 instance: addressed by instance id.

use offhours_domain::resource::Ec2Instance;

use super::{MachineError, PowerState, RUNNING, STOPPED};

/// A simulated EC2 instance.
#[derive(Debug)]
pub struct VirtualEc2Instance {
    instance_id: String,
    state: PowerState,
}

impl VirtualEc2Instance {
    pub fn new(instance_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            state: PowerState::new(state),
        }
    }

    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// The listing entry as the provider would describe it right now.
    #[must_use]
    pub fn describe(&self) -> Ec2Instance {
        Ec2Instance::new(self.instance_id.clone(), self.state.get())
    }

    /// # Errors
    ///
    /// Returns [`MachineError::IncorrectState`] unless the instance is
    /// running or stopped.
    pub fn start(&self) -> Result<(), MachineError> {
        self.state.transition(&self.instance_id, RUNNING, "started")
    }

    /// # Errors
    ///
    /// Returns [`MachineError::IncorrectState`] unless the instance is
    /// running or stopped.
    pub fn stop(&self) -> Result<(), MachineError> {
        self.state.transition(&self.instance_id, STOPPED, "stopped")
    }
}
