//! Virtual Lightsail resource: an instance, or a non-instance resource
//! (static IP, disk, …) that only shows up in listings.

use offhours_domain::resource::LightsailResource;

use super::{MachineError, PowerState, RUNNING, STOPPED};

/// A simulated Lightsail resource.
#[derive(Debug)]
pub struct VirtualLightsailResource {
    name: String,
    resource_type: String,
    state: PowerState,
}

impl VirtualLightsailResource {
    pub fn new(
        name: impl Into<String>,
        resource_type: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            state: PowerState::new(state),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn describe(&self) -> LightsailResource {
        LightsailResource::new(self.name.clone(), self.resource_type.clone(), self.state.get())
    }

    /// Whether power commands address this resource.
    #[must_use]
    pub fn is_instance(&self) -> bool {
        self.describe().is_instance()
    }

    /// # Errors
    ///
    /// Returns [`MachineError::IncorrectState`] unless the instance is
    /// running or stopped.
    pub fn start(&self) -> Result<(), MachineError> {
        self.state.transition(&self.name, RUNNING, "started")
    }

    /// # Errors
    ///
    /// Returns [`MachineError::IncorrectState`] unless the instance is
    /// running or stopped.
    pub fn stop(&self) -> Result<(), MachineError> {
        self.state.transition(&self.name, STOPPED, "stopped")
    }
}
