//! # offhours-adapter-virtual
//!
//! Virtual fleet that stands in for the cloud providers, for demos and tests.
//!
//! ## Behaviour
//!
//! | Call | Effect |
//! |------|--------|
//! | `describe_instances` / `get_resources` | Current listing, including non-instance Lightsail resources |
//! | `start_instance` | `stopped`/`running` → `running` |
//! | `stop_instance` | `stopped`/`running` → `stopped` |
//! | any command on an unknown target | `NotFound` |
//! | any command on a transitional state (`pending`, `stopping`, …) | dispatch error |
//!
//! ## Dependency rule
//!
//! Depends on `offhours-app` (port traits) and `offhours-domain` only.

mod machines;

use offhours_app::ports::{Ec2Provider, LightsailProvider};
use offhours_domain::error::{NotFoundError, OffhoursError};
use offhours_domain::resource::{Ec2Instance, LIGHTSAIL_INSTANCE_TYPE, LightsailResource};
use serde::Deserialize;

pub use machines::{MachineError, VirtualEc2Instance, VirtualLightsailResource};

/// Initial fleet content, usually read from the `[fleet]` config section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FleetSeed {
    #[serde(default)]
    pub ec2: Vec<Ec2Seed>,
    #[serde(default)]
    pub lightsail: Vec<LightsailSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ec2Seed {
    pub instance_id: String,
    #[serde(default = "default_state")]
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LightsailSeed {
    pub name: String,
    #[serde(default = "default_resource_type")]
    pub resource_type: String,
    #[serde(default = "default_state")]
    pub state: String,
}

fn default_state() -> String {
    "stopped".to_string()
}

fn default_resource_type() -> String {
    LIGHTSAIL_INSTANCE_TYPE.to_string()
}

/// Simulated EC2 and Lightsail inventories.
#[derive(Debug, Default)]
pub struct VirtualFleet {
    ec2: Vec<VirtualEc2Instance>,
    lightsail: Vec<VirtualLightsailResource>,
}

impl VirtualFleet {
    #[must_use]
    pub fn from_seed(seed: FleetSeed) -> Self {
        Self {
            ec2: seed
                .ec2
                .into_iter()
                .map(|s| VirtualEc2Instance::new(s.instance_id, s.state))
                .collect(),
            lightsail: seed
                .lightsail
                .into_iter()
                .map(|s| VirtualLightsailResource::new(s.name, s.resource_type, s.state))
                .collect(),
        }
    }

    /// A small fleet to play with when nothing is configured.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            ec2: vec![
                VirtualEc2Instance::new("i-0a1b2c3d4e5f60718", "stopped"),
                VirtualEc2Instance::new("i-0f9e8d7c6b5a40312", "running"),
            ],
            lightsail: vec![
                VirtualLightsailResource::new("wordpress-1", LIGHTSAIL_INSTANCE_TYPE, "stopped"),
                VirtualLightsailResource::new("wordpress-1-ip", "StaticIp", "available"),
            ],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ec2.is_empty() && self.lightsail.is_empty()
    }

    fn ec2_instance(&self, instance_id: &str) -> Result<&VirtualEc2Instance, OffhoursError> {
        self.ec2
            .iter()
            .find(|i| i.instance_id() == instance_id)
            .ok_or_else(|| {
                NotFoundError {
                    entity: "EC2 instance",
                    id: instance_id.to_string(),
                }
                .into()
            })
    }

    fn lightsail_instance(
        &self,
        instance_name: &str,
    ) -> Result<&VirtualLightsailResource, OffhoursError> {
        self.lightsail
            .iter()
            .find(|r| r.name() == instance_name && r.is_instance())
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Lightsail instance",
                    id: instance_name.to_string(),
                }
                .into()
            })
    }
}

fn dispatched(target: &str, result: Result<(), MachineError>) -> Result<(), OffhoursError> {
    result.map_err(|err| OffhoursError::dispatch(target, err))?;
    tracing::debug!(resource = target, "virtual command applied");
    Ok(())
}

impl Ec2Provider for VirtualFleet {
    async fn describe_instances(&self) -> Result<Vec<Ec2Instance>, OffhoursError> {
        Ok(self.ec2.iter().map(VirtualEc2Instance::describe).collect())
    }

    async fn start_instance(&self, instance_id: &str) -> Result<(), OffhoursError> {
        dispatched(instance_id, self.ec2_instance(instance_id)?.start())
    }

    async fn stop_instance(&self, instance_id: &str) -> Result<(), OffhoursError> {
        dispatched(instance_id, self.ec2_instance(instance_id)?.stop())
    }
}

impl LightsailProvider for VirtualFleet {
    async fn get_resources(&self) -> Result<Vec<LightsailResource>, OffhoursError> {
        Ok(self
            .lightsail
            .iter()
            .map(VirtualLightsailResource::describe)
            .collect())
    }

    async fn start_instance(&self, instance_name: &str) -> Result<(), OffhoursError> {
        dispatched(instance_name, self.lightsail_instance(instance_name)?.start())
    }

    async fn stop_instance(&self, instance_name: &str) -> Result<(), OffhoursError> {
        dispatched(instance_name, self.lightsail_instance(instance_name)?.stop())
    }
}
