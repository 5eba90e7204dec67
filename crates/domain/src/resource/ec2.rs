//! EC2 inventory: instances matched by their unique instance id.

use serde::{Deserialize, Serialize};

use super::{Inventory, ResourceStatus};
use crate::rule::ResourceKind;

/// One entry of an EC2 instance listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ec2Instance {
    pub instance_id: String,
    /// Provider state name (`pending`, `running`, `stopping`, `stopped`, …).
    pub state: String,
}

impl Ec2Instance {
    #[must_use]
    pub fn new(instance_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            state: state.into(),
        }
    }
}

/// All EC2 instances visible to the provider handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ec2Listing(Vec<Ec2Instance>);

impl From<Vec<Ec2Instance>> for Ec2Listing {
    fn from(instances: Vec<Ec2Instance>) -> Self {
        Self(instances)
    }
}

impl Inventory for Ec2Listing {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Ec2
    }

    fn locate(&self, resource_id: &str) -> ResourceStatus {
        self.0
            .iter()
            .find(|instance| instance.instance_id == resource_id)
            .map_or(ResourceStatus::NotFound, |instance| {
                ResourceStatus::from_provider_state(&instance.state)
            })
    }
}
