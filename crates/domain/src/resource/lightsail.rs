//! Lightsail inventory: the provider lists instances next to static IPs,
//! disks and other resources, so a match needs both the name and the
//! instance resource type.

use serde::{Deserialize, Serialize};

use super::{Inventory, ResourceStatus};
use crate::rule::ResourceKind;

/// Resource type string Lightsail uses for compute instances.
pub const LIGHTSAIL_INSTANCE_TYPE: &str = "Instance";

/// One entry of a Lightsail resource listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightsailResource {
    pub name: String,
    pub resource_type: String,
    pub state: String,
}

impl LightsailResource {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        resource_type: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            state: state.into(),
        }
    }

    /// Shorthand for a compute instance entry.
    #[must_use]
    pub fn instance(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self::new(name, LIGHTSAIL_INSTANCE_TYPE, state)
    }

    #[must_use]
    pub fn is_instance(&self) -> bool {
        self.resource_type == LIGHTSAIL_INSTANCE_TYPE
    }
}

/// All Lightsail resources visible to the provider handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightsailListing(Vec<LightsailResource>);

impl From<Vec<LightsailResource>> for LightsailListing {
    fn from(resources: Vec<LightsailResource>) -> Self {
        Self(resources)
    }
}

impl Inventory for LightsailListing {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Lightsail
    }

    fn locate(&self, resource_id: &str) -> ResourceStatus {
        self.0
            .iter()
            .find(|resource| resource.is_instance() && resource.name == resource_id)
            .map_or(ResourceStatus::NotFound, |resource| {
                ResourceStatus::from_provider_state(&resource.state)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_locate_instance_by_name() {
        let listing = LightsailListing::from(vec![LightsailResource::instance("blog", "running")]);
        assert_eq!(listing.locate("blog"), ResourceStatus::Running);
    }

    #[test]
    fn should_ignore_non_instance_resource_with_same_name() {
        let listing = LightsailListing::from(vec![LightsailResource::new(
            "blog",
            "StaticIp",
            "available",
        )]);
        assert_eq!(listing.locate("blog"), ResourceStatus::NotFound);
    }

    #[test]
    fn should_pick_instance_when_name_is_shared_with_other_resource() {
        let listing = LightsailListing::from(vec![
            LightsailResource::new("blog", "Disk", "in-use"),
            LightsailResource::instance("blog", "stopped"),
        ]);
        assert_eq!(listing.locate("blog"), ResourceStatus::Stopped);
    }
}
