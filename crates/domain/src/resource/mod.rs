//! Resources: provider inventories and the point-in-time snapshot every
//! rule of one invocation is evaluated against.
//!
//! Each provider lists its resources in its own shape and has its own notion
//! of "this entry is a compute instance". Both shapes implement
//! [`Inventory`], so the engine locates a rule's target without knowing
//! which provider it talks to.

mod ec2;
mod lightsail;

pub use ec2::{Ec2Instance, Ec2Listing};
pub use lightsail::{LIGHTSAIL_INSTANCE_TYPE, LightsailListing, LightsailResource};

use serde::{Deserialize, Serialize};

use crate::rule::ResourceKind;
use crate::time::Timestamp;

/// Observed power status of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Running,
    Stopped,
    /// Any other provider state (`pending`, `stopping`, …), kept verbatim.
    Other(String),
    /// No matching resource in the snapshot. A normal outcome, not an error.
    NotFound,
}

impl ResourceStatus {
    /// Map a provider state name onto a status.
    #[must_use]
    pub fn from_provider_state(state: &str) -> Self {
        match state {
            "running" => Self::Running,
            "stopped" => Self::Stopped,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Stopped => f.write_str("stopped"),
            Self::Other(state) => f.write_str(state),
            Self::NotFound => f.write_str("not found"),
        }
    }
}

/// A provider listing that can locate resources by identifier.
pub trait Inventory {
    /// Kind of resources in this listing.
    fn kind(&self) -> ResourceKind;

    /// Status of the resource identified by `resource_id`, or
    /// [`ResourceStatus::NotFound`].
    fn locate(&self, resource_id: &str) -> ResourceStatus;
}

/// Immutable point-in-time view of every provider inventory.
///
/// Fetched once per invocation and shared by all rules; no rule causes a
/// re-fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub ec2: Ec2Listing,
    pub lightsail: LightsailListing,
    pub taken_at: Timestamp,
}

impl ResourceSnapshot {
    #[must_use]
    pub fn new(ec2: Ec2Listing, lightsail: LightsailListing, taken_at: Timestamp) -> Self {
        Self {
            ec2,
            lightsail,
            taken_at,
        }
    }

    /// The listing holding resources of `kind`.
    #[must_use]
    pub fn inventory(&self, kind: ResourceKind) -> &dyn Inventory {
        match kind {
            ResourceKind::Ec2 => &self.ec2,
            ResourceKind::Lightsail => &self.lightsail,
        }
    }

    /// Locate a resource of `kind` by identifier.
    #[must_use]
    pub fn locate(&self, kind: ResourceKind, resource_id: &str) -> ResourceStatus {
        self.inventory(kind).locate(resource_id)
    }
}
