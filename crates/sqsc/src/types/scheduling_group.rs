//! Scheduling group records

use serde::{Deserialize, Serialize};

/// A cluster member assigned to a scheduling group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMember {
    /// Numeric id
    pub id: u64,
    /// Member name
    pub name: String,
    /// Public address
    #[serde(default)]
    pub public_ip: String,
    /// Private address
    #[serde(default)]
    pub private_ip: String,
}

/// A service placed on a scheduling group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledService {
    /// Container id of the service
    pub container_id: u64,
    /// Service name
    pub name: String,
}

/// A scheduling group: a named set of nodes services can be pinned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingGroup {
    /// Numeric id
    pub id: u64,
    /// Group name
    pub name: String,
    /// Nodes in the group
    #[serde(default)]
    pub cluster_members: Vec<ClusterMember>,
    /// Services pinned to the group
    #[serde(default)]
    pub services: Vec<ScheduledService>,
}

impl SchedulingGroup {
    /// Names of the group's nodes joined with `sep`.
    pub fn node_names(&self, sep: &str) -> String {
        self.cluster_members
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// Names of the group's services joined with `sep`.
    pub fn service_names(&self, sep: &str) -> String {
        self.services
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(sep)
    }
}
