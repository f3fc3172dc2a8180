//! Volume records

use serde::{Deserialize, Serialize};

/// Status of a volume that is ready
pub const VOLUME_PROVISIONNED: &str = "provisionned";

/// A block volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// Numeric id
    pub id: u64,
    /// Volume name
    pub name: String,
    /// Size in GB
    #[serde(default)]
    pub size: u32,
    /// Volume type (`gp2`, ...)
    #[serde(default, rename = "type")]
    pub volume_type: String,
    /// Availability zone
    #[serde(default)]
    pub zone: String,
    /// Node the volume is bound to, empty when unbound
    #[serde(default, rename = "statefull_node_name")]
    pub stateful_node_name: String,
    /// Provisioning status
    #[serde(default)]
    pub status: String,
}

impl Volume {
    /// Whether the volume is ready.
    pub fn is_provisionned(&self) -> bool {
        self.status == VOLUME_PROVISIONNED
    }
}

/// Payload of `POST /projects/{uuid}/volumes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVolume {
    /// Volume name
    pub name: String,
    /// Size in GB
    pub size: u32,
    /// Volume type
    #[serde(rename = "type")]
    pub volume_type: String,
    /// Availability zone
    pub zone: String,
}

/// A volume mounted into a batch or service container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMount {
    /// Volume name
    #[serde(rename = "volume_name")]
    pub name: String,
    /// Path inside the container
    pub mount_point: String,
    /// Mount read-only
    #[serde(default)]
    pub read_only: bool,
}
