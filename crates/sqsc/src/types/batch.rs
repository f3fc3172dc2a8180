//! Batch records

use super::volume::VolumeMount;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resource limits of a batch or service container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Memory in MB
    #[serde(rename = "mem", default)]
    pub memory: i64,
    /// CPU in MHz
    #[serde(default)]
    pub cpu: i64,
    /// IOPS
    #[serde(default)]
    pub iops: i64,
}

/// A host device exposed to the container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerDevice {
    /// Host path
    #[serde(rename = "src_path")]
    pub src: String,
    /// Container path, defaults to the host path
    #[serde(rename = "dst_path", default, skip_serializing_if = "String::is_empty")]
    pub dst: String,
    /// cgroup permissions (`rwm`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub options: String,
}

/// Settings shared by batch creation and batch listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Batch name
    pub name: String,
    /// Runs on a schedule rather than on demand
    #[serde(default)]
    pub periodic: bool,
    /// Cron expression of a periodic batch
    #[serde(default)]
    pub cron_expression: String,
    /// Time zone the cron expression is evaluated in
    #[serde(default)]
    pub time_zone_name: String,
    /// Resource limits
    #[serde(default)]
    pub limits: Limits,
    /// Command run in the container
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub run_command: String,
    /// Container entrypoint override
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entrypoint: String,
    /// Extra Linux capabilities
    #[serde(default)]
    pub docker_capabilities: Vec<String>,
    /// Host devices
    #[serde(default)]
    pub docker_devices: Vec<DockerDevice>,
}

/// Image a batch runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerImage {
    /// Image reference
    pub name: String,
    /// Pulled from a private registry
    #[serde(default)]
    pub private: bool,
    /// Registry user
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    /// Registry password
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

/// Payload of `POST /projects/{uuid}/batches`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewBatch {
    /// Common settings
    #[serde(flatten)]
    pub settings: BatchSettings,
    /// Image to run
    pub docker_image: DockerImage,
    /// Volumes to mount
    pub volumes_to_bind: Vec<VolumeMount>,
}

/// Batch returned by the create call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedBatch {
    /// Common settings
    #[serde(flatten)]
    pub settings: BatchSettings,
    /// Image to run
    #[serde(default)]
    pub docker_image: DockerImage,
    /// Mounted volumes
    #[serde(default)]
    pub volumes: Vec<VolumeMount>,
}

/// Scheduling state of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSchedule {
    /// Running instances
    #[serde(default)]
    pub running: u32,
    /// Requested instances
    #[serde(default)]
    pub instances: u32,
    /// Severity of `message`
    #[serde(default)]
    pub level: String,
    /// Scheduler message
    #[serde(default)]
    pub message: String,
}

/// Status block of a listed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatus {
    /// Infrastructure status as displayed by the web console
    #[serde(rename = "display_infra_status", default)]
    pub infra: String,
    /// Scheduling state
    #[serde(default)]
    pub schedule: BatchSchedule,
}

/// A batch as listed by `GET /projects/{uuid}/batches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Common settings, name included
    #[serde(flatten)]
    pub settings: BatchSettings,
    /// Environment set by the user
    #[serde(default)]
    pub custom_environment: HashMap<String, String>,
    /// Environment injected by the control plane
    #[serde(default)]
    pub default_environment: HashMap<String, String>,
    /// Status
    #[serde(default)]
    pub status: BatchStatus,
    /// Mounted volumes
    #[serde(default)]
    pub volumes: Vec<VolumeMount>,
}

impl Batch {
    /// Batch name.
    pub fn name(&self) -> &str {
        &self.settings.name
    }
}

impl sqsc_core::locate::Named for Batch {
    fn name(&self) -> &str {
        &self.settings.name
    }
}

/// Payload of `PUT /projects/{uuid}/batches/{name}`. Unset fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchUpdate {
    /// New command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_command: Option<String>,
    /// New limits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,
    /// New user environment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_environment: Option<HashMap<String, String>>,
    /// New capabilities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_capabilities: Option<Vec<String>>,
    /// New devices
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_devices: Option<Vec<DockerDevice>>,
}
