//! Project records

use serde::{Deserialize, Serialize};

/// `infra_status` of a project whose infrastructure is up
pub const INFRA_OK: &str = "ok";

/// `infra_status` of a project whose provisioning failed
pub const INFRA_ERROR: &str = "error";

/// A project: one cluster and everything deployed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Numeric id
    #[serde(default)]
    pub id: u64,
    /// Project name
    pub name: String,
    /// UUID used to address the project in every route
    #[serde(default)]
    pub uuid: String,
    /// Infrastructure status (`no_infra`, `provisionning`, `ok`, `error`, ...)
    #[serde(default)]
    pub infra_status: String,
    /// Number of nodes in the cluster
    #[serde(default)]
    pub cluster_size: u32,
    /// Number of scheduler nodes ready
    #[serde(default)]
    pub nomad_nodes_ready: u32,
}

impl Project {
    /// Whether the infrastructure is up.
    pub fn is_ready(&self) -> bool {
        self.infra_status == INFRA_OK
    }
}

/// Payload of `POST /projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewProject {
    /// Project name
    pub name: String,
    /// Cloud credential to provision with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_name: Option<String>,
    /// Cloud provider (`aws`, `azure`, `outscale`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Provider region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// `single_node` or `high_availability`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infra_type: Option<String>,
    /// Node size (`dev`, `small`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_size: Option<String>,
    /// Slack webhook notified of project events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_webhook: Option<String>,
    /// Root disk size in GB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_disk_size_gb: Option<u32>,
}

impl NewProject {
    /// Payload with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Partial update sent with `PATCH /projects/{uuid}`. Unset fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectSettings {
    /// Allow external nodes to join the cluster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid_cluster_enabled: Option<bool>,
    /// Slack webhook notified of project events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_webhook: Option<String>,
    /// Monitoring engine (`netdata`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring_engine: Option<String>,
}
