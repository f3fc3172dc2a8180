//! Infrastructure action records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One provisioning run of a project's infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureAction {
    /// Action UUID
    pub uuid: String,
    /// `provision`, `unprovision`, ...
    #[serde(default)]
    pub action_type: String,
    /// Run status
    #[serde(default)]
    pub status: String,
    /// Owning project id
    #[serde(default)]
    pub project_id: u64,
    /// Start time
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// End time, unset while running
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    /// Run log
    #[serde(default)]
    pub log: String,
}
