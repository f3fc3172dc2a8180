//! Redis database records

use serde::{Deserialize, Serialize};

/// A redis database attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisDatabase {
    /// Database name
    pub name: String,
}

/// Envelope of `GET /projects/{uuid}/redis_databases`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RedisDatabaseList {
    #[serde(default)]
    pub(crate) redis_database_configs: Vec<RedisDatabase>,
}
