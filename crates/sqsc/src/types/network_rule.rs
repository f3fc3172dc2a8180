//! Network rule records

use serde::{Deserialize, Serialize};

/// A rule exposing a service port through the load balancer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRule {
    /// Rule name
    pub name: String,
    /// Port the service listens on
    pub internal_port: u16,
    /// Protocol the service speaks
    pub internal_protocol: String,
    /// Port exposed to the outside
    pub external_port: u16,
    /// Protocol exposed to the outside
    pub external_protocol: String,
    /// Host match expression
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub domain_expression: String,
    /// Path prefix match
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path_prefix: String,
}
