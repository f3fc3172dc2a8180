//! External node records

use serde::{Deserialize, Serialize};

/// A node hosted outside the cloud provider, joined to the cluster over VPN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalNode {
    /// Numeric id
    pub id: u64,
    /// Node name
    pub name: String,
    /// Public address the node is reachable at
    #[serde(default)]
    pub public_ip: String,
    /// Provisioning status
    #[serde(default)]
    pub status: String,
    /// VPN network the node was given
    #[serde(default)]
    pub private_network: String,
}

/// Payload of `POST /projects/{uuid}/external_nodes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewExternalNode {
    /// Node name
    pub name: String,
    /// Public address
    pub public_ip: String,
}
