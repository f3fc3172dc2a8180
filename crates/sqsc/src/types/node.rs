//! Stateful and extra node records
//!
//! Both kinds live in the same `statefull_nodes` collection and share one
//! record shape.

use serde::{Deserialize, Serialize};

/// Status of a node that is up
pub const NODE_PROVISIONNED: &str = "provisionned";

/// A stateful (or extra) node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatefulNode {
    /// Numeric id
    pub id: u64,
    /// Node name
    pub name: String,
    /// Instance type
    #[serde(default)]
    pub node_type: String,
    /// Availability zone
    #[serde(default)]
    pub zone: String,
    /// Provisioning status
    #[serde(default)]
    pub status: String,
}

impl StatefulNode {
    /// Whether the node is up.
    pub fn is_provisionned(&self) -> bool {
        self.status == NODE_PROVISIONNED
    }
}

/// Extra nodes share the stateful node record.
pub type ExtraNode = StatefulNode;

/// Payload of `POST /projects/{uuid}/statefull_nodes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNode {
    /// Node name
    pub name: String,
    /// Instance type
    pub node_type: String,
    /// Availability zone
    pub zone: String,
}

impl NewNode {
    /// Build a creation payload.
    pub fn new(
        name: impl Into<String>,
        node_type: impl Into<String>,
        zone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            zone: zone.into(),
        }
    }
}

/// Payload of the bind call on `PUT /projects/{uuid}/statefull_nodes/{name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VolumeBinding {
    /// Volume names to attach
    pub volumes_to_bind: Vec<String>,
    /// Volume names to detach
    pub volumes_to_unbind: Vec<String>,
}

impl VolumeBinding {
    /// Attach a single volume.
    pub fn bind(volume: impl Into<String>) -> Self {
        Self {
            volumes_to_bind: vec![volume.into()],
            volumes_to_unbind: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_payload_shape() {
        assert_eq!(
            serde_json::to_string(&VolumeBinding::bind("vol02c")).unwrap(),
            r#"{"volumes_to_bind":["vol02c"],"volumes_to_unbind":[]}"#
        );
    }

    #[test]
    fn test_node_status() {
        let node: StatefulNode =
            serde_json::from_str(r#"{"id":23,"name":"node1a","status":"not_provisionned"}"#)
                .unwrap();
        assert!(!node.is_provisionned());
        assert_eq!(node.zone, "");
    }
}
