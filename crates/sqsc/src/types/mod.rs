//! Records exchanged with the control plane
//!
//! Response records use `#[serde(default)]` on optional fields: the control
//! plane adds and drops fields between releases and a missing field must not
//! fail a whole list call. Every record addressed by name implements
//! [`Named`](sqsc_core::locate::Named).

pub use batch::*;
pub use external_node::*;
pub use infrastructure_action::*;
pub use network_rule::*;
pub use node::*;
pub use project::*;
pub use redis::*;
pub use scheduling_group::*;
pub use service::*;
pub use task::*;
pub use user::*;
pub use volume::*;

pub mod batch;
pub mod external_node;
pub mod infrastructure_action;
pub mod network_rule;
pub mod node;
pub mod project;
pub mod redis;
pub mod scheduling_group;
pub mod service;
pub mod task;
pub mod user;
pub mod volume;

/// Implement [`Named`](sqsc_core::locate::Named) for records with a `name` field.
macro_rules! impl_named {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl sqsc_core::locate::Named for $ty {
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

impl_named!(
    Project,
    StatefulNode,
    ExternalNode,
    Volume,
    RedisDatabase,
    SchedulingGroup,
    Service,
    NetworkRule,
);
