//! Resource wrappers
//!
//! One handle per resource kind. Each operation issues one request, states
//! what it expects through an [`Expect`](crate::classify::Expect) and lets the
//! classifier decide. Handles are cheap: a [`Client`] clone plus the owning
//! project's UUID.

macro_rules! impl_resource {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::resources::Resource for $ty {
                fn client(&self) -> &$crate::client::Client {
                    &self.client
                }
            }
        )+
    };
}

pub mod batches;
pub mod external_nodes;
pub mod infrastructure_actions;
pub mod network_rules;
pub mod nodes;
pub mod projects;
pub mod redis;
pub mod scheduling_groups;
pub mod services;
pub mod tasks;
pub mod volumes;

pub use batches::Batches;
pub use external_nodes::ExternalNodes;
pub use infrastructure_actions::InfrastructureActions;
pub use network_rules::NetworkRules;
pub use nodes::{Extra, ExtraNodes, NodeKind, Nodes, Stateful, StatefulNodes};
pub use projects::Projects;
pub use redis::Redis;
pub use scheduling_groups::SchedulingGroups;
pub use services::Services;
pub use tasks::Tasks;
pub use volumes::Volumes;

use crate::client::Client;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}

/// Body of responses whose content is not used.
pub(crate) type Ignored = serde::de::IgnoredAny;

/// `/projects/{project}/{suffix}`
pub(crate) fn project_path(project: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        format!("/projects/{project}")
    } else {
        format!("/projects/{project}/{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_path() {
        assert_eq!(project_path("abc", ""), "/projects/abc");
        assert_eq!(project_path("abc", "volumes/vol01"), "/projects/abc/volumes/vol01");
    }

    #[test]
    fn test_handles_share_the_client() {
        let client = Client::new("test-token").unwrap();

        let stateful = client.stateful_nodes("abc");
        let extra = client.extra_nodes("abc");
        let rules = client.network_rules("abc", "web");

        for handle in [stateful.client(), extra.client(), rules.client()] {
            assert_eq!(handle.poll_interval(), client.poll_interval());
        }
        assert_eq!(client.tasks().client().poll_interval(), client.poll_interval());
    }
}
