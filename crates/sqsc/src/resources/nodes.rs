//! Stateful and extra nodes
//!
//! The control plane serves both kinds from the `statefull_nodes`
//! collection; only the model name in its error texts differs. [`Nodes`] is
//! generic over a [`NodeKind`] marker so each kind reports its own
//! [`ResourceKind`] in errors.

use std::marker::PhantomData;

use sqsc_transport::HttpRequest;

use super::{Ignored, project_path};
use crate::{
    classify::Expect,
    client::Client,
    error::{ResourceKind, Result},
    locate::find_by_name,
    observability::log_wait_started,
    types::{NODE_PROVISIONNED, NewNode, StatefulNode, VolumeBinding},
    wait::WaitOptions,
};

/// Which node kind a [`Nodes`] handle addresses.
pub trait NodeKind: Send + Sync + 'static {
    /// Kind reported in errors
    const KIND: ResourceKind;
}

/// Marker for stateful nodes
#[derive(Debug, Clone, Copy)]
pub struct Stateful;

/// Marker for extra nodes
#[derive(Debug, Clone, Copy)]
pub struct Extra;

impl NodeKind for Stateful {
    const KIND: ResourceKind = ResourceKind::StatefulNode;
}

impl NodeKind for Extra {
    const KIND: ResourceKind = ResourceKind::ExtraNode;
}

/// Stateful nodes of a project
pub type StatefulNodes = Nodes<Stateful>;

/// Extra nodes of a project
pub type ExtraNodes = Nodes<Extra>;

/// Nodes of a project.
#[derive(Clone)]
pub struct Nodes<K: NodeKind> {
    client: Client,
    project: String,
    kind: PhantomData<K>,
}

impl<K: NodeKind> Nodes<K> {
    pub(crate) fn new(client: Client, project: String) -> Self {
        Self {
            client,
            project,
            kind: PhantomData,
        }
    }

    fn collection(&self) -> String {
        project_path(&self.project, "statefull_nodes")
    }

    fn item(&self, name: &str) -> String {
        project_path(&self.project, &format!("statefull_nodes/{name}"))
    }

    /// List the project's nodes.
    pub async fn list(&self) -> Result<Vec<StatefulNode>> {
        let expect = Expect::ok().not_found_as(ResourceKind::Project, &self.project);
        self.client
            .call(HttpRequest::get(self.collection()), &expect)
            .await
    }

    /// Find a node by name.
    pub async fn get(&self, name: &str) -> Result<StatefulNode> {
        find_by_name(self.list(), K::KIND, name).await
    }

    /// Create a node. It starts out `not_provisionned`.
    pub async fn create(&self, node: &NewNode) -> Result<StatefulNode> {
        let expect = Expect::created()
            .primary(K::KIND, &node.name)
            .not_found_as(ResourceKind::Project, &self.project);
        let request = HttpRequest::post(self.collection()).with_json(node)?;
        self.client.call(request, &expect).await
    }

    /// Wait until the node is `provisionned`.
    pub async fn wait(&self, name: &str, options: &WaitOptions) -> Result<StatefulNode> {
        log_wait_started(K::KIND.display_name(), name, NODE_PROVISIONNED);
        self.client
            .wait_until(options, move || self.get(name), StatefulNode::is_provisionned)
            .await
    }

    /// Create a node, then wait until it is `provisionned`.
    pub async fn create_and_wait(
        &self,
        node: &NewNode,
        options: &WaitOptions,
    ) -> Result<StatefulNode> {
        let created = self.create(node).await?;
        self.wait(&created.name, options).await
    }

    /// Delete a node.
    ///
    /// A 400 means a deployment is running on the project and is reported
    /// as [`Error::OperationInProgress`](crate::Error::OperationInProgress).
    pub async fn delete(&self, name: &str) -> Result<()> {
        let expect = Expect::ok()
            .primary(K::KIND, name)
            .not_found_as(ResourceKind::Project, &self.project)
            .in_progress_on_400();
        let _: Ignored = self
            .client
            .call(HttpRequest::delete(self.item(name)), &expect)
            .await?;
        Ok(())
    }

    /// Bind a volume to a node.
    ///
    /// An already bound volume is reported as
    /// [`Error::InvalidInput`](crate::Error::InvalidInput).
    pub async fn bind_volume(&self, name: &str, volume: &str) -> Result<()> {
        let expect = Expect::ok()
            .primary(K::KIND, name)
            .subject(ResourceKind::Volume, volume)
            .not_found_as(ResourceKind::Project, &self.project)
            .invalid_on_400(
                "volumes_to_bind",
                format!("Volume {volume} already bound with {name}"),
            );
        let request = HttpRequest::put(self.item(name)).with_json(&VolumeBinding::bind(volume))?;
        let _: Ignored = self.client.call(request, &expect).await?;
        Ok(())
    }
}

impl_resource!(Nodes<Stateful>, Nodes<Extra>);
