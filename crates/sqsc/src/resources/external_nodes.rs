//! External nodes

use sqsc_transport::HttpRequest;

use super::{Ignored, project_path};
use crate::{
    classify::Expect,
    client::Client,
    error::{ResourceKind, Result},
    locate::find_by_name,
    observability::log_wait_started,
    types::{ExternalNode, NewExternalNode},
    wait::WaitOptions,
};

/// External nodes of a project.
#[derive(Clone)]
pub struct ExternalNodes {
    client: Client,
    project: String,
}

impl ExternalNodes {
    pub(crate) fn new(client: Client, project: String) -> Self {
        Self { client, project }
    }

    fn collection(&self) -> String {
        project_path(&self.project, "external_nodes")
    }

    /// List the project's external nodes.
    pub async fn list(&self) -> Result<Vec<ExternalNode>> {
        let expect = Expect::ok().not_found_as(ResourceKind::Project, &self.project);
        self.client
            .call(HttpRequest::get(self.collection()), &expect)
            .await
    }

    /// Find an external node by name.
    pub async fn get(&self, name: &str) -> Result<ExternalNode> {
        find_by_name(self.list(), ResourceKind::ExternalNode, name).await
    }

    /// Declare an external node.
    pub async fn create(&self, name: &str, public_ip: &str) -> Result<ExternalNode> {
        let payload = NewExternalNode {
            name: name.to_string(),
            public_ip: public_ip.to_string(),
        };
        let expect = Expect::created()
            .primary(ResourceKind::ExternalNode, name)
            .not_found_as(ResourceKind::Project, &self.project);
        let request = HttpRequest::post(self.collection()).with_json(&payload)?;
        self.client.call(request, &expect).await
    }

    /// Wait until the node reaches one of `targets`.
    ///
    /// With no target statuses the node is fetched once and returned as is.
    pub async fn wait(
        &self,
        name: &str,
        targets: &[&str],
        options: &WaitOptions,
    ) -> Result<ExternalNode> {
        if targets.is_empty() {
            return self.get(name).await;
        }
        log_wait_started(
            ResourceKind::ExternalNode.display_name(),
            name,
            &targets.join("|"),
        );
        self.client
            .wait_until(options, move || self.get(name), |node: &ExternalNode| {
                targets.contains(&node.status.as_str())
            })
            .await
    }

    /// Remove an external node.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let expect = Expect::ok()
            .primary(ResourceKind::ExternalNode, name)
            .not_found_as(ResourceKind::Project, &self.project);
        let path = project_path(&self.project, &format!("external_nodes/{name}"));
        let _: Ignored = self.client.call(HttpRequest::delete(path), &expect).await?;
        Ok(())
    }
}

impl_resource!(ExternalNodes);
