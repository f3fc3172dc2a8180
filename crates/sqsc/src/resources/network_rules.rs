//! Service network rules

use sqsc_transport::HttpRequest;

use super::{Ignored, project_path};
use crate::{
    classify::Expect,
    client::Client,
    error::{ResourceKind, Result},
    types::NetworkRule,
};

/// Network rules of one service.
#[derive(Clone)]
pub struct NetworkRules {
    client: Client,
    project: String,
    service: String,
}

impl NetworkRules {
    pub(crate) fn new(client: Client, project: String, service: String) -> Self {
        Self {
            client,
            project,
            service,
        }
    }

    fn collection(&self) -> String {
        project_path(
            &self.project,
            &format!("services/{}/service_network_rules", self.service),
        )
    }

    /// List the service's rules.
    ///
    /// A 404 may mean the project or the service is missing; a server message
    /// naming the model decides, the service otherwise.
    pub async fn list(&self) -> Result<Vec<NetworkRule>> {
        let expect = Expect::ok()
            .subject(ResourceKind::Project, &self.project)
            .not_found_as(ResourceKind::Service, &self.service);
        self.client
            .call(HttpRequest::get(self.collection()), &expect)
            .await
    }

    /// Add a rule.
    pub async fn create(&self, rule: &NetworkRule) -> Result<()> {
        let expect = Expect::created()
            .primary(ResourceKind::NetworkRule, &rule.name)
            .subject(ResourceKind::Project, &self.project)
            .not_found_as(ResourceKind::Service, &self.service);
        let request = HttpRequest::post(self.collection()).with_json(rule)?;
        let _: Ignored = self.client.call(request, &expect).await?;
        Ok(())
    }

    /// Remove a rule.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let expect = Expect::ok()
            .primary(ResourceKind::NetworkRule, name)
            .subject(ResourceKind::Service, &self.service)
            .subject(ResourceKind::Project, &self.project);
        let path = format!("{}/{name}", self.collection());
        let _: Ignored = self.client.call(HttpRequest::delete(path), &expect).await?;
        Ok(())
    }
}

impl_resource!(NetworkRules);
