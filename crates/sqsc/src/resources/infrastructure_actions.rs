//! Infrastructure actions

use sqsc_transport::HttpRequest;

use super::project_path;
use crate::{
    classify::Expect,
    client::Client,
    error::{ResourceKind, Result},
    types::InfrastructureAction,
};

/// Infrastructure actions of a project.
#[derive(Clone)]
pub struct InfrastructureActions {
    client: Client,
    project: String,
}

impl InfrastructureActions {
    pub(crate) fn new(client: Client, project: String) -> Self {
        Self { client, project }
    }

    /// List the project's provisioning runs.
    pub async fn list(&self) -> Result<Vec<InfrastructureAction>> {
        let expect = Expect::ok().not_found_as(ResourceKind::Project, &self.project);
        let path = project_path(&self.project, "infrastructure_actions");
        self.client.call(HttpRequest::get(path), &expect).await
    }
}

impl_resource!(InfrastructureActions);
