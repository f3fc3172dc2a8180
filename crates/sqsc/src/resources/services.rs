//! Services

use sqsc_transport::HttpRequest;

use super::{Ignored, project_path};
use crate::{
    classify::Expect,
    client::Client,
    error::{ResourceKind, Result},
    locate::find_by_name,
    types::Service,
};

/// Services of a project.
#[derive(Clone)]
pub struct Services {
    client: Client,
    project: String,
}

impl Services {
    pub(crate) fn new(client: Client, project: String) -> Self {
        Self { client, project }
    }

    /// List the project's services.
    pub async fn list(&self) -> Result<Vec<Service>> {
        let expect = Expect::ok().not_found_as(ResourceKind::Project, &self.project);
        self.client
            .call(HttpRequest::get(project_path(&self.project, "services")), &expect)
            .await
    }

    /// Find a service by name.
    pub async fn get(&self, name: &str) -> Result<Service> {
        find_by_name(self.list(), ResourceKind::Service, name).await
    }

    /// Ask the scheduler to place a service again.
    pub async fn schedule(&self, name: &str) -> Result<()> {
        let expect = Expect::ok()
            .primary(ResourceKind::Service, name)
            .not_found_as(ResourceKind::Service, name);
        let path = project_path(&self.project, &format!("services/{name}/schedule"));
        let _: Ignored = self.client.call(HttpRequest::post(path), &expect).await?;
        Ok(())
    }

    /// Delete a service. Services are addressed by container id here.
    pub async fn delete(&self, service: &Service) -> Result<()> {
        let expect = Expect::ok().not_found_as(ResourceKind::Service, &service.name);
        let path = format!("/containers/{}", service.id);
        let _: Ignored = self.client.call(HttpRequest::delete(path), &expect).await?;
        Ok(())
    }
}

impl_resource!(Services);
