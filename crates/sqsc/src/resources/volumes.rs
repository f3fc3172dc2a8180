//! Volumes

use sqsc_transport::HttpRequest;

use super::{Ignored, project_path};
use crate::{
    classify::Expect,
    client::Client,
    error::{ResourceKind, Result},
    locate::find_by_name,
    observability::log_wait_started,
    types::{NewVolume, VOLUME_PROVISIONNED, Volume},
    wait::WaitOptions,
};

/// Volumes of a project.
#[derive(Clone)]
pub struct Volumes {
    client: Client,
    project: String,
}

impl Volumes {
    pub(crate) fn new(client: Client, project: String) -> Self {
        Self { client, project }
    }

    fn collection(&self) -> String {
        project_path(&self.project, "volumes")
    }

    /// List the project's volumes.
    pub async fn list(&self) -> Result<Vec<Volume>> {
        let expect = Expect::ok().not_found_as(ResourceKind::Project, &self.project);
        self.client
            .call(HttpRequest::get(self.collection()), &expect)
            .await
    }

    /// Find a volume by name.
    pub async fn get(&self, name: &str) -> Result<Volume> {
        find_by_name(self.list(), ResourceKind::Volume, name).await
    }

    /// Create a volume.
    pub async fn create(&self, volume: &NewVolume) -> Result<()> {
        let expect = Expect::created()
            .primary(ResourceKind::Volume, &volume.name)
            .not_found_as(ResourceKind::Project, &self.project);
        let request = HttpRequest::post(self.collection()).with_json(volume)?;
        let _: Ignored = self.client.call(request, &expect).await?;
        Ok(())
    }

    /// Wait until the volume is `provisionned`.
    pub async fn wait(&self, name: &str, options: &WaitOptions) -> Result<Volume> {
        log_wait_started(ResourceKind::Volume.display_name(), name, VOLUME_PROVISIONNED);
        self.client
            .wait_until(options, move || self.get(name), Volume::is_provisionned)
            .await
    }

    /// Delete a volume.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let expect = Expect::ok()
            .primary(ResourceKind::Volume, name)
            .not_found_as(ResourceKind::Project, &self.project);
        let path = project_path(&self.project, &format!("volumes/{name}"));
        let _: Ignored = self.client.call(HttpRequest::delete(path), &expect).await?;
        Ok(())
    }
}

impl_resource!(Volumes);
