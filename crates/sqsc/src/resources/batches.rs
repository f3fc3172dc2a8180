//! Batches

use sqsc_transport::HttpRequest;

use super::{Ignored, project_path};
use crate::{
    classify::Expect,
    client::Client,
    error::{ResourceKind, Result},
    locate::find_by_name,
    types::{Batch, BatchUpdate, CreatedBatch, NewBatch},
};

/// Batches of a project.
#[derive(Clone)]
pub struct Batches {
    client: Client,
    project: String,
}

impl Batches {
    pub(crate) fn new(client: Client, project: String) -> Self {
        Self { client, project }
    }

    fn collection(&self) -> String {
        project_path(&self.project, "batches")
    }

    fn item(&self, name: &str) -> String {
        project_path(&self.project, &format!("batches/{name}"))
    }

    /// List the project's batches.
    pub async fn list(&self) -> Result<Vec<Batch>> {
        let expect = Expect::ok().not_found_as(ResourceKind::Project, &self.project);
        self.client
            .call(HttpRequest::get(self.collection()), &expect)
            .await
    }

    /// Find a batch by name.
    pub async fn get(&self, name: &str) -> Result<Batch> {
        find_by_name(self.list(), ResourceKind::Batch, name).await
    }

    /// Create a batch.
    pub async fn create(&self, batch: &NewBatch) -> Result<CreatedBatch> {
        let expect = Expect::created()
            .primary(ResourceKind::Batch, &batch.settings.name)
            .not_found_as(ResourceKind::Project, &self.project);
        let request = HttpRequest::post(self.collection()).with_json(batch)?;
        self.client.call(request, &expect).await
    }

    /// Change a batch's command, limits or environment.
    pub async fn update(&self, name: &str, update: &BatchUpdate) -> Result<()> {
        let expect = Expect::ok()
            .primary(ResourceKind::Batch, name)
            .not_found_as(ResourceKind::Batch, name);
        let request = HttpRequest::put(self.item(name)).with_json(update)?;
        let _: Ignored = self.client.call(request, &expect).await?;
        Ok(())
    }

    /// Run a batch now.
    pub async fn execute(&self, name: &str) -> Result<()> {
        let expect = Expect::ok()
            .primary(ResourceKind::Batch, name)
            .not_found_as(ResourceKind::Batch, name);
        let path = project_path(&self.project, &format!("batches/{name}/execute"));
        let _: Ignored = self.client.call(HttpRequest::post(path), &expect).await?;
        Ok(())
    }

    /// Delete a batch.
    ///
    /// A 400 is reported as
    /// [`Error::OperationInProgress`](crate::Error::OperationInProgress).
    pub async fn delete(&self, name: &str) -> Result<()> {
        let expect = Expect::ok()
            .primary(ResourceKind::Batch, name)
            .not_found_as(ResourceKind::Project, &self.project)
            .in_progress_on_400();
        let _: Ignored = self
            .client
            .call(HttpRequest::delete(self.item(name)), &expect)
            .await?;
        Ok(())
    }
}

impl_resource!(Batches);
