//! Scheduling groups

use sqsc_transport::HttpRequest;

use super::{Ignored, project_path};
use crate::{
    classify::Expect,
    client::Client,
    error::{ResourceKind, Result},
    locate::find_by_name,
    types::SchedulingGroup,
};

/// Scheduling groups of a project.
#[derive(Clone)]
pub struct SchedulingGroups {
    client: Client,
    project: String,
}

impl SchedulingGroups {
    pub(crate) fn new(client: Client, project: String) -> Self {
        Self { client, project }
    }

    fn collection(&self) -> String {
        project_path(&self.project, "scheduling_groups")
    }

    /// List the project's scheduling groups.
    pub async fn list(&self) -> Result<Vec<SchedulingGroup>> {
        let expect = Expect::ok().not_found_as(ResourceKind::Project, &self.project);
        self.client
            .call(HttpRequest::get(self.collection()), &expect)
            .await
    }

    /// Find a scheduling group by name.
    pub async fn get(&self, name: &str) -> Result<SchedulingGroup> {
        find_by_name(self.list(), ResourceKind::SchedulingGroup, name).await
    }

    /// Create a scheduling group.
    pub async fn create(&self, name: &str) -> Result<SchedulingGroup> {
        let expect = Expect::created()
            .primary(ResourceKind::SchedulingGroup, name)
            .not_found_as(ResourceKind::Project, &self.project);
        let request = HttpRequest::post(self.collection())
            .with_json(&serde_json::json!({ "name": name }))?;
        self.client.call(request, &expect).await
    }

    /// Delete a scheduling group.
    ///
    /// A 400 is reported as
    /// [`Error::OperationInProgress`](crate::Error::OperationInProgress).
    pub async fn delete(&self, name: &str) -> Result<()> {
        let expect = Expect::ok()
            .primary(ResourceKind::SchedulingGroup, name)
            .not_found_as(ResourceKind::Project, &self.project)
            .in_progress_on_400();
        let path = project_path(&self.project, &format!("scheduling_groups/{name}"));
        let _: Ignored = self.client.call(HttpRequest::delete(path), &expect).await?;
        Ok(())
    }
}

impl_resource!(SchedulingGroups);
