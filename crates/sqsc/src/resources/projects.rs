//! Projects

use serde::Deserialize;
use sqsc_transport::HttpRequest;

use super::{Ignored, project_path};
use crate::{
    classify::Expect,
    client::Client,
    error::{Error, ResourceKind, Result},
    locate::find_by_name,
    observability::log_wait_started,
    types::{INFRA_ERROR, INFRA_OK, NewProject, Project, ProjectSettings},
    wait::WaitOptions,
};

/// Body of `POST /projects`.
#[derive(Deserialize)]
struct CreatedProject {
    #[serde(flatten)]
    project: Project,
    #[serde(default)]
    error: Option<String>,
}

/// Projects of the account.
#[derive(Clone)]
pub struct Projects {
    client: Client,
}

impl Projects {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List every project the token can see.
    pub async fn list(&self) -> Result<Vec<Project>> {
        self.client
            .call(HttpRequest::get("/projects"), &Expect::ok())
            .await
    }

    /// Get a project by UUID.
    pub async fn get(&self, uuid: &str) -> Result<Project> {
        let expect = Expect::ok().primary(ResourceKind::Project, uuid);
        self.client
            .call(HttpRequest::get(project_path(uuid, "")), &expect)
            .await
    }

    /// Find a project by name.
    pub async fn by_name(&self, name: &str) -> Result<Project> {
        find_by_name(self.list(), ResourceKind::Project, name).await
    }

    /// Create a project. Provisioning starts right away; see
    /// [`Projects::wait`].
    ///
    /// The control plane may answer 201 and still report a failed creation
    /// in an `error` field. That comes back as [`Error::Unexpected`] carrying
    /// the server's message.
    pub async fn create(&self, project: &NewProject) -> Result<Project> {
        let expect = Expect::created().primary(ResourceKind::Project, &project.name);
        let request = HttpRequest::post("/projects").with_json(project)?;
        let (created, response): (CreatedProject, _) =
            self.client.call_keeping_response(request, &expect).await?;

        match created.error {
            Some(message) if !message.is_empty() => Err(Error::Unexpected {
                status: response.status,
                message,
                body: response.text(),
            }),
            _ => Ok(created.project),
        }
    }

    /// Wait until the project's infrastructure is `ok`.
    ///
    /// An `error` status ends the wait with [`Error::Failed`].
    pub async fn wait(&self, uuid: &str, options: &WaitOptions) -> Result<Project> {
        log_wait_started(ResourceKind::Project.display_name(), uuid, INFRA_OK);
        self.client
            .wait_until(
                options,
                move || async move {
                    let project = self.get(uuid).await?;
                    if project.infra_status == INFRA_ERROR {
                        return Err(Error::Failed {
                            kind: ResourceKind::Project,
                            identifier: uuid.to_string(),
                            status: project.infra_status,
                        });
                    }
                    Ok(project)
                },
                Project::is_ready,
            )
            .await
    }

    /// Update project settings. Fields left unset are not sent.
    pub async fn update_settings(&self, uuid: &str, settings: &ProjectSettings) -> Result<()> {
        let expect = Expect::ok().primary(ResourceKind::Project, uuid);
        let request = HttpRequest::patch(project_path(uuid, "")).with_json(settings)?;
        let _: Ignored = self.client.call(request, &expect).await?;
        Ok(())
    }

    /// Tear down a project's infrastructure.
    ///
    /// A refusal comes back as [`Error::InvalidInput`] on `unprovision`.
    pub async fn unprovision(&self, uuid: &str) -> Result<()> {
        let expect = Expect::statuses(&[200, 202, 204])
            .primary(ResourceKind::Project, uuid)
            .invalid_on_400("unprovision", "project cannot be unprovisioned");
        let _: Ignored = self
            .client
            .call(HttpRequest::post(project_path(uuid, "unprovision")), &expect)
            .await?;
        Ok(())
    }

    /// Delete an unprovisioned project.
    pub async fn delete(&self, uuid: &str) -> Result<()> {
        let expect = Expect::statuses(&[200, 204]).primary(ResourceKind::Project, uuid);
        let _: Ignored = self
            .client
            .call(HttpRequest::delete(project_path(uuid, "")), &expect)
            .await?;
        Ok(())
    }
}

impl_resource!(Projects);
