//! Background tasks

use sqsc_transport::HttpRequest;

use super::project_path;
use crate::{
    classify::Expect,
    client::Client,
    error::{Error, ResourceKind, Result},
    observability::log_wait_started,
    types::{TASK_DONE, Task},
    wait::WaitOptions,
};

/// Background tasks.
#[derive(Clone)]
pub struct Tasks {
    client: Client,
}

impl Tasks {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List a project's tasks.
    pub async fn list(&self, project: &str) -> Result<Vec<Task>> {
        let expect = Expect::ok().not_found_as(ResourceKind::Project, project);
        self.client
            .call(HttpRequest::get(project_path(project, "tasks")), &expect)
            .await
    }

    /// Get a task by id.
    pub async fn get(&self, id: u64) -> Result<Task> {
        let expect = Expect::ok().primary(ResourceKind::Task, id.to_string());
        self.client
            .call(HttpRequest::get(format!("/tasks/{id}")), &expect)
            .await
    }

    /// Wait until the task is `done` or `cancelled`.
    ///
    /// The control plane answers a mutating call with task id 0 when another
    /// operation already holds the project; waiting on it reports
    /// [`Error::OperationInProgress`] without a request.
    pub async fn wait(&self, id: u64, options: &WaitOptions) -> Result<Task> {
        if id == 0 {
            return Err(Error::OperationInProgress);
        }
        log_wait_started(ResourceKind::Task.display_name(), &id.to_string(), TASK_DONE);
        self.client
            .wait_until(options, move || self.get(id), Task::is_finished)
            .await
    }
}

impl_resource!(Tasks);
