//! Redis databases

use sqsc_transport::HttpRequest;

use super::{Ignored, project_path};
use crate::{
    classify::Expect,
    client::Client,
    error::{ResourceKind, Result},
    locate::find_by_name,
    types::{RedisDatabase, RedisDatabaseList},
};

/// Redis databases of a project.
#[derive(Clone)]
pub struct Redis {
    client: Client,
    project: String,
}

impl Redis {
    pub(crate) fn new(client: Client, project: String) -> Self {
        Self { client, project }
    }

    fn collection(&self) -> String {
        project_path(&self.project, "redis_databases")
    }

    /// List the project's redis databases.
    pub async fn list(&self) -> Result<Vec<RedisDatabase>> {
        let expect = Expect::ok().not_found_as(ResourceKind::Project, &self.project);
        let list: RedisDatabaseList = self
            .client
            .call(HttpRequest::get(self.collection()), &expect)
            .await?;
        Ok(list.redis_database_configs)
    }

    /// Find a redis database by name.
    pub async fn get(&self, name: &str) -> Result<RedisDatabase> {
        find_by_name(self.list(), ResourceKind::Redis, name).await
    }

    /// Add a redis database.
    pub async fn create(&self, name: &str) -> Result<()> {
        let expect = Expect::created()
            .primary(ResourceKind::Redis, name)
            .not_found_as(ResourceKind::Project, &self.project);
        let request = HttpRequest::post(self.collection())
            .with_json(&serde_json::json!({ "name": name }))?;
        let _: Ignored = self.client.call(request, &expect).await?;
        Ok(())
    }

    /// Delete a redis database.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let expect = Expect::ok()
            .primary(ResourceKind::Redis, name)
            .not_found_as(ResourceKind::Project, &self.project);
        let path = project_path(&self.project, &format!("redis_databases/{name}"));
        let _: Ignored = self.client.call(HttpRequest::delete(path), &expect).await?;
        Ok(())
    }
}

impl_resource!(Redis);
