//! APIs (resource servers) API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::ResourceServer;
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Resource server operations
#[async_trait]
pub trait ResourceServersApi: Send + Sync {
    /// List one page of APIs.
    async fn list_resource_servers(&self, params: &PaginationParams)
    -> Result<Page<ResourceServer>>;

    /// Create an API. Returns the stored API, including its `id`.
    async fn create_resource_server(&self, api: &ResourceServer) -> Result<ResourceServer>;

    /// Patch an API. The `identifier` cannot be changed.
    async fn update_resource_server(&self, id: &str, patch: &Value) -> Result<ResourceServer>;

    /// Delete an API.
    async fn delete_resource_server(&self, id: &str) -> Result<()>;
}
