//! Applications API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::Application;
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Application (client) operations
#[async_trait]
pub trait ClientsApi: Send + Sync {
    /// List one page of applications.
    async fn list_clients(&self, params: &PaginationParams) -> Result<Page<Application>>;

    /// Create an application. Returns the stored application, including its
    /// server-assigned `client_id`.
    async fn create_client(&self, app: &Application) -> Result<Application>;

    /// Patch an application. Fields set to `null` in `patch` are cleared.
    async fn update_client(&self, client_id: &str, patch: &Value) -> Result<Application>;

    /// Delete an application.
    async fn delete_client(&self, client_id: &str) -> Result<()>;
}
