//! Roles API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::Role;
use crate::client::pagination::{Page, PaginationParams};
use crate::error::Result;

/// Role operations
#[async_trait]
pub trait RolesApi: Send + Sync {
    /// List one page of roles.
    async fn list_roles(&self, params: &PaginationParams) -> Result<Page<Role>>;

    /// Create a role. Returns the stored role, including its `id`.
    async fn create_role(&self, role: &Role) -> Result<Role>;

    /// Patch a role.
    async fn update_role(&self, id: &str, patch: &Value) -> Result<Role>;

    /// Delete a role.
    async fn delete_role(&self, id: &str) -> Result<()>;
}
