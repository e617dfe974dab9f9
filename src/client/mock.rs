//! Mock Management API client for testing
//!
//! Keeps an in-memory tenant (applications, APIs, roles) that list, create,
//! update and delete calls operate on, and records every call in order.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use super::api::{ClientsApi, ResourceServersApi, RolesApi};
use super::models::{Application, ResourceServer, Role};
use super::pagination::{MAX_PAGE_SIZE, Page, PaginationParams};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockManagementClient::new()
///     .with_roles(vec![RoleBuilder::new("admin").build()])
///     .await;
///
/// let page = mock.list_roles(&PaginationParams::new()).await?;
/// assert_eq!(page.items.len(), 1);
/// ```
#[derive(Default)]
pub struct MockManagementClient {
    clients: Arc<Mutex<Vec<Application>>>,
    resource_servers: Arc<Mutex<Vec<ResourceServer>>>,
    roles: Arc<Mutex<Vec<Role>>>,
    /// Every call, in the order it was made
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
    /// Errors keyed by (method, target); each is consumed on first match
    failures: Arc<Mutex<Vec<(String, String, ApiError)>>>,
    next_id: AtomicUsize,
}

/// A captured API call for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "list_clients", "delete_role")
    pub method: String,
    /// Natural key for creates, server ID for updates and deletes
    pub target: Option<String>,
    /// Page number for list calls
    pub page: Option<usize>,
    /// Request body for create and update calls
    pub body: Option<Value>,
}

impl MockManagementClient {
    /// Create a new mock client with an empty tenant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the tenant's applications.
    pub async fn with_clients(self, clients: Vec<Application>) -> Self {
        *self.clients.lock().await = clients;
        self
    }

    /// Seed the tenant's APIs.
    pub async fn with_resource_servers(self, apis: Vec<ResourceServer>) -> Self {
        *self.resource_servers.lock().await = apis;
        self
    }

    /// Seed the tenant's roles.
    pub async fn with_roles(self, roles: Vec<Role>) -> Self {
        *self.roles.lock().await = roles;
        self
    }

    /// Fail the next call of `method` whose target equals `target`.
    ///
    /// List calls have no target and match any `target`.
    pub async fn fail_on(self, method: &str, target: &str, error: ApiError) -> Self {
        self.failures
            .lock()
            .await
            .push((method.to_string(), target.to_string(), error));
        self
    }

    /// All captured calls, in order.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Method names of captured mutation calls (lists excluded), in order.
    pub async fn mutation_calls(&self) -> Vec<String> {
        self.captured_requests
            .lock()
            .await
            .iter()
            .filter(|r| !r.method.starts_with("list_"))
            .map(|r| match &r.target {
                Some(target) => format!("{}:{}", r.method, target),
                None => r.method.clone(),
            })
            .collect()
    }

    pub async fn clients(&self) -> Vec<Application> {
        self.clients.lock().await.clone()
    }

    pub async fn resource_servers(&self) -> Vec<ResourceServer> {
        self.resource_servers.lock().await.clone()
    }

    pub async fn roles(&self) -> Vec<Role> {
        self.roles.lock().await.clone()
    }

    /// Record the call, then fail it if a matching failure was configured.
    async fn record(
        &self,
        method: &str,
        target: Option<&str>,
        page: Option<&PaginationParams>,
        body: Option<Value>,
    ) -> Result<()> {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            target: target.map(|s| s.to_string()),
            page: page.and_then(|p| p.page),
            body,
        });

        let mut failures = self.failures.lock().await;
        let matched = failures
            .iter()
            .position(|(m, t, _)| m == method && target.is_none_or(|target| target == t));
        if let Some(idx) = matched {
            let (_, _, error) = failures.remove(idx);
            return Err(error.into());
        }
        Ok(())
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

fn page_of<T: Clone>(items: &[T], params: &PaginationParams) -> Page<T> {
    let size = params.page_size.unwrap_or(MAX_PAGE_SIZE).max(1);
    let start = params.page.unwrap_or(0) * size;
    let slice: Vec<T> = items.iter().skip(start).take(size).cloned().collect();
    Page::new(slice, start + size < items.len())
}

/// Apply a JSON merge patch (top-level keys only; `null` removes).
fn apply_patch<T: Serialize + DeserializeOwned>(resource: &T, patch: &Value) -> Result<T> {
    let mut current = serde_json::to_value(resource)?;
    if let (Some(target), Some(changes)) = (current.as_object_mut(), patch.as_object()) {
        for (key, value) in changes {
            if value.is_null() {
                target.remove(key);
            } else {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(serde_json::from_value(current)?)
}

#[async_trait]
impl ClientsApi for MockManagementClient {
    async fn list_clients(&self, params: &PaginationParams) -> Result<Page<Application>> {
        self.record("list_clients", None, Some(params), None).await?;
        Ok(page_of(&self.clients.lock().await, params))
    }

    async fn create_client(&self, app: &Application) -> Result<Application> {
        let body = serde_json::to_value(app)?;
        self.record("create_client", Some(app.name()), None, Some(body))
            .await?;

        let mut created = app.clone();
        created.client_id = Some(self.next_id("cli"));
        self.clients.lock().await.push(created.clone());
        Ok(created)
    }

    async fn update_client(&self, client_id: &str, patch: &Value) -> Result<Application> {
        self.record("update_client", Some(client_id), None, Some(patch.clone()))
            .await?;

        let mut clients = self.clients.lock().await;
        let existing = clients
            .iter_mut()
            .find(|c| c.client_id() == client_id)
            .ok_or_else(|| ApiError::NotFound(client_id.to_string()))?;
        *existing = apply_patch(existing, patch)?;
        Ok(existing.clone())
    }

    async fn delete_client(&self, client_id: &str) -> Result<()> {
        self.record("delete_client", Some(client_id), None, None)
            .await?;

        let mut clients = self.clients.lock().await;
        let before = clients.len();
        clients.retain(|c| c.client_id() != client_id);
        if clients.len() == before {
            return Err(ApiError::NotFound(client_id.to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceServersApi for MockManagementClient {
    async fn list_resource_servers(
        &self,
        params: &PaginationParams,
    ) -> Result<Page<ResourceServer>> {
        self.record("list_resource_servers", None, Some(params), None)
            .await?;
        Ok(page_of(&self.resource_servers.lock().await, params))
    }

    async fn create_resource_server(&self, api: &ResourceServer) -> Result<ResourceServer> {
        let body = serde_json::to_value(api)?;
        self.record("create_resource_server", Some(api.identifier()), None, Some(body))
            .await?;

        let mut created = api.clone();
        created.id = Some(self.next_id("rs"));
        self.resource_servers.lock().await.push(created.clone());
        Ok(created)
    }

    async fn update_resource_server(&self, id: &str, patch: &Value) -> Result<ResourceServer> {
        self.record("update_resource_server", Some(id), None, Some(patch.clone()))
            .await?;

        let mut apis = self.resource_servers.lock().await;
        let existing = apis
            .iter_mut()
            .find(|a| a.id() == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        *existing = apply_patch(existing, patch)?;
        Ok(existing.clone())
    }

    async fn delete_resource_server(&self, id: &str) -> Result<()> {
        self.record("delete_resource_server", Some(id), None, None)
            .await?;

        let mut apis = self.resource_servers.lock().await;
        let before = apis.len();
        apis.retain(|a| a.id() != id);
        if apis.len() == before {
            return Err(ApiError::NotFound(id.to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl RolesApi for MockManagementClient {
    async fn list_roles(&self, params: &PaginationParams) -> Result<Page<Role>> {
        self.record("list_roles", None, Some(params), None).await?;
        Ok(page_of(&self.roles.lock().await, params))
    }

    async fn create_role(&self, role: &Role) -> Result<Role> {
        let body = serde_json::to_value(role)?;
        self.record("create_role", Some(role.name()), None, Some(body))
            .await?;

        let mut created = role.clone();
        created.id = Some(self.next_id("rol"));
        self.roles.lock().await.push(created.clone());
        Ok(created)
    }

    async fn update_role(&self, id: &str, patch: &Value) -> Result<Role> {
        self.record("update_role", Some(id), None, Some(patch.clone()))
            .await?;

        let mut roles = self.roles.lock().await;
        let existing = roles
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        *existing = apply_patch(existing, patch)?;
        Ok(existing.clone())
    }

    async fn delete_role(&self, id: &str) -> Result<()> {
        self.record("delete_role", Some(id), None, None).await?;

        let mut roles = self.roles.lock().await;
        let before = roles.len();
        roles.retain(|r| r.id() != id);
        if roles.len() == before {
            return Err(ApiError::NotFound(id.to_string()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{ApplicationBuilder, RoleBuilder};
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_pages_through_seeded_items() {
        let roles = (0..3)
            .map(|i| RoleBuilder::new(format!("role-{i}")).build())
            .collect();
        let mock = MockManagementClient::new().with_roles(roles).await;

        let first = mock
            .list_roles(&PaginationParams::new().page_size(2).page(0))
            .await
            .unwrap();
        let second = mock
            .list_roles(&PaginationParams::new().page_size(2).page(1))
            .await
            .unwrap();

        assert_eq!(first.items.len(), 2);
        assert!(first.has_next);
        assert_eq!(second.items.len(), 1);
        assert!(!second.has_next);
    }

    #[tokio::test]
    async fn test_mock_update_applies_patch() {
        let app = ApplicationBuilder::new("web")
            .client_id("cli_web")
            .description("old")
            .build();
        let mock = MockManagementClient::new().with_clients(vec![app]).await;

        let updated = mock
            .update_client("cli_web", &json!({"description": null, "sso_disabled": true}))
            .await
            .unwrap();

        assert_eq!(updated.description, None);
        assert_eq!(updated.sso_disabled, Some(true));
        assert_eq!(mock.clients().await[0].sso_disabled, Some(true));
    }

    #[tokio::test]
    async fn test_mock_configured_failure_is_consumed() {
        let mock = MockManagementClient::new()
            .fail_on("create_role", "admin", ApiError::Conflict("exists".to_string()))
            .await;
        let role = RoleBuilder::new("admin").build();

        assert!(mock.create_role(&role).await.is_err());
        assert!(mock.create_role(&role).await.is_ok());
        assert_eq!(
            mock.mutation_calls().await,
            vec!["create_role:admin", "create_role:admin"]
        );
    }
}
