//! Management API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::{ClientsApi, ResourceServersApi, RolesApi};
use super::models::{Application, ResourceServer, Role};
use super::pagination::{ListMeta, Page, PaginationParams};
use crate::error::{ApiError, Result};

/// Requests per second allowed by the client-side limiter
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Auth0 Management API client
pub struct ManagementClient {
    http: HttpClient,
    base_url: String,
    token: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

/// Error body returned by the Management API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ManagementClient {
    /// Create a client for `https://<domain>/api/v2`.
    pub fn new(domain: &str, token: impl Into<String>) -> Result<Self> {
        let domain = domain
            .trim_start_matches("https://")
            .trim_end_matches('/');
        Self::with_base_url(format!("https://{}/api/v2", domain), token)
    }

    /// Create a client against an explicit base URL (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("auth0-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let per_second = std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND)
            .ok_or_else(|| ApiError::Network("invalid rate limit".to_string()))?;
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            rate_limiter,
        })
    }

    /// Send a request and map non-success statuses to [`ApiError`].
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<Response> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(&self.token)
            .query(query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status.to_string()
                } else {
                    text.clone()
                }
            });

        let err = match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::CONFLICT => ApiError::Conflict(message),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimit(Duration::from_secs(retry_after)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(message)
            }
            s if s.is_server_error() => ApiError::ServerError(message),
            s => ApiError::InvalidResponse(format!("Unexpected status code {}: {}", s, message)),
        };
        Err(err.into())
    }

    /// Send a request and decode the JSON response body.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<T> {
        let response = self.send(method, path, query, body).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }

    fn to_body<T: serde::Serialize>(value: &T) -> Result<Value> {
        Ok(serde_json::to_value(value)?)
    }
}

#[derive(Deserialize)]
struct ClientList {
    #[serde(default)]
    clients: Vec<Application>,
    #[serde(flatten)]
    meta: ListMeta,
}

#[derive(Deserialize)]
struct ResourceServerList {
    #[serde(default)]
    resource_servers: Vec<ResourceServer>,
    #[serde(flatten)]
    meta: ListMeta,
}

#[derive(Deserialize)]
struct RoleList {
    #[serde(default)]
    roles: Vec<Role>,
    #[serde(flatten)]
    meta: ListMeta,
}

#[async_trait]
impl ClientsApi for ManagementClient {
    async fn list_clients(&self, params: &PaginationParams) -> Result<Page<Application>> {
        let list: ClientList = self
            .request(Method::GET, "/clients", &params.to_query_params(), None)
            .await?;
        Ok(Page::from_envelope(list.clients, list.meta))
    }

    async fn create_client(&self, app: &Application) -> Result<Application> {
        let body = Self::to_body(app)?;
        self.request(Method::POST, "/clients", &[], Some(&body)).await
    }

    async fn update_client(&self, client_id: &str, patch: &Value) -> Result<Application> {
        let path = format!("/clients/{}", client_id);
        self.request(Method::PATCH, &path, &[], Some(patch)).await
    }

    async fn delete_client(&self, client_id: &str) -> Result<()> {
        let path = format!("/clients/{}", client_id);
        self.send(Method::DELETE, &path, &[], None).await?;
        Ok(())
    }
}

#[async_trait]
impl ResourceServersApi for ManagementClient {
    async fn list_resource_servers(
        &self,
        params: &PaginationParams,
    ) -> Result<Page<ResourceServer>> {
        let list: ResourceServerList = self
            .request(Method::GET, "/resource-servers", &params.to_query_params(), None)
            .await?;
        Ok(Page::from_envelope(list.resource_servers, list.meta))
    }

    async fn create_resource_server(&self, api: &ResourceServer) -> Result<ResourceServer> {
        let body = Self::to_body(api)?;
        self.request(Method::POST, "/resource-servers", &[], Some(&body))
            .await
    }

    async fn update_resource_server(&self, id: &str, patch: &Value) -> Result<ResourceServer> {
        let path = format!("/resource-servers/{}", id);
        self.request(Method::PATCH, &path, &[], Some(patch)).await
    }

    async fn delete_resource_server(&self, id: &str) -> Result<()> {
        let path = format!("/resource-servers/{}", id);
        self.send(Method::DELETE, &path, &[], None).await?;
        Ok(())
    }
}

#[async_trait]
impl RolesApi for ManagementClient {
    async fn list_roles(&self, params: &PaginationParams) -> Result<Page<Role>> {
        let list: RoleList = self
            .request(Method::GET, "/roles", &params.to_query_params(), None)
            .await?;
        Ok(Page::from_envelope(list.roles, list.meta))
    }

    async fn create_role(&self, role: &Role) -> Result<Role> {
        let body = Self::to_body(role)?;
        self.request(Method::POST, "/roles", &[], Some(&body)).await
    }

    async fn update_role(&self, id: &str, patch: &Value) -> Result<Role> {
        let path = format!("/roles/{}", id);
        self.request(Method::PATCH, &path, &[], Some(patch)).await
    }

    async fn delete_role(&self, id: &str) -> Result<()> {
        let path = format!("/roles/{}", id);
        self.send(Method::DELETE, &path, &[], None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_client_creation_normalises_domain() {
        let client = ManagementClient::new("https://tenant.auth0.com/", "token").unwrap();
        assert_eq!(client.base_url, "https://tenant.auth0.com/api/v2");
    }

    #[tokio::test]
    async fn test_list_clients_reads_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v2/clients")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "0".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("include_totals".into(), "true".into()),
            ]))
            .match_header("authorization", "Bearer token")
            .with_status(200)
            .with_body(
                r#"{"start":0,"limit":100,"total":101,
                    "clients":[{"client_id":"abc","name":"billing-app","callbacks":["https://a"]}]}"#,
            )
            .create_async()
            .await;

        let client =
            ManagementClient::with_base_url(format!("{}/api/v2", server.url()), "token").unwrap();
        let page = client
            .list_clients(&PaginationParams::new().page(0))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(page.has_next);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name(), "billing-app");
        assert_eq!(page.items[0].client_id(), "abc");
    }

    #[tokio::test]
    async fn test_update_sends_patch_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/api/v2/roles/rol_1")
            .match_body(Matcher::Json(json!({"description": null})))
            .with_status(200)
            .with_body(r#"{"id":"rol_1","name":"admin"}"#)
            .create_async()
            .await;

        let client =
            ManagementClient::with_base_url(format!("{}/api/v2", server.url()), "token").unwrap();
        let role = client
            .update_role("rol_1", &json!({"description": null}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(role.name(), "admin");
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/v2/resource-servers/rs_1")
            .with_status(204)
            .create_async()
            .await;

        let client =
            ManagementClient::with_base_url(format!("{}/api/v2", server.url()), "token").unwrap();
        client.delete_resource_server("rs_1").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_mapping() {
        let mut server = mockito::Server::new_async().await;
        let _conflict = server
            .mock("POST", "/api/v2/roles")
            .with_status(409)
            .with_body(r#"{"statusCode":409,"error":"Conflict","message":"Role already exists"}"#)
            .create_async()
            .await;
        let _unauthorized = server
            .mock("GET", "/api/v2/roles")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client =
            ManagementClient::with_base_url(format!("{}/api/v2", server.url()), "token").unwrap();

        let err = client.create_role(&Role::default()).await.unwrap_err();
        match err {
            Error::Api(ApiError::Conflict(msg)) => assert_eq!(msg, "Role already exists"),
            other => panic!("Expected conflict, got {other:?}"),
        }

        let err = client
            .list_roles(&PaginationParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Unauthorized)));
    }
}
