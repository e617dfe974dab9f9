//! Resource kind descriptors
//!
//! A [`ResourceKind`] tells the reconciler how to key, diff and mutate one
//! kind of tenant resource. The three descriptors borrow a
//! [`ManagementApi`] implementation and forward CRUD calls to it.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};

use super::diff::Patch;
use crate::client::{Application, ManagementApi, Page, PaginationParams, ResourceServer, Role};
use crate::error::Result;

/// Name of the tenant's built-in application group; never deleted.
pub const ALL_APPLICATIONS: &str = "All Applications";

/// Everything the reconciler needs to know about one resource kind.
#[async_trait]
pub trait ResourceKind: Send + Sync {
    type Resource: Clone + Serialize + Send + Sync + 'static;

    /// Summary row name, e.g. `Applications`
    fn resource_name(&self) -> &'static str;

    /// Singular noun used in messages, e.g. `application`
    fn singular(&self) -> &'static str;

    /// Plural noun used in messages, e.g. `applications`
    fn plural(&self) -> &'static str;

    fn natural_key(resource: &Self::Resource) -> &str;

    fn server_id(resource: &Self::Resource) -> &str;

    /// Existing keys that must never be deleted.
    fn reserved_keys(&self) -> Vec<String> {
        Vec::new()
    }

    /// Move `existing` to the declared state and report the changed fields.
    fn diff(existing: &mut Self::Resource, declared: &Self::Resource, allow_delete: bool) -> Patch;

    /// One-line JSON used in mutation reports.
    fn describe(resource: &Self::Resource) -> Value;

    async fn list(&self, params: PaginationParams) -> Result<Page<Self::Resource>>;

    async fn create(&self, resource: &Self::Resource) -> Result<Self::Resource>;

    async fn update(&self, id: &str, patch: &Value) -> Result<Self::Resource>;

    async fn delete(&self, id: &str) -> Result<()>;
}

// ============================================================================
// Applications
// ============================================================================

pub struct Applications<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: ?Sized> Applications<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a, C: ManagementApi + ?Sized> ResourceKind for Applications<'a, C> {
    type Resource = Application;

    fn resource_name(&self) -> &'static str {
        "Applications"
    }

    fn singular(&self) -> &'static str {
        "application"
    }

    fn plural(&self) -> &'static str {
        "applications"
    }

    fn natural_key(app: &Application) -> &str {
        app.name()
    }

    fn server_id(app: &Application) -> &str {
        app.client_id()
    }

    fn reserved_keys(&self) -> Vec<String> {
        vec![ALL_APPLICATIONS.to_string()]
    }

    fn diff(existing: &mut Application, declared: &Application, allow_delete: bool) -> Patch {
        let mut p = Patch::new();
        let e = existing;
        let d = declared;
        p.field("description", &mut e.description, &d.description, allow_delete);
        p.field("app_type", &mut e.app_type, &d.app_type, allow_delete);
        p.field("is_first_party", &mut e.is_first_party, &d.is_first_party, allow_delete);
        p.field(
            "is_token_endpoint_ip_header_trusted",
            &mut e.is_token_endpoint_ip_header_trusted,
            &d.is_token_endpoint_ip_header_trusted,
            allow_delete,
        );
        p.field("oidc_conformant", &mut e.oidc_conformant, &d.oidc_conformant, allow_delete);
        p.field("sso_disabled", &mut e.sso_disabled, &d.sso_disabled, allow_delete);
        p.field("cross_origin_auth", &mut e.cross_origin_auth, &d.cross_origin_auth, allow_delete);
        p.field(
            "custom_login_page_on",
            &mut e.custom_login_page_on,
            &d.custom_login_page_on,
            allow_delete,
        );
        p.field(
            "token_endpoint_auth_method",
            &mut e.token_endpoint_auth_method,
            &d.token_endpoint_auth_method,
            allow_delete,
        );
        p.list("callbacks", &mut e.callbacks, &d.callbacks, allow_delete);
        p.list("allowed_origins", &mut e.allowed_origins, &d.allowed_origins, allow_delete);
        p.list("web_origins", &mut e.web_origins, &d.web_origins, allow_delete);
        p.list(
            "allowed_logout_urls",
            &mut e.allowed_logout_urls,
            &d.allowed_logout_urls,
            allow_delete,
        );
        p.list("grant_types", &mut e.grant_types, &d.grant_types, allow_delete);
        p
    }

    fn describe(app: &Application) -> Value {
        json!({"name": app.name(), "client_id": app.client_id()})
    }

    async fn list(&self, params: PaginationParams) -> Result<Page<Application>> {
        self.client.list_clients(&params).await
    }

    async fn create(&self, app: &Application) -> Result<Application> {
        self.client.create_client(app).await
    }

    async fn update(&self, id: &str, patch: &Value) -> Result<Application> {
        self.client.update_client(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete_client(id).await
    }
}

// ============================================================================
// APIs
// ============================================================================

pub struct Apis<'a, C: ?Sized> {
    client: &'a C,
    domains: Vec<String>,
}

impl<'a, C: ?Sized> Apis<'a, C> {
    /// `domains` are the tenant domains whose Management API must be kept.
    pub fn new(client: &'a C, domains: &[&str]) -> Self {
        let mut normalized: Vec<String> = Vec::new();
        for domain in domains {
            let d = domain.trim_start_matches("https://").trim_end_matches('/');
            if !d.is_empty() && !normalized.iter().any(|n| n == d) {
                normalized.push(d.to_string());
            }
        }
        Self {
            client,
            domains: normalized,
        }
    }
}

/// Identifier of a tenant's own Management API.
pub fn management_api_identifier(domain: &str) -> String {
    format!("https://{}/api/v2/", domain)
}

#[async_trait]
impl<'a, C: ManagementApi + ?Sized> ResourceKind for Apis<'a, C> {
    type Resource = ResourceServer;

    fn resource_name(&self) -> &'static str {
        "APIs"
    }

    fn singular(&self) -> &'static str {
        "API"
    }

    fn plural(&self) -> &'static str {
        "APIs"
    }

    fn natural_key(api: &ResourceServer) -> &str {
        api.identifier()
    }

    fn server_id(api: &ResourceServer) -> &str {
        api.id()
    }

    fn reserved_keys(&self) -> Vec<String> {
        self.domains
            .iter()
            .map(|d| management_api_identifier(d))
            .collect()
    }

    fn diff(existing: &mut ResourceServer, declared: &ResourceServer, allow_delete: bool) -> Patch {
        let mut p = Patch::new();
        let e = existing;
        let d = declared;
        p.field("name", &mut e.name, &d.name, allow_delete);
        p.list("scopes", &mut e.scopes, &d.scopes, allow_delete);
        p.field("signing_alg", &mut e.signing_alg, &d.signing_alg, allow_delete);
        p.field("signing_secret", &mut e.signing_secret, &d.signing_secret, allow_delete);
        p.field(
            "allow_offline_access",
            &mut e.allow_offline_access,
            &d.allow_offline_access,
            allow_delete,
        );
        p.field("token_lifetime", &mut e.token_lifetime, &d.token_lifetime, allow_delete);
        p.field(
            "token_lifetime_for_web",
            &mut e.token_lifetime_for_web,
            &d.token_lifetime_for_web,
            allow_delete,
        );
        p.field(
            "skip_consent_for_verifiable_first_party_clients",
            &mut e.skip_consent_for_verifiable_first_party_clients,
            &d.skip_consent_for_verifiable_first_party_clients,
            allow_delete,
        );
        p.field("enforce_policies", &mut e.enforce_policies, &d.enforce_policies, allow_delete);
        p.field("token_dialect", &mut e.token_dialect, &d.token_dialect, allow_delete);
        p
    }

    fn describe(api: &ResourceServer) -> Value {
        json!({"name": api.name(), "identifier": api.identifier(), "id": api.id()})
    }

    async fn list(&self, params: PaginationParams) -> Result<Page<ResourceServer>> {
        self.client.list_resource_servers(&params).await
    }

    async fn create(&self, api: &ResourceServer) -> Result<ResourceServer> {
        self.client.create_resource_server(api).await
    }

    async fn update(&self, id: &str, patch: &Value) -> Result<ResourceServer> {
        self.client.update_resource_server(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete_resource_server(id).await
    }
}

// ============================================================================
// Roles
// ============================================================================

pub struct Roles<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: ?Sized> Roles<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a, C: ManagementApi + ?Sized> ResourceKind for Roles<'a, C> {
    type Resource = Role;

    fn resource_name(&self) -> &'static str {
        "Roles"
    }

    fn singular(&self) -> &'static str {
        "role"
    }

    fn plural(&self) -> &'static str {
        "roles"
    }

    fn natural_key(role: &Role) -> &str {
        role.name()
    }

    fn server_id(role: &Role) -> &str {
        role.id()
    }

    fn diff(existing: &mut Role, declared: &Role, allow_delete: bool) -> Patch {
        let mut p = Patch::new();
        p.field(
            "description",
            &mut existing.description,
            &declared.description,
            allow_delete,
        );
        p
    }

    fn describe(role: &Role) -> Value {
        json!({"name": role.name(), "id": role.id()})
    }

    async fn list(&self, params: PaginationParams) -> Result<Page<Role>> {
        self.client.list_roles(&params).await
    }

    async fn create(&self, role: &Role) -> Result<Role> {
        self.client.create_role(role).await
    }

    async fn update(&self, id: &str, patch: &Value) -> Result<Role> {
        self.client.update_role(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete_role(id).await
    }
}
