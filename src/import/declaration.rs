//! Tenant declaration YAML
//!
//! Reads the `clients`, `resourceServers` and `roles` sections of a Deploy
//! CLI tenant file. Every other section is ignored. Duplicate natural keys
//! are rejected before keyword substitution runs.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Deserializer};

use super::keywords::{Keywords, Substitute};
use crate::client::{Application, ResourceServer, ResourceServerScope, Role};
use crate::error::{ImportError, Result};

/// Parsed tenant declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TenantDeclaration {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub clients: Vec<DeclaredClient>,

    #[serde(
        default,
        rename = "resourceServers",
        deserialize_with = "null_as_empty"
    )]
    pub resource_servers: Vec<DeclaredResourceServer>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub roles: Vec<DeclaredRole>,
}

/// An application entry (`clients:`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeclaredClient {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub app_type: Option<String>,
    #[serde(default)]
    pub is_first_party: Option<bool>,
    #[serde(default)]
    pub is_token_endpoint_ip_header_trusted: Option<bool>,
    #[serde(default)]
    pub oidc_conformant: Option<bool>,
    #[serde(default)]
    pub sso_disabled: Option<bool>,
    #[serde(default)]
    pub cross_origin_auth: Option<bool>,
    #[serde(default)]
    pub custom_login_page_on: Option<bool>,
    #[serde(default)]
    pub token_endpoint_auth_method: Option<String>,
    #[serde(default)]
    pub callbacks: Option<Vec<String>>,
    #[serde(default)]
    pub allowed_origins: Option<Vec<String>>,
    #[serde(default)]
    pub web_origins: Option<Vec<String>>,
    #[serde(default)]
    pub allowed_logout_urls: Option<Vec<String>>,
    #[serde(default)]
    pub grant_types: Option<Vec<String>>,
}

/// An API entry (`resourceServers:`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeclaredResourceServer {
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scopes: Option<Vec<DeclaredScope>>,
    #[serde(default)]
    pub signing_alg: Option<String>,
    #[serde(default)]
    pub signing_secret: Option<String>,
    #[serde(default)]
    pub allow_offline_access: Option<bool>,
    #[serde(default)]
    pub token_lifetime: Option<i64>,
    #[serde(default)]
    pub token_lifetime_for_web: Option<i64>,
    #[serde(default)]
    pub skip_consent_for_verifiable_first_party_clients: Option<bool>,
    #[serde(default)]
    pub enforce_policies: Option<bool>,
    #[serde(default)]
    pub token_dialect: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeclaredScope {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A role entry (`roles:`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeclaredRole {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Parsed and substituted, not reconciled
    #[serde(default)]
    pub permissions: Option<Vec<DeclaredPermission>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeclaredPermission {
    #[serde(default)]
    pub permission_name: Option<String>,
    #[serde(default)]
    pub resource_server_identifier: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TenantDeclaration {
    /// Read, validate and substitute the declaration at `path`.
    pub fn load(path: impl AsRef<Path>, keywords: &Keywords) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ImportError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&contents, keywords)
    }

    /// Parse, reject duplicate natural keys, then apply keyword substitution.
    pub fn from_yaml(contents: &str, keywords: &Keywords) -> Result<Self> {
        let mut declaration = Self::parse(contents)?;
        declaration.check_duplicates()?;
        declaration.substitute(keywords);
        debug!(
            "Declaration: {} applications, {} APIs, {} roles",
            declaration.clients.len(),
            declaration.resource_servers.len(),
            declaration.roles.len()
        );
        Ok(declaration)
    }

    /// Parse without validation or substitution.
    pub fn parse(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|e| ImportError::InvalidYaml(e.to_string()).into())
    }

    /// Fail with one line per repeated natural key, across all kinds.
    pub fn check_duplicates(&self) -> Result<()> {
        let mut found = Vec::new();
        collect_duplicates(
            self.clients.iter().map(|c| c.name.as_str()),
            "name in client",
            &mut found,
        );
        collect_duplicates(
            self.resource_servers.iter().map(|r| r.identifier.as_str()),
            "identifier in resourceServer",
            &mut found,
        );
        collect_duplicates(
            self.roles.iter().map(|r| r.name.as_str()),
            "name in role",
            &mut found,
        );

        if found.is_empty() {
            Ok(())
        } else {
            Err(ImportError::Duplicates(found).into())
        }
    }

    pub fn applications(&self) -> Vec<Application> {
        self.clients.iter().map(DeclaredClient::to_remote).collect()
    }

    pub fn apis(&self) -> Vec<ResourceServer> {
        self.resource_servers
            .iter()
            .map(DeclaredResourceServer::to_remote)
            .collect()
    }

    pub fn roles(&self) -> Vec<Role> {
        self.roles.iter().map(DeclaredRole::to_remote).collect()
    }
}

fn collect_duplicates<'a>(
    keys: impl Iterator<Item = &'a str>,
    label: &str,
    found: &mut Vec<String>,
) {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            found.push(format!("found duplicate {}: {}", label, key));
        }
    }
}

/// Empty strings mean "not provided" for enum-like fields.
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl DeclaredClient {
    pub fn to_remote(&self) -> Application {
        Application {
            client_id: None,
            client_secret: None,
            name: Some(self.name.clone()),
            description: self.description.clone(),
            app_type: self.app_type.clone(),
            is_first_party: self.is_first_party,
            is_token_endpoint_ip_header_trusted: self.is_token_endpoint_ip_header_trusted,
            oidc_conformant: self.oidc_conformant,
            sso_disabled: self.sso_disabled,
            cross_origin_auth: self.cross_origin_auth,
            custom_login_page_on: self.custom_login_page_on,
            token_endpoint_auth_method: non_empty(&self.token_endpoint_auth_method),
            callbacks: self.callbacks.clone(),
            allowed_origins: self.allowed_origins.clone(),
            web_origins: self.web_origins.clone(),
            allowed_logout_urls: self.allowed_logout_urls.clone(),
            grant_types: self.grant_types.clone(),
        }
    }
}

impl DeclaredResourceServer {
    pub fn to_remote(&self) -> ResourceServer {
        ResourceServer {
            id: None,
            name: self.name.clone(),
            identifier: Some(self.identifier.clone()),
            scopes: self.scopes.as_ref().map(|scopes| {
                scopes
                    .iter()
                    .map(|s| ResourceServerScope {
                        value: s.value.clone(),
                        description: s.description.clone(),
                    })
                    .collect()
            }),
            signing_alg: self.signing_alg.clone(),
            signing_secret: non_empty(&self.signing_secret),
            allow_offline_access: self.allow_offline_access,
            token_lifetime: self.token_lifetime,
            token_lifetime_for_web: self.token_lifetime_for_web,
            skip_consent_for_verifiable_first_party_clients: self
                .skip_consent_for_verifiable_first_party_clients,
            enforce_policies: self.enforce_policies,
            token_dialect: non_empty(&self.token_dialect),
        }
    }
}

impl DeclaredRole {
    pub fn to_remote(&self) -> Role {
        Role {
            id: None,
            name: Some(self.name.clone()),
            description: self.description.clone(),
        }
    }
}

impl Substitute for TenantDeclaration {
    fn substitute(&mut self, keywords: &Keywords) {
        if keywords.is_empty() {
            return;
        }
        self.clients.substitute(keywords);
        self.resource_servers.substitute(keywords);
        self.roles.substitute(keywords);
    }
}

impl Substitute for DeclaredClient {
    fn substitute(&mut self, keywords: &Keywords) {
        keywords.apply(&mut self.name);
        keywords.apply_opt(&mut self.description);
        keywords.apply_opt(&mut self.app_type);
        keywords.apply_opt(&mut self.token_endpoint_auth_method);
        keywords.apply_list(&mut self.callbacks);
        keywords.apply_list(&mut self.allowed_origins);
        keywords.apply_list(&mut self.web_origins);
        keywords.apply_list(&mut self.allowed_logout_urls);
        keywords.apply_list(&mut self.grant_types);
    }
}

impl Substitute for DeclaredResourceServer {
    fn substitute(&mut self, keywords: &Keywords) {
        keywords.apply(&mut self.identifier);
        keywords.apply_opt(&mut self.name);
        keywords.apply_opt(&mut self.signing_alg);
        keywords.apply_opt(&mut self.signing_secret);
        keywords.apply_opt(&mut self.token_dialect);
        self.scopes.substitute(keywords);
    }
}

impl Substitute for DeclaredScope {
    fn substitute(&mut self, keywords: &Keywords) {
        keywords.apply_opt(&mut self.value);
        keywords.apply_opt(&mut self.description);
    }
}

impl Substitute for DeclaredRole {
    fn substitute(&mut self, keywords: &Keywords) {
        keywords.apply(&mut self.name);
        keywords.apply_opt(&mut self.description);
        self.permissions.substitute(keywords);
    }
}

impl Substitute for DeclaredPermission {
    fn substitute(&mut self, keywords: &Keywords) {
        keywords.apply_opt(&mut self.permission_name);
        keywords.apply_opt(&mut self.resource_server_identifier);
    }
}
