//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating tenant resources with sensible
//! defaults. Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::{Application, ResourceServer, ResourceServerScope, Role};

// ============================================================================
// ApplicationBuilder
// ============================================================================

/// Builder for creating test Application instances.
///
/// # Example
/// ```ignore
/// let app = ApplicationBuilder::new("billing-app")
///     .client_id("cli_1")
///     .app_type("spa")
///     .callbacks(&["https://billing.example.com/callback"])
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationBuilder {
    app: Application,
}

impl ApplicationBuilder {
    /// Create a new builder with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            app: Application {
                name: Some(name.into()),
                ..Default::default()
            },
        }
    }

    /// Set the server-assigned client ID.
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.app.client_id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.app.description = Some(description.into());
        self
    }

    pub fn app_type(mut self, app_type: impl Into<String>) -> Self {
        self.app.app_type = Some(app_type.into());
        self
    }

    pub fn sso_disabled(mut self, disabled: bool) -> Self {
        self.app.sso_disabled = Some(disabled);
        self
    }

    pub fn callbacks(mut self, urls: &[&str]) -> Self {
        self.app.callbacks = Some(urls.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn grant_types(mut self, grants: &[&str]) -> Self {
        self.app.grant_types = Some(grants.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Build the Application.
    pub fn build(self) -> Application {
        self.app
    }
}

// ============================================================================
// ResourceServerBuilder
// ============================================================================

/// Builder for creating test ResourceServer instances.
#[derive(Debug, Clone)]
pub struct ResourceServerBuilder {
    api: ResourceServer,
}

impl ResourceServerBuilder {
    /// Create a new builder with the given audience identifier.
    ///
    /// The name defaults to `API <identifier>`.
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            api: ResourceServer {
                name: Some(format!("API {}", &identifier)),
                identifier: Some(identifier),
                ..Default::default()
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.api.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.api.name = Some(name.into());
        self
    }

    /// Add a scope with the given value and description.
    pub fn scope(mut self, value: &str, description: &str) -> Self {
        self.api
            .scopes
            .get_or_insert_with(Vec::new)
            .push(ResourceServerScope {
                value: Some(value.to_string()),
                description: Some(description.to_string()),
            });
        self
    }

    pub fn signing_alg(mut self, alg: impl Into<String>) -> Self {
        self.api.signing_alg = Some(alg.into());
        self
    }

    pub fn token_lifetime(mut self, seconds: i64) -> Self {
        self.api.token_lifetime = Some(seconds);
        self
    }

    /// Build the ResourceServer.
    pub fn build(self) -> ResourceServer {
        self.api
    }
}

// ============================================================================
// RoleBuilder
// ============================================================================

/// Builder for creating test Role instances.
#[derive(Debug, Clone)]
pub struct RoleBuilder {
    role: Role,
}

impl RoleBuilder {
    /// Create a new builder with the given role name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            role: Role {
                name: Some(name.into()),
                ..Default::default()
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.role.id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.role.description = Some(description.into());
        self
    }

    /// Build the Role.
    pub fn build(self) -> Role {
        self.role
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Create a minimal existing application with a server ID.
pub fn test_app(name: &str, client_id: &str) -> Application {
    ApplicationBuilder::new(name).client_id(client_id).build()
}

/// Create a minimal existing API with a server ID.
pub fn test_api(identifier: &str, id: &str) -> ResourceServer {
    ResourceServerBuilder::new(identifier).id(id).build()
}

/// Create a minimal existing role with a server ID.
pub fn test_role(name: &str, id: &str) -> Role {
    RoleBuilder::new(name).id(id).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_builder_defaults() {
        let app = ApplicationBuilder::new("web").build();
        assert_eq!(app.name(), "web");
        assert!(app.client_id.is_none());
        assert!(app.callbacks.is_none());
    }

    #[test]
    fn test_resource_server_builder_scopes() {
        let api = ResourceServerBuilder::new("https://api.example.com")
            .scope("read:data", "Read")
            .scope("write:data", "Write")
            .build();

        assert_eq!(api.name(), "API https://api.example.com");
        assert_eq!(api.scopes.map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_convenience_functions() {
        assert_eq!(test_app("web", "cli_1").client_id(), "cli_1");
        assert_eq!(test_api("https://api", "rs_1").id(), "rs_1");
        assert_eq!(test_role("admin", "rol_1").id(), "rol_1");
    }
}
