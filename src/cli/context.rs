//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, authentication validation, and client initialization.

use std::sync::Arc;

use colored::Colorize;
use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::ManagementClient;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Authenticated Management API client (Arc-wrapped so list fetchers can own it)
    pub client: Arc<ManagementClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// Loads the config file (or the default location), checks that a domain
    /// and token are present and builds the client. An expired token is only
    /// warned about; the API answers 401 if it really is stale.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded or authentication is invalid.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        config.validate_auth()?;

        if config.is_token_expired() {
            eprintln!(
                "{} Access token expired. Run `auth0 init` to store a new one.",
                "⚠".yellow()
            );
        }

        let client = Arc::new(build_client(&config, opts.api_url_ref())?);

        Ok(Self {
            config,
            client,
            format: opts.format,
        })
    }

    /// Tenant domain from the config file.
    pub fn domain(&self) -> &str {
        self.config.domain.as_deref().unwrap_or_default()
    }

    /// Page size to use for list requests.
    pub fn page_size(&self) -> usize {
        self.config.preferences.page_size
    }
}

fn build_client(config: &Config, api_url: Option<&str>) -> Result<ManagementClient> {
    let token = config
        .access_token
        .clone()
        .ok_or(ConfigError::MissingToken)?;

    match api_url {
        Some(url) => {
            debug!("Using Management API at {}", url);
            ManagementClient::with_base_url(url, token)
        }
        None => {
            let domain = config.domain.as_deref().ok_or(ConfigError::MissingDomain)?;
            ManagementClient::new(domain, token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    fn opts_for(path: &std::path::Path) -> GlobalOptions {
        GlobalOptions {
            format: OutputFormat::Table,
            config: Some(path.to_string_lossy().into_owned()),
            api_url: Some("http://127.0.0.1:9/api/v2".to_string()),
            debug: false,
        }
    }

    #[test]
    fn test_context_from_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "domain: tenant.auth0.com\naccess_token: token\npreferences:\n  page_size: 50\n",
        )
        .unwrap();

        let ctx = CommandContext::new(&opts_for(&path)).unwrap();
        assert_eq!(ctx.domain(), "tenant.auth0.com");
        assert_eq!(ctx.page_size(), 50);
        assert_eq!(ctx.format, OutputFormat::Table);
    }

    #[test]
    fn test_context_requires_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "domain: tenant.auth0.com\n").unwrap();

        let result = CommandContext::new(&opts_for(&path));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingToken))
        ));
    }
}
