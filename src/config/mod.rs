//! Configuration management for the auth0 CLI

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tenant domain, e.g. `my-tenant.eu.auth0.com`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Management API access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Page size for list requests (Management API caps this at 100)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    100
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".auth0").join("config.yaml"))
    }

    /// Resolve the config path, honouring an explicit override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional override path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds a bearer token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Validate that the tenant domain and token are present
    pub fn validate_auth(&self) -> Result<()> {
        if self.domain.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingDomain.into());
        }
        if self.access_token.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingToken.into());
        }
        Ok(())
    }

    /// Expiry of the stored access token, read from its `exp` claim.
    ///
    /// Returns `None` when no token is stored or it is not a decodable JWT.
    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        #[derive(Deserialize)]
        struct Claims {
            exp: i64,
        }

        let token = self.access_token.as_deref()?;
        let payload = token.split('.').nth(1)?;
        let bytes = base64_decode_url(payload).ok()?;
        let claims: Claims = serde_json::from_slice(&bytes).ok()?;
        DateTime::from_timestamp(claims.exp, 0)
    }

    /// Whether the stored token is expired. Opaque tokens are assumed valid.
    pub fn is_token_expired(&self) -> bool {
        match self.token_expires_at() {
            Some(expires_at) => expires_at < Utc::now(),
            None => self.access_token.is_none(),
        }
    }
}

/// Decode base64url (URL-safe base64 without padding)
fn base64_decode_url(input: &str) -> std::result::Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose};

    general_purpose::URL_SAFE_NO_PAD
        .decode(input.trim_end_matches('='))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose};
    use tempfile::tempdir;

    fn jwt_expiring_at(exp: i64) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.domain.is_none());
        assert!(config.access_token.is_none());
        assert_eq!(config.preferences.page_size, 100);
    }

    #[test]
    fn test_validate_auth_requires_domain_and_token() {
        let mut config = Config::default();
        assert!(config.validate_auth().is_err());

        config.domain = Some("tenant.auth0.com".to_string());
        assert!(config.validate_auth().is_err());

        config.access_token = Some("token".to_string());
        assert!(config.validate_auth().is_ok());
    }

    #[test]
    fn test_token_expiry_from_jwt_claim() {
        let mut config = Config::default();
        assert!(config.is_token_expired());

        let past = (Utc::now() - chrono::Duration::hours(1)).timestamp();
        config.access_token = Some(jwt_expiring_at(past));
        assert!(config.is_token_expired());
        assert_eq!(config.token_expires_at().map(|t| t.timestamp()), Some(past));

        let future = (Utc::now() + chrono::Duration::hours(1)).timestamp();
        config.access_token = Some(jwt_expiring_at(future));
        assert!(!config.is_token_expired());
    }

    #[test]
    fn test_opaque_token_is_not_expired() {
        let config = Config {
            access_token: Some("not-a-jwt".to_string()),
            ..Config::default()
        };
        assert!(config.token_expires_at().is_none());
        assert!(!config.is_token_expired());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config {
            domain: Some("tenant.auth0.com".to_string()),
            access_token: Some("token".to_string()),
            preferences: Preferences::default(),
        };

        config.save_to(path.clone()).unwrap();
        let loaded = Config::load_from(path).unwrap();

        assert_eq!(loaded.domain.as_deref(), Some("tenant.auth0.com"));
        assert_eq!(loaded.access_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = Config::load_from(dir.path().join("missing.yaml"));
        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::NotFound))
        ));
    }
}
