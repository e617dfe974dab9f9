//! Import policy file
//!
//! JSON document passed with `--config`:
//!
//! ```json
//! {
//!   "AUTH0_DOMAIN": "tenant.eu.auth0.com",
//!   "AUTH0_KEYWORD_REPLACE_MAPPINGS": { "ENV": "prod", "PORT": 8443 },
//!   "AUTH0_ALLOW_DELETE": false
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ImportError, Result};

/// Policy controlling keyword substitution and field clearing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportConfig {
    /// Tenant domain; overrides the CLI config when computing reserved keys
    #[serde(rename = "AUTH0_DOMAIN", default)]
    pub domain: Option<String>,

    #[serde(
        rename = "AUTH0_KEYWORD_REPLACE_MAPPINGS",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub keyword_mappings: BTreeMap<String, Value>,

    /// Clear remote fields that the declaration leaves out
    #[serde(rename = "AUTH0_ALLOW_DELETE", default)]
    pub allow_delete: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

impl ImportConfig {
    /// Read and parse the policy file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ImportError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse a policy document and validate its keyword mappings.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: ImportConfig = serde_json::from_str(contents)
            .map_err(|e| ImportError::InvalidConfig(e.to_string()))?;
        config.replacements()?;
        Ok(config)
    }

    /// Keyword mappings rendered as text, in key order.
    ///
    /// Strings are used verbatim; numbers and booleans are rendered as their
    /// JSON text. Null, arrays and objects have no text form and are rejected.
    pub fn replacements(&self) -> Result<Vec<(String, String)>> {
        self.keyword_mappings
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(_) | Value::Bool(_) => value.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => {
                        return Err(ImportError::InvalidConfig(format!(
                            "keyword '{}' must map to a string, number or boolean",
                            key
                        ))
                        .into());
                    }
                };
                Ok((key.clone(), text))
            })
            .collect()
    }
}
