//! API (resource server) display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::ResourceServer;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ApiDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// Audience identifier
    #[tabled(rename = "IDENTIFIER")]
    pub identifier: String,

    #[tabled(rename = "SCOPES")]
    pub scopes: usize,
}

impl From<ResourceServer> for ApiDisplay {
    fn from(api: ResourceServer) -> Self {
        Self {
            id: api.id().to_string(),
            name: api.name().to_string(),
            identifier: api.identifier().to_string(),
            scopes: api.scopes.as_ref().map_or(0, Vec::len),
        }
    }
}
