//! Role display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{or_dash, truncate_string};
use crate::client::Role;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RoleDisplay {
    #[tabled(rename = "ROLE ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<Role> for RoleDisplay {
    fn from(role: Role) -> Self {
        Self {
            id: role.id().to_string(),
            name: role.name().to_string(),
            description: truncate_string(&or_dash(role.description.as_deref()), 50),
        }
    }
}
