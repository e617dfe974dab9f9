//! API trait definitions split by resource
//!
//! This module organizes the Management API surface into focused sub-traits:
//! - [`ClientsApi`] - Applications (`/clients`)
//! - [`ResourceServersApi`] - APIs (`/resource-servers`)
//! - [`RolesApi`] - Roles (`/roles`)
//!
//! The [`ManagementApi`](super::ManagementApi) super-trait combines all three.

mod clients;
mod resource_servers;
mod roles;

pub use clients::ClientsApi;
pub use resource_servers::ResourceServersApi;
pub use roles::RolesApi;
