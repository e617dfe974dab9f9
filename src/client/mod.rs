//! Auth0 Management API client

pub mod api;
#[cfg(test)]
pub mod fixtures;
pub mod management;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use api::{ClientsApi, ResourceServersApi, RolesApi};
pub use management::ManagementClient;
#[cfg(test)]
pub use mock::MockManagementClient;
pub use models::{Application, ResourceServer, ResourceServerScope, Role};
pub use pagination::{MAX_PAGE_SIZE, Page, PaginationParams, fetch_all};

/// The full Management API surface used by the CLI.
///
/// Implemented automatically for anything that implements every sub-trait.
pub trait ManagementApi: ClientsApi + ResourceServersApi + RolesApi {}

impl<T: ClientsApi + ResourceServersApi + RolesApi> ManagementApi for T {}
