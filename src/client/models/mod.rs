//! Management API data models
//!
//! Domain types exchanged with the Management API, one file per resource.

mod application;
mod resource_server;
mod role;

pub use application::Application;
pub use resource_server::{ResourceServer, ResourceServerScope};
pub use role::Role;
