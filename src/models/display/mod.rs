//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod api;
mod app;
mod common;
mod import;
mod role;

pub use api::ApiDisplay;
pub use app::AppDisplay;
pub use import::ImportChangesDisplay;
pub use role::RoleDisplay;
