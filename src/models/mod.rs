//! Display models for CLI output
//!
//! Converts Management API types and import results into CLI-friendly
//! display rows.

pub mod display;

pub use display::{ApiDisplay, AppDisplay, ImportChangesDisplay, RoleDisplay};
