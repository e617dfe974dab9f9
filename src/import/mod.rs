//! Declarative tenant import
//!
//! A YAML tenant declaration is reconciled against the tenant one resource
//! kind at a time (applications, then APIs, then roles):
//!
//! 1. load every existing resource of the kind
//! 2. map the declaration to the same model
//! 3. classify into creates, updates and deletes by natural key
//! 4. diff each matched pair into a minimal patch
//! 5. execute deletes, updates, then creates
//!
//! Terminal interaction goes through the [`Reporter`] and [`Confirmer`]
//! traits so the pipeline runs the same against a mock client.

pub mod config;
pub mod declaration;
pub mod diff;
pub mod keywords;
pub mod kinds;
pub mod plan;
pub mod reconciler;

use log::info;
use serde::Serialize;

pub use config::ImportConfig;
pub use declaration::TenantDeclaration;
pub use keywords::Keywords;
pub use kinds::{Apis, Applications, ResourceKind, Roles};
pub use reconciler::{Confirmer, PlannedChanges, Reconciler, Reporter};

use crate::client::ManagementApi;
use crate::error::Result;

/// Counts of mutations applied (or planned) for one resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportChanges {
    pub resource: String,
    pub creates: usize,
    pub updates: usize,
    pub deletes: usize,
}

impl ImportChanges {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            creates: 0,
            updates: 0,
            deletes: 0,
        }
    }
}

/// Result of a whole import.
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// One entry per kind that was applied (or planned), in run order
    pub changes: Vec<ImportChanges>,
    /// A delete confirmation was declined; later kinds were not run
    pub cancelled: bool,
}

/// Reconcile applications, APIs and roles in that order.
///
/// `domains` name the tenant whose Management API identifier is protected
/// from deletion (its configured domain plus any alias). An error in one
/// kind aborts the import; kinds already applied stay applied.
pub async fn run_import<C: ManagementApi + ?Sized>(
    client: &C,
    declaration: &TenantDeclaration,
    domains: &[&str],
    reconciler: &Reconciler<'_>,
) -> Result<ImportOutcome> {
    let mut outcome = ImportOutcome::default();

    let applied = reconciler
        .run(&Applications::new(client), declaration.applications())
        .await?;
    if !record(&mut outcome, applied) {
        return Ok(outcome);
    }

    let applied = reconciler
        .run(&Apis::new(client, domains), declaration.apis())
        .await?;
    if !record(&mut outcome, applied) {
        return Ok(outcome);
    }

    let applied = reconciler
        .run(&Roles::new(client), declaration.roles())
        .await?;
    record(&mut outcome, applied);

    info!("Import finished: {} kinds processed", outcome.changes.len());
    Ok(outcome)
}

/// Returns false when the import must stop.
fn record(outcome: &mut ImportOutcome, applied: Option<ImportChanges>) -> bool {
    match applied {
        Some(changes) => {
            outcome.changes.push(changes);
            true
        }
        None => {
            outcome.cancelled = true;
            false
        }
    }
}
