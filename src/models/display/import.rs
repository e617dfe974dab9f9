//! Import summary display model

use serde::Serialize;
use tabled::Tabled;

use crate::import::ImportChanges;

/// One summary row per reconciled resource kind.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ImportChangesDisplay {
    #[tabled(rename = "RESOURCE")]
    pub resource: String,

    #[tabled(rename = "CREATES")]
    pub creates: usize,

    #[tabled(rename = "UPDATES")]
    pub updates: usize,

    #[tabled(rename = "DELETES")]
    pub deletes: usize,
}

impl ImportChangesDisplay {
    /// Index of the first count column
    pub const FIRST_COUNT_COLUMN: usize = 1;

    pub fn total(&self) -> usize {
        self.creates + self.updates + self.deletes
    }
}

impl From<ImportChanges> for ImportChangesDisplay {
    fn from(changes: ImportChanges) -> Self {
        Self {
            resource: changes.resource,
            creates: changes.creates,
            updates: changes.updates,
            deletes: changes.deletes,
        }
    }
}
