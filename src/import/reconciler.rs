//! Generic reconciler: load, classify, diff, confirm, execute

use log::{debug, info};
use serde::Serialize;

use super::ImportChanges;
use super::kinds::ResourceKind;
use super::plan::ReconciliationPlan;
use crate::client::{MAX_PAGE_SIZE, fetch_all};
use crate::error::{Error, ImportError, Result};

/// Receives progress and per-mutation lines while a kind is reconciled.
pub trait Reporter: Send + Sync {
    /// Remote listing started.
    fn loading(&self, _what: &str) {}

    /// Remote listing finished (successfully or not).
    fn loaded(&self) {}

    /// One line per successful mutation, e.g. `Created role: {...}`.
    fn mutation(&self, line: &str);

    /// Plan computed in dry-run mode.
    fn planned(&self, _plan: &PlannedChanges) {}
}

/// Asks whether the deletes of one kind may go ahead.
pub trait Confirmer: Send + Sync {
    fn confirm_deletes(&self, kind: &str, keys: &[String]) -> Result<bool>;
}

/// What a dry run would do for one kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlannedChanges {
    pub resource: String,
    pub creates: Vec<String>,
    /// Natural key and changed field names
    pub updates: Vec<(String, Vec<String>)>,
    pub deletes: Vec<String>,
}

impl PlannedChanges {
    fn from_plan<R: Clone>(resource: &str, plan: &ReconciliationPlan<R>) -> Self {
        Self {
            resource: resource.to_string(),
            creates: plan.creates.keys().cloned().collect(),
            updates: plan
                .changed_updates()
                .map(|(k, m)| (k.clone(), m.patch.fields().map(str::to_string).collect()))
                .collect(),
            deletes: plan.deletes.keys().cloned().collect(),
        }
    }

    pub fn counts(&self) -> ImportChanges {
        ImportChanges {
            resource: self.resource.clone(),
            creates: self.creates.len(),
            updates: self.updates.len(),
            deletes: self.deletes.len(),
        }
    }
}

/// Reconciles one resource kind at a time.
pub struct Reconciler<'r> {
    allow_delete: bool,
    dry_run: bool,
    assume_yes: bool,
    page_size: usize,
    reporter: &'r dyn Reporter,
    confirmer: &'r dyn Confirmer,
}

impl<'r> Reconciler<'r> {
    pub fn new(reporter: &'r dyn Reporter, confirmer: &'r dyn Confirmer) -> Self {
        Self {
            allow_delete: false,
            dry_run: false,
            assume_yes: false,
            page_size: MAX_PAGE_SIZE,
            reporter,
            confirmer,
        }
    }

    /// Clear remote fields the declaration leaves out.
    pub fn allow_delete(mut self, allow: bool) -> Self {
        self.allow_delete = allow;
        self
    }

    /// Compute and report plans without executing them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Skip the delete confirmation.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Fetch every existing resource of `kind`.
    pub async fn load<K: ResourceKind>(&self, kind: &K) -> Result<Vec<K::Resource>> {
        self.reporter.loading(&format!("Fetching {}", kind.plural()));
        let result = fetch_all(0, self.page_size, |params| kind.list(params)).await;
        self.reporter.loaded();

        result.map_err(|e| {
            ImportError::Load {
                kind: kind.plural(),
                source: Box::new(e),
            }
            .into()
        })
    }

    /// Load, classify and diff `declared` against the tenant.
    pub async fn plan<K: ResourceKind>(
        &self,
        kind: &K,
        declared: Vec<K::Resource>,
    ) -> Result<ReconciliationPlan<K::Resource>> {
        let existing = self.load(kind).await?;
        debug!(
            "{}: {} declared, {} existing",
            kind.resource_name(),
            declared.len(),
            existing.len()
        );

        let mut plan =
            ReconciliationPlan::classify(declared, existing, K::natural_key, &kind.reserved_keys());
        for matched in plan.updates.values_mut() {
            matched.patch = K::diff(&mut matched.existing, &matched.declared, self.allow_delete);
        }

        debug!(
            "{}: {} creates, {} updates ({} matched), {} deletes",
            kind.resource_name(),
            plan.creates.len(),
            plan.changed_updates().count(),
            plan.updates.len(),
            plan.deletes.len()
        );
        Ok(plan)
    }

    /// Reconcile one kind.
    ///
    /// Returns `None` when the delete confirmation was declined; nothing of
    /// this kind has been executed in that case.
    pub async fn run<K: ResourceKind>(
        &self,
        kind: &K,
        declared: Vec<K::Resource>,
    ) -> Result<Option<ImportChanges>> {
        info!("Reconciling {}", kind.plural());
        let plan = self.plan(kind, declared).await?;

        if self.dry_run {
            let planned = PlannedChanges::from_plan(kind.resource_name(), &plan);
            self.reporter.planned(&planned);
            return Ok(Some(planned.counts()));
        }

        if plan.is_noop() {
            info!("{} already up to date", kind.resource_name());
            return Ok(Some(ImportChanges::new(kind.resource_name())));
        }

        if !plan.deletes.is_empty() && !self.assume_yes {
            let keys: Vec<String> = plan.deletes.keys().cloned().collect();
            if !self.confirmer.confirm_deletes(kind.plural(), &keys)? {
                info!("Deletion of {} declined", kind.plural());
                return Ok(None);
            }
        }

        self.execute(kind, plan).await.map(Some)
    }

    /// Apply a plan: deletes, then updates, then creates.
    ///
    /// The first failure aborts the rest of the plan. Nothing is rolled back.
    pub async fn execute<K: ResourceKind>(
        &self,
        kind: &K,
        plan: ReconciliationPlan<K::Resource>,
    ) -> Result<ImportChanges> {
        let mut changes = ImportChanges::new(kind.resource_name());

        for (key, resource) in &plan.deletes {
            kind.delete(K::server_id(resource))
                .await
                .map_err(|e| operation_error("delete", kind.singular(), key, e))?;
            self.report("Deleted", kind, resource);
            changes.deletes += 1;
        }

        for (key, matched) in plan.changed_updates() {
            let body = matched.patch.to_body(&matched.existing)?;
            kind.update(K::server_id(&matched.existing), &body)
                .await
                .map_err(|e| operation_error("update", kind.singular(), key, e))?;
            self.report("Updated", kind, &matched.existing);
            changes.updates += 1;
        }

        for (key, mut resource) in plan.creates {
            resource = kind
                .create(&resource)
                .await
                .map_err(|e| operation_error("create", kind.singular(), &key, e))?;
            self.report("Created", kind, &resource);
            changes.creates += 1;
        }

        Ok(changes)
    }

    fn report<K: ResourceKind>(&self, verb: &str, kind: &K, resource: &K::Resource) {
        self.reporter.mutation(&format!(
            "{} {}: {}",
            verb,
            kind.singular(),
            K::describe(resource)
        ));
    }
}

fn operation_error(op: &'static str, kind: &'static str, key: &str, source: Error) -> Error {
    ImportError::Operation {
        op,
        kind,
        key: key.to_string(),
        source: Box::new(source),
    }
    .into()
}
