//! Classification of declared and existing resources

use std::collections::BTreeMap;

use super::diff::Patch;

/// An existing resource matched by a declaration.
#[derive(Debug, Clone)]
pub struct Matched<R> {
    pub existing: R,
    pub declared: R,
    /// Fields the differ changed on `existing`; empty until diffed
    pub patch: Patch,
}

/// Creates, updates and deletes for one resource kind, keyed by natural key.
///
/// Every declared key lands in exactly one of `creates`/`updates`, and every
/// existing key in exactly one of `updates`/`deletes` (reserved keys aside).
#[derive(Debug, Clone)]
pub struct ReconciliationPlan<R> {
    pub creates: BTreeMap<String, R>,
    pub updates: BTreeMap<String, Matched<R>>,
    pub deletes: BTreeMap<String, R>,
}

impl<R> Default for ReconciliationPlan<R> {
    fn default() -> Self {
        Self {
            creates: BTreeMap::new(),
            updates: BTreeMap::new(),
            deletes: BTreeMap::new(),
        }
    }
}

impl<R: Clone> ReconciliationPlan<R> {
    /// Partition `declared` and `existing` by natural key.
    ///
    /// A later declaration with the same key replaces an earlier one.
    /// Existing resources whose key is in `reserved` are never deleted.
    pub fn classify<K>(declared: Vec<R>, existing: Vec<R>, key: K, reserved: &[String]) -> Self
    where
        K: Fn(&R) -> &str,
    {
        let mut creates: BTreeMap<String, R> = declared
            .into_iter()
            .map(|r| (key(&r).to_string(), r))
            .collect();
        let mut updates: BTreeMap<String, Matched<R>> = BTreeMap::new();
        let mut deletes: BTreeMap<String, R> = BTreeMap::new();

        for resource in existing {
            let k = key(&resource).to_string();
            match creates.remove(&k) {
                Some(declared) => {
                    updates.insert(
                        k,
                        Matched {
                            existing: resource,
                            declared,
                            patch: Patch::new(),
                        },
                    );
                }
                None => match updates.get_mut(&k) {
                    Some(matched) => matched.existing = resource,
                    None => {
                        deletes.insert(k, resource);
                    }
                },
            }
        }

        for k in reserved {
            deletes.remove(k);
        }

        Self {
            creates,
            updates,
            deletes,
        }
    }

    /// Updates whose diff changed at least one field.
    pub fn changed_updates(&self) -> impl Iterator<Item = (&String, &Matched<R>)> {
        self.updates.iter().filter(|(_, m)| !m.patch.is_empty())
    }

    pub fn is_noop(&self) -> bool {
        self.creates.is_empty() && self.deletes.is_empty() && self.changed_updates().next().is_none()
    }
}
