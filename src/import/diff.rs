//! Field-level diff between an existing resource and its declaration
//!
//! The differ moves the existing resource to its target state in place and
//! records the name of every field it changed. The request body of the
//! following PATCH is built from those names only.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// Names of the fields changed by a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    fields: BTreeSet<&'static str>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Changed field names, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().copied()
    }

    fn mark(&mut self, field: &'static str) {
        self.fields.insert(field);
    }

    /// Converge one scalar field.
    ///
    /// An unset declaration clears the field when `allow_delete` is set and
    /// leaves it alone otherwise.
    pub fn field<T: PartialEq + Clone>(
        &mut self,
        name: &'static str,
        existing: &mut Option<T>,
        declared: &Option<T>,
        allow_delete: bool,
    ) {
        match declared {
            None if allow_delete => {
                if existing.take().is_some() {
                    self.mark(name);
                }
            }
            None => {}
            Some(value) => {
                if existing.as_ref() != Some(value) {
                    *existing = Some(value.clone());
                    self.mark(name);
                }
            }
        }
    }

    /// Converge one list field. Any difference replaces the whole list; an
    /// unset existing list compares as empty.
    pub fn list<T: PartialEq + Clone>(
        &mut self,
        name: &'static str,
        existing: &mut Option<Vec<T>>,
        declared: &Option<Vec<T>>,
        allow_delete: bool,
    ) {
        match declared {
            None if allow_delete => {
                if existing.take().is_some_and(|items| !items.is_empty()) {
                    self.mark(name);
                }
            }
            None => {}
            Some(items) => {
                let current = existing.as_deref().unwrap_or_default();
                if !lists_equal(current, items) {
                    *existing = Some(items.clone());
                    self.mark(name);
                }
            }
        }
    }

    /// Build the PATCH body: changed fields with their new value, cleared
    /// fields as `null`.
    pub fn to_body<T: Serialize>(&self, resource: &T) -> Result<Value> {
        let current = serde_json::to_value(resource)?;
        let mut body = Map::new();
        for field in self.fields() {
            let value = current.get(field).cloned().unwrap_or(Value::Null);
            body.insert(field.to_string(), value);
        }
        Ok(Value::Object(body))
    }
}

fn lists_equal<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}
