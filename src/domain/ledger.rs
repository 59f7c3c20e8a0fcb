//! Set of static resources already written during one traversal.

use std::collections::HashSet;

const CLASS_PREFIX: &str = "class_";
const SCRIPT_PREFIX: &str = "script_";

/// Tracks which CSS classes and scripts have been emitted into the current response.
///
/// Class and script names live in separate namespaces, so a class and a script
/// sharing a human-readable name never shadow each other. One ledger belongs to
/// exactly one top-level render; it is never shared across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLedger {
    keys: HashSet<String>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw, un-namespaced key.
    pub fn add(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn add_class(&mut self, name: &str) {
        self.keys.insert(format!("{CLASS_PREFIX}{name}"));
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.keys.contains(&format!("{CLASS_PREFIX}{name}"))
    }

    pub fn add_script(&mut self, name: &str) {
        self.keys.insert(format!("{SCRIPT_PREFIX}{name}"));
    }

    pub fn contains_script(&self, name: &str) -> bool {
        self.keys.contains(&format!("{SCRIPT_PREFIX}{name}"))
    }

    /// Mark every class in `names` as already present.
    pub fn extend_classes<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) {
        for name in names {
            self.add_class(name);
        }
    }

    /// Every stored key, namespaced keys included, in sorted order.
    pub fn all(&self) -> Vec<String> {
        let mut values: Vec<String> = self.keys.iter().cloned().collect();
        values.sort();
        values
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
