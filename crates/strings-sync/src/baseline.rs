//! The common English baseline shared by both trees.

use crate::resource::ResourceMap;
use tracing::warn;

/// Key/value pairs whose reference text is identical in both trees.
///
/// Only keys in the baseline are eligible for propagation. Keys defined by
/// both trees with different reference text are kept aside as collisions: the
/// same key may name different strings in each tree, so copying a translation
/// across could put it in the wrong context.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Baseline {
    entries: ResourceMap,
    collisions: Vec<String>,
}

impl Baseline {
    /// Build the baseline from both trees' reference mappings.
    pub fn build(server: &ResourceMap, app: &ResourceMap) -> Self {
        let mut entries = ResourceMap::new();
        let mut collisions = Vec::new();

        for (key, value) in server {
            match app.get(key) {
                Some(other) if other == value => {
                    entries.insert(key.clone(), value.clone());
                },
                Some(_) => collisions.push(key.clone()),
                None => {},
            }
        }

        for key in &collisions {
            warn!(key = %key, "reference text differs between trees; key will not be propagated");
        }

        Self {
            entries,
            collisions,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entries(&self) -> &ResourceMap {
        &self.entries
    }

    /// Keys present in both trees whose reference text differs, sorted.
    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
