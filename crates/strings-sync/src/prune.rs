//! Removal of keys a tree's reference locale no longer defines.

use crate::error::Result;
use crate::resource::{ResourceFile, ResourceMap};
use std::path::Path;
use tracing::info;

/// Drop every key of `translation` absent from `reference`. Returns how many were dropped.
pub fn prune(reference: &ResourceMap, translation: &mut ResourceMap) -> usize {
    let before = translation.len();
    translation.retain(|key, _| reference.contains_key(key));
    before - translation.len()
}

/// Prune a resource file in place and rewrite it in canonical form.
pub fn prune_file(reference: &ResourceMap, path: &Path) -> Result<usize> {
    let mut file = ResourceFile::load(path)?;
    let removed = prune_loaded(reference, &mut file);
    file.save(false)?;
    Ok(removed)
}

pub(crate) fn prune_loaded(reference: &ResourceMap, file: &mut ResourceFile) -> usize {
    let removed = prune(reference, file.entries_mut());
    if removed > 0 {
        info!(
            file = %file.path().display(),
            removed,
            "removed keys missing from reference locale"
        );
    }
    removed
}
