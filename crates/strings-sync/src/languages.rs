//! Language directory enumeration.

use crate::error::{Result, SyncError, TreeSide};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Directory name of the reference locale every tree must carry.
pub const REFERENCE_LOCALE: &str = "en-us";

/// List the language directories of a tree, sorted, without the reference locale.
///
/// Fails if the reference locale directory itself is missing.
pub fn list_languages(tree: TreeSide, root: &Path, reference: &str) -> Result<Vec<String>> {
    let reference_dir = root.join(reference);
    if !reference_dir.is_dir() {
        return Err(SyncError::MissingReferenceLocale {
            tree,
            path: reference_dir,
        });
    }

    let mut languages = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            SyncError::io(path, err.into())
        })?;

        if !entry.path().is_dir() {
            continue;
        }

        if let Some(name) = entry.file_name().to_str()
            && name != reference
        {
            languages.push(name.to_string());
        }
    }

    debug!(tree = %tree, ?languages, "found language directories");
    Ok(languages)
}

/// Sorted, deduplicated union of two language lists.
pub fn union_languages(server: &[String], app: &[String]) -> Vec<String> {
    server
        .iter()
        .chain(app)
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
