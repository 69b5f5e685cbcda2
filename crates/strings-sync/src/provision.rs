//! Language directory creation and whole-file copies between trees.
//!
//! Copies are add-only: a file that already exists at the destination is never
//! touched here, whatever its contents. Per-key merging is left to the
//! propagator.

use crate::error::{Result, SyncError};
use crate::resource::list_resource_files;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// A resource file copied (or to be copied) from one tree to the other.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileCopy {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Create every missing language directory under `root`.
///
/// Returns the directories that were created.
pub fn ensure_language_dirs(languages: &[String], root: &Path) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();

    for language in languages {
        let dir = root.join(language);
        if dir.exists() {
            continue;
        }
        fs_err::create_dir_all(&dir).map_err(|e| SyncError::io(&dir, e))?;
        info!(dir = %dir.display(), "created language directory");
        created.push(dir);
    }

    Ok(created)
}

/// The copies [`copy_missing_files`] would perform, without touching disk.
///
/// A directory that does not exist yet counts as empty.
pub fn plan_missing_files(source_dir: &Path, target_dir: &Path) -> Result<Vec<FileCopy>> {
    let existing: BTreeSet<PathBuf> = if target_dir.is_dir() {
        list_resource_files(target_dir)?
            .into_iter()
            .filter_map(|path| path.file_name().map(PathBuf::from))
            .collect()
    } else {
        BTreeSet::new()
    };

    let sources = if source_dir.is_dir() {
        list_resource_files(source_dir)?
    } else {
        Vec::new()
    };

    let mut copies = Vec::new();
    for from in sources {
        let Some(name) = from.file_name() else {
            continue;
        };
        let to = target_dir.join(name);
        if existing.contains(Path::new(name)) || to.exists() {
            continue;
        }
        copies.push(FileCopy { from, to });
    }

    Ok(copies)
}

/// Copy each resource file of `source_dir` missing by name from `target_dir`.
pub fn copy_missing_files(source_dir: &Path, target_dir: &Path) -> Result<Vec<FileCopy>> {
    for dir in [source_dir, target_dir] {
        if !dir.is_dir() {
            return Err(SyncError::MissingDirectory {
                path: dir.to_path_buf(),
            });
        }
    }

    let copies = plan_missing_files(source_dir, target_dir)?;

    for copy in &copies {
        fs_err::copy(&copy.from, &copy.to).map_err(|e| SyncError::io(&copy.to, e))?;
        info!(
            from = %copy.from.display(),
            to = %copy.to.display(),
            "copied missing resource file"
        );
    }

    Ok(copies)
}
