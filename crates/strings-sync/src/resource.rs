//! Resource files: flat JSON objects mapping translation keys to strings.
//!
//! Every file is read into a [`ResourceMap`] and written back in one canonical
//! form (sorted keys, two-space indentation, trailing newline), so a file that
//! is logically unchanged is never rewritten.

use crate::error::{Result, SyncError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of the files treated as resource files.
pub const RESOURCE_EXTENSION: &str = "json";

/// Key to translated string, iterated in sorted key order.
pub type ResourceMap = BTreeMap<String, String>;

/// Whether `path` names a resource file (by extension only).
pub fn is_resource_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == RESOURCE_EXTENSION)
}

/// List the resource files directly inside `dir`, sorted by file name.
///
/// Subdirectories and files with other extensions are ignored.
pub fn list_resource_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            SyncError::io(path, err.into())
        })?;

        // `Path::is_file` follows symlinks; `entry.file_type()` does not.
        if entry.path().is_file() && is_resource_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Load every resource file of a language directory into one mapping.
///
/// A key defined by more than one file is an error: there is no way to tell
/// which definition is the intended one.
pub fn load_dir(dir: &Path) -> Result<ResourceMap> {
    let mut merged = ResourceMap::new();

    for path in list_resource_files(dir)? {
        let file = ResourceFile::load(&path)?;
        for (key, value) in file.entries {
            if merged.contains_key(&key) {
                return Err(SyncError::DuplicateKey { key, file: path });
            }
            merged.insert(key, value);
        }
    }

    Ok(merged)
}

/// Parse the text of a resource file.
pub fn parse_resource(path: &Path, content: &str) -> Result<ResourceMap> {
    let parse_error = |message: String| SyncError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let value: Value = serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;

    let Value::Object(object) = value else {
        return Err(parse_error(format!(
            "expected a JSON object at the top level, found {}",
            value_kind(&value)
        )));
    };

    object
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => Ok((key, text)),
            other => Err(parse_error(format!(
                "value of key '{}' must be a string, found {}",
                key,
                value_kind(&other)
            ))),
        })
        .collect()
}

/// Render a mapping in canonical form.
pub fn render_resource(entries: &ResourceMap) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(entries)?;
    out.push('\n');
    Ok(out)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a nested array",
        Value::Object(_) => "a nested object",
    }
}

/// A file whose contents differ (or would differ) after a pass.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileChange {
    /// The file that changed.
    pub path: PathBuf,
    /// Text before the pass.
    pub before: String,
    /// Text after the pass.
    pub after: String,
}

/// A single resource file held in memory between load and save.
#[derive(Clone, Debug)]
pub struct ResourceFile {
    path: PathBuf,
    original: String,
    entries: ResourceMap,
}

impl ResourceFile {
    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let original = fs_err::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        let entries = parse_resource(path, &original)?;

        Ok(Self {
            path: path.to_path_buf(),
            original,
            entries,
        })
    }

    /// Load `path`, or if it does not exist yet, the file that would be copied to it.
    ///
    /// Used when planning without touching disk: the file at `path` is treated
    /// as a verbatim copy of `seed`.
    pub fn load_or_seed(path: &Path, seed: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        let seeded = Self::load(seed)?;
        Ok(Self {
            path: path.to_path_buf(),
            ..seeded
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &ResourceMap {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut ResourceMap {
        &mut self.entries
    }

    /// The canonical text of the current entries.
    pub fn render(&self) -> Result<String> {
        render_resource(&self.entries).map_err(|e| SyncError::io(&self.path, e.into()))
    }

    /// Write the file back if its canonical text differs from what was loaded.
    ///
    /// With `dry_run` set nothing is written; the change is still returned.
    pub fn save(&self, dry_run: bool) -> Result<Option<FileChange>> {
        let rendered = self.render()?;
        if rendered == self.original {
            return Ok(None);
        }

        if !dry_run {
            fs_err::write(&self.path, &rendered).map_err(|e| SyncError::io(&self.path, e))?;
        }

        Ok(Some(FileChange {
            path: self.path.clone(),
            before: self.original.clone(),
            after: rendered,
        }))
    }
}
