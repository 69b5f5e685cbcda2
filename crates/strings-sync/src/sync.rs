//! The full reconciliation pass over both trees.
//!
//! Everything that can fail structurally (missing roots, missing reference
//! locales, duplicate reference keys) is checked before the first write.

use crate::baseline::Baseline;
use crate::error::{Result, SyncError, TreeSide};
use crate::languages::{REFERENCE_LOCALE, list_languages, union_languages};
use crate::propagate::propagate_loaded;
use crate::provision::{FileCopy, copy_missing_files, ensure_language_dirs, plan_missing_files};
use crate::prune::prune_loaded;
use crate::resource::{FileChange, ResourceFile, ResourceMap, list_resource_files, load_dir};
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::ops::{Add, AddAssign};
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

/// Root directories of the two trees being reconciled.
#[derive(Clone, Debug)]
pub struct Trees {
    pub server: PathBuf,
    pub app: PathBuf,
}

impl Trees {
    pub fn new(server: impl Into<PathBuf>, app: impl Into<PathBuf>) -> Self {
        Self {
            server: server.into(),
            app: app.into(),
        }
    }

    pub fn root(&self, side: TreeSide) -> &Path {
        match side {
            TreeSide::Server => &self.server,
            TreeSide::App => &self.app,
        }
    }
}

/// Options for a pass.
#[derive(Clone, Debug)]
pub struct SyncOptions {
    /// Directory name of the reference locale in both trees.
    pub reference_locale: String,
    /// Restrict the pass to these languages. `None` processes every language.
    pub only_languages: Option<BTreeSet<String>>,
    /// Compute the outcome without creating or writing anything.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            reference_locale: REFERENCE_LOCALE.to_string(),
            only_languages: None,
            dry_run: false,
        }
    }
}

/// Keys added and removed on each side.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LanguageStats {
    pub server_added: usize,
    pub server_removed: usize,
    pub app_added: usize,
    pub app_removed: usize,
}

impl LanguageStats {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    pub fn added(&self, side: TreeSide) -> usize {
        match side {
            TreeSide::Server => self.server_added,
            TreeSide::App => self.app_added,
        }
    }

    pub fn removed(&self, side: TreeSide) -> usize {
        match side {
            TreeSide::Server => self.server_removed,
            TreeSide::App => self.app_removed,
        }
    }
}

impl Add for LanguageStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            server_added: self.server_added + rhs.server_added,
            server_removed: self.server_removed + rhs.server_removed,
            app_added: self.app_added + rhs.app_added,
            app_removed: self.app_removed + rhs.app_removed,
        }
    }
}

impl AddAssign for LanguageStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for LanguageStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Outcome for one resource file name within a language.
#[derive(Clone, Debug)]
pub struct FileReport {
    /// File name shared by the server and app copies.
    pub name: String,
    pub stats: LanguageStats,
    /// Files whose text changed (or would change, in a dry run).
    pub changes: Vec<FileChange>,
}

/// Outcome for one language.
#[derive(Clone, Debug)]
pub struct LanguageReport {
    pub language: String,
    /// Whole files copied between the trees.
    pub copies: Vec<FileCopy>,
    /// One entry per resource file, sorted by name.
    pub files: Vec<FileReport>,
}

impl LanguageReport {
    pub fn stats(&self) -> LanguageStats {
        self.files.iter().map(|file| file.stats).sum()
    }

    pub fn is_unchanged(&self) -> bool {
        self.copies.is_empty() && self.files.iter().all(|file| file.changes.is_empty())
    }
}

/// Result of a full pass.
#[derive(Clone, Debug)]
pub struct SyncReport {
    /// Language directories created in either tree.
    pub created_dirs: Vec<PathBuf>,
    /// Reference keys whose text differs between the trees.
    pub collisions: Vec<String>,
    pub languages: BTreeMap<String, LanguageReport>,
    pub dry_run: bool,
}

impl SyncReport {
    /// Language id to its four counts.
    pub fn stats(&self) -> BTreeMap<&str, LanguageStats> {
        self.languages
            .iter()
            .map(|(language, report)| (language.as_str(), report.stats()))
            .collect()
    }

    pub fn totals(&self) -> LanguageStats {
        self.languages.values().map(LanguageReport::stats).sum()
    }

    pub fn changes(&self) -> impl Iterator<Item = &FileChange> {
        self.languages
            .values()
            .flat_map(|report| &report.files)
            .flat_map(|file| &file.changes)
    }

    pub fn copies(&self) -> impl Iterator<Item = &FileCopy> {
        self.languages.values().flat_map(|report| &report.copies)
    }

    /// True when the pass had (or would have) nothing to do.
    pub fn is_in_sync(&self) -> bool {
        self.created_dirs.is_empty() && self.languages.values().all(LanguageReport::is_unchanged)
    }
}

/// Which trees currently carry a language directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LanguagePresence {
    pub language: String,
    pub in_server: bool,
    pub in_app: bool,
}

/// Reference data computed once, before anything is written.
#[derive(Debug)]
struct Prepared {
    server_reference: ResourceMap,
    app_reference: ResourceMap,
    baseline: Baseline,
    languages: Vec<String>,
}

/// Drives the reconciliation of two trees.
#[derive(Clone, Debug)]
pub struct Synchronizer {
    trees: Trees,
    options: SyncOptions,
}

impl Synchronizer {
    pub fn new(trees: Trees, options: SyncOptions) -> Self {
        Self { trees, options }
    }

    /// The union of both trees' languages, sorted, without the reference locale.
    pub fn languages(&self) -> Result<Vec<String>> {
        self.check_roots()?;
        let server = list_languages(TreeSide::Server, &self.trees.server, self.reference())?;
        let app = list_languages(TreeSide::App, &self.trees.app, self.reference())?;
        Ok(union_languages(&server, &app))
    }

    /// Every language with the trees it is present in.
    pub fn survey(&self) -> Result<Vec<LanguagePresence>> {
        self.check_roots()?;
        let server = list_languages(TreeSide::Server, &self.trees.server, self.reference())?;
        let app = list_languages(TreeSide::App, &self.trees.app, self.reference())?;

        Ok(union_languages(&server, &app)
            .into_iter()
            .map(|language| LanguagePresence {
                in_server: server.contains(&language),
                in_app: app.contains(&language),
                language,
            })
            .collect())
    }

    /// Run the pass over every selected language.
    pub fn run(&self) -> Result<SyncReport> {
        let prepared = self.prepare()?;
        let dry_run = self.options.dry_run;

        let mut created_dirs = Vec::new();
        for side in [TreeSide::Server, TreeSide::App] {
            let root = self.trees.root(side);
            if dry_run {
                created_dirs.extend(
                    prepared
                        .languages
                        .iter()
                        .map(|language| root.join(language))
                        .filter(|dir| !dir.exists()),
                );
            } else {
                created_dirs.extend(ensure_language_dirs(&prepared.languages, root)?);
            }
        }

        let mut languages = BTreeMap::new();
        for language in &prepared.languages {
            let report = self.sync_language(&prepared, language)?;
            languages.insert(language.clone(), report);
        }

        Ok(SyncReport {
            created_dirs,
            collisions: prepared.baseline.collisions().to_vec(),
            languages,
            dry_run,
        })
    }

    fn reference(&self) -> &str {
        &self.options.reference_locale
    }

    fn check_roots(&self) -> Result<()> {
        for side in [TreeSide::Server, TreeSide::App] {
            let root = self.trees.root(side);
            if !root.is_dir() {
                return Err(SyncError::MissingTreeRoot {
                    tree: side,
                    path: root.to_path_buf(),
                });
            }
        }
        Ok(())
    }

    fn load_reference(&self, side: TreeSide) -> Result<ResourceMap> {
        let dir = self.trees.root(side).join(self.reference());
        if !dir.is_dir() {
            return Err(SyncError::MissingReferenceLocale {
                tree: side,
                path: dir,
            });
        }
        load_dir(&dir)
    }

    fn prepare(&self) -> Result<Prepared> {
        self.check_roots()?;

        let server_reference = self.load_reference(TreeSide::Server)?;
        let app_reference = self.load_reference(TreeSide::App)?;
        let baseline = Baseline::build(&server_reference, &app_reference);
        debug!(
            baseline = baseline.len(),
            collisions = baseline.collisions().len(),
            "built reference baseline"
        );

        let mut languages = self.languages()?;
        if let Some(only) = &self.options.only_languages {
            languages.retain(|language| only.contains(language));
        }

        Ok(Prepared {
            server_reference,
            app_reference,
            baseline,
            languages,
        })
    }

    fn sync_language(&self, prepared: &Prepared, language: &str) -> Result<LanguageReport> {
        let _span = info_span!("language", %language).entered();

        let server_dir = self.trees.server.join(language);
        let app_dir = self.trees.app.join(language);

        let mut copies = Vec::new();
        if self.options.dry_run {
            copies.extend(plan_missing_files(&server_dir, &app_dir)?);
            copies.extend(plan_missing_files(&app_dir, &server_dir)?);
        } else {
            copies.extend(copy_missing_files(&server_dir, &app_dir)?);
            copies.extend(copy_missing_files(&app_dir, &server_dir)?);
        }

        let mut names = resource_names(&server_dir)?;
        names.extend(resource_names(&app_dir)?);

        let mut files = Vec::with_capacity(names.len());
        for name in names {
            files.push(self.sync_file(prepared, &server_dir.join(&name), &app_dir.join(&name))?);
        }

        Ok(LanguageReport {
            language: language.to_string(),
            copies,
            files,
        })
    }

    fn sync_file(
        &self,
        prepared: &Prepared,
        server_path: &Path,
        app_path: &Path,
    ) -> Result<FileReport> {
        let mut server = ResourceFile::load_or_seed(server_path, app_path)?;
        let mut app = ResourceFile::load_or_seed(app_path, server_path)?;

        let server_removed = prune_loaded(&prepared.server_reference, &mut server);
        let app_removed = prune_loaded(&prepared.app_reference, &mut app);
        let added = propagate_loaded(&prepared.baseline, &mut server, &mut app);

        let dry_run = self.options.dry_run;
        let changes = [server.save(dry_run)?, app.save(dry_run)?]
            .into_iter()
            .flatten()
            .collect();

        Ok(FileReport {
            name: server_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            stats: LanguageStats {
                server_added: added.server_added,
                server_removed,
                app_added: added.app_added,
                app_removed,
            },
            changes,
        })
    }
}

/// File names of the resource files in `dir`; empty when `dir` does not exist yet.
fn resource_names(dir: &Path) -> Result<BTreeSet<OsString>> {
    if !dir.is_dir() {
        return Ok(BTreeSet::new());
    }

    Ok(list_resource_files(dir)?
        .into_iter()
        .filter_map(|path| path.file_name().map(OsString::from))
        .collect())
}
