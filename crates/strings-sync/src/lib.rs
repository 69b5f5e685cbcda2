#![doc = include_str!("../README.md")]

pub mod baseline;
pub mod error;
pub mod languages;
pub mod propagate;
pub mod provision;
pub mod prune;
pub mod resource;
pub mod sync;

pub use baseline::Baseline;
pub use error::{Result, SyncError, TreeSide};
pub use languages::{REFERENCE_LOCALE, list_languages, union_languages};
pub use propagate::{PropagateCounts, propagate, propagate_files};
pub use provision::{FileCopy, copy_missing_files, ensure_language_dirs, plan_missing_files};
pub use prune::{prune, prune_file};
pub use resource::{FileChange, ResourceFile, ResourceMap, load_dir};
pub use sync::{
    FileReport, LanguagePresence, LanguageReport, LanguageStats, SyncOptions, SyncReport,
    Synchronizer, Trees,
};
