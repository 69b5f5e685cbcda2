//! CLI command implementations.

mod common;
mod languages;
mod sync;

pub use common::{PathSource, ResolvedTrees, TreeArgs};
pub use languages::{LanguagesArgs, run_languages};
pub use sync::{SyncArgs, run_sync};
