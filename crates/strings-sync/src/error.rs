use std::path::PathBuf;
use thiserror::Error;

/// Which of the two localization trees an error or count refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TreeSide {
    Server,
    App,
}

impl TreeSide {
    pub fn as_str(self) -> &'static str {
        match self {
            TreeSide::Server => "server",
            TreeSide::App => "app",
        }
    }
}

impl std::fmt::Display for TreeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    /// The same key is defined by two resource files of one language directory.
    #[error("Duplicate key found: '{key}' in {}", file.display())]
    DuplicateKey {
        /// The key defined more than once.
        key: String,
        /// The file in which the second definition was seen.
        file: PathBuf,
    },
    /// A tree has no reference locale directory to reconcile against.
    #[error("{tree} tree has no reference locale directory: {}", path.display())]
    MissingReferenceLocale {
        /// The tree missing its reference locale.
        tree: TreeSide,
        /// The directory that was expected.
        path: PathBuf,
    },
    /// A tree root does not exist.
    #[error("{tree} tree root not found: {}", path.display())]
    MissingTreeRoot {
        /// The tree whose root is missing.
        tree: TreeSide,
        /// The supplied root path.
        path: PathBuf,
    },
    /// A language directory required for copying does not exist.
    #[error("Directory not found: {}", path.display())]
    MissingDirectory {
        /// The missing directory.
        path: PathBuf,
    },
    /// Reading, writing, copying or listing failed.
    #[error("I/O error on {}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A resource file is not a flat JSON object of strings.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = SyncError> = std::result::Result<T, E>;
