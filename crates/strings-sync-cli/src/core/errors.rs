//! CLI error types using miette for Rust-style diagnostics.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use miette::Diagnostic;
use std::path::PathBuf;
use strings_sync::SyncError;
use strings_sync_toml::SyncPathsConfigError;
use thiserror::Error;

/// Error when no tree paths were given and none are remembered.
#[derive(Debug, Diagnostic, Error)]
#[error("no saved tree paths found at {}", expected_path.display())]
#[diagnostic(
    code(strings_sync::config::not_found),
    help(
        "Pass both tree roots once and they will be remembered:\n\n  \
          strings-sync sync <SERVER_STRINGS_DIR> <APP_STRINGS_DIR>\n"
    )
)]
pub struct ConfigNotFoundError {
    /// The path where the config was expected.
    pub expected_path: PathBuf,
}

/// Error when the configuration file cannot be read, parsed or written.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid configuration file {}", path.display())]
#[diagnostic(code(strings_sync::config::invalid))]
pub struct ConfigError {
    /// The configuration file.
    pub path: PathBuf,

    /// The underlying error message.
    #[help]
    pub help: String,
}

/// Error when only one of the two tree roots was given.
#[derive(Debug, Diagnostic, Error)]
#[error("both the server and the app tree must be given")]
#[diagnostic(
    code(strings_sync::args::incomplete),
    help("Pass both roots, or neither to use the saved ones")
)]
pub struct IncompleteTreesError;

/// Error when a tree root doesn't exist.
#[derive(Debug, Diagnostic, Error)]
#[error("{tree} tree not found: {}", path.display())]
#[diagnostic(
    code(strings_sync::tree::not_found),
    help("Check the path; it should be the directory that contains 'en-us'")
)]
pub struct TreeNotFoundError {
    /// Which tree.
    pub tree: String,
    /// The path that was expected.
    pub path: PathBuf,
}

/// Error when a tree has no reference locale directory.
#[derive(Debug, Diagnostic, Error)]
#[error("{tree} tree has no reference locale directory: {}", path.display())]
#[diagnostic(
    code(strings_sync::tree::reference_not_found),
    help("Both trees need the reference locale; it is the baseline every translation is checked against")
)]
pub struct ReferenceLocaleNotFoundError {
    /// Which tree.
    pub tree: String,
    /// The directory that was expected.
    pub path: PathBuf,
}

/// Error when a key is defined by two files of one language directory.
#[derive(Debug, Diagnostic, Error)]
#[error("duplicate key '{key}' in {}", file.display())]
#[diagnostic(
    code(strings_sync::resource::duplicate_key),
    help("Each key may be defined by only one file per language directory")
)]
pub struct DuplicateKeyError {
    /// The key defined twice.
    pub key: String,
    /// The file with the second definition.
    pub file: PathBuf,
}

/// Error when a resource file is not a flat object of strings.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid resource file {}", path.display())]
#[diagnostic(code(strings_sync::resource::parse_error))]
pub struct ResourceParseError {
    /// The offending file.
    pub path: PathBuf,

    /// What was wrong with it.
    #[help]
    pub help: String,
}

/// Error when a language directory disappears while files are copied into or out of it.
#[derive(Debug, Diagnostic, Error)]
#[error("language directory not found: {}", path.display())]
#[diagnostic(
    code(strings_sync::tree::directory_not_found),
    help("The directory was removed during the run; run the sync again")
)]
pub struct DirectoryNotFoundError {
    /// The missing directory.
    pub path: PathBuf,
}

/// Error when reading or writing a file fails.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to access {}", path.display())]
#[diagnostic(code(strings_sync::io))]
pub struct ResourceIoError {
    /// The path being accessed.
    pub path: PathBuf,

    /// The underlying error.
    #[source]
    pub source: std::io::Error,
}

/// Error when a specified locale doesn't exist.
#[derive(Debug, Diagnostic, Error)]
#[error("locale '{locale}' not found")]
#[diagnostic(
    code(strings_sync::locale_not_found),
    help("Available locales: {available}")
)]
pub struct LocaleNotFoundError {
    /// The locale that was specified but not found.
    pub locale: String,
    /// Comma-separated list of available locales.
    pub available: String,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    IncompleteTrees(#[from] IncompleteTreesError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    TreeNotFound(#[from] TreeNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ReferenceLocaleNotFound(#[from] ReferenceLocaleNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    DuplicateKey(#[from] DuplicateKeyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    DirectoryNotFound(#[from] DirectoryNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ResourceParse(#[from] ResourceParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ResourceIo(#[from] ResourceIoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    LocaleNotFound(#[from] LocaleNotFoundError),

    #[error("IO error: {0}")]
    #[diagnostic(code(strings_sync::io))]
    Io(#[from] std::io::Error),
}

impl From<SyncError> for CliError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::DuplicateKey { key, file } => DuplicateKeyError { key, file }.into(),
            SyncError::MissingReferenceLocale { tree, path } => ReferenceLocaleNotFoundError {
                tree: tree.to_string(),
                path,
            }
            .into(),
            SyncError::MissingTreeRoot { tree, path } => TreeNotFoundError {
                tree: tree.to_string(),
                path,
            }
            .into(),
            SyncError::MissingDirectory { path } => DirectoryNotFoundError { path }.into(),
            SyncError::Io { path, source } => ResourceIoError { path, source }.into(),
            SyncError::Parse { path, message } => ResourceParseError {
                path,
                help: message,
            }
            .into(),
        }
    }
}

impl CliError {
    /// Wrap a configuration error for the file at `path`.
    pub fn config(path: PathBuf, err: SyncPathsConfigError) -> Self {
        match err {
            SyncPathsConfigError::NotFound { path } => {
                ConfigNotFoundError {
                    expected_path: path,
                }
                .into()
            },
            other => ConfigError {
                path,
                help: other.to_string(),
            }
            .into(),
        }
    }
}
