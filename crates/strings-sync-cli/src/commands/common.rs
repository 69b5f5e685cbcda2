use crate::core::{CliError, IncompleteTreesError, TreeNotFoundError};
use clap::Args;
use std::path::{Path, PathBuf};
use strings_sync::{TreeSide, Trees};
use strings_sync_toml::{CONFIG_FILE_NAME, SyncPathsConfig};
use tracing::debug;

/// Tree roots, either given explicitly or remembered from an earlier run.
#[derive(Debug, Clone, Args)]
pub struct TreeArgs {
    /// Root of the server tree (the directory containing `en-us`).
    pub server: Option<PathBuf>,

    /// Root of the app tree (the directory containing `en-us`).
    pub app: Option<PathBuf>,

    /// File in which the tree roots are remembered.
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Don't remember the given tree roots.
    #[arg(long)]
    pub no_save: bool,

    /// Reference locale directory name (overrides the saved one, default `en-us`).
    #[arg(long)]
    pub reference_locale: Option<String>,
}

/// Where the tree roots of a run came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource {
    /// Given on the command line, and saved to the config file if `saved_to` is set.
    Arguments { saved_to: Option<PathBuf> },
    /// Loaded from the config file.
    Config(PathBuf),
}

/// Tree roots and reference locale ready for a run.
#[derive(Debug, Clone)]
pub struct ResolvedTrees {
    pub trees: Trees,
    pub reference_locale: String,
    pub source: PathSource,
}

impl TreeArgs {
    /// Resolve the roots for this run, remembering explicit ones unless `--no-save`.
    ///
    /// Explicit roots are checked before anything is written, so a mistyped
    /// path is never remembered.
    pub fn resolve(self) -> Result<ResolvedTrees, CliError> {
        let (server, app) = match (self.server, self.app) {
            (Some(server), Some(app)) => (server, app),
            (None, None) => return Self::from_config(self.config, self.reference_locale),
            _ => return Err(IncompleteTreesError.into()),
        };

        let server = canonical_root(TreeSide::Server, &server)?;
        let app = canonical_root(TreeSide::App, &app)?;

        let saved_reference = match SyncPathsConfig::read_from_path(&self.config) {
            Ok(config) => config.reference_locale,
            Err(err) => {
                debug!(config = %self.config.display(), error = %err, "no usable saved config");
                None
            },
        };
        let reference_locale = self.reference_locale.or(saved_reference);

        let saved_to = if self.no_save {
            None
        } else {
            let config = SyncPathsConfig {
                server: server.clone(),
                app: app.clone(),
                reference_locale: reference_locale.clone(),
            };
            config
                .write_to_path(&self.config)
                .map_err(|err| CliError::config(self.config.clone(), err))?;
            Some(self.config)
        };

        Ok(ResolvedTrees {
            trees: Trees::new(server, app),
            reference_locale: reference_locale
                .unwrap_or_else(|| strings_sync::REFERENCE_LOCALE.to_string()),
            source: PathSource::Arguments { saved_to },
        })
    }

    fn from_config(
        path: PathBuf,
        reference_locale: Option<String>,
    ) -> Result<ResolvedTrees, CliError> {
        let config = SyncPathsConfig::read_resolved(&path)
            .map_err(|err| CliError::config(path.clone(), err))?;
        debug!(config = %path.display(), ?config, "loaded saved tree paths");

        let reference_locale =
            reference_locale.unwrap_or_else(|| config.reference_locale().to_string());

        Ok(ResolvedTrees {
            trees: Trees::new(config.server, config.app),
            reference_locale,
            source: PathSource::Config(path),
        })
    }
}

fn canonical_root(tree: TreeSide, path: &Path) -> Result<PathBuf, CliError> {
    if !path.is_dir() {
        return Err(TreeNotFoundError {
            tree: tree.to_string(),
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(fs_err::canonicalize(path)?)
}
