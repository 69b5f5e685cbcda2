#![doc = include_str!("../README.md")]

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the configuration, looked up in the working directory by default.
pub const CONFIG_FILE_NAME: &str = "strings-sync.toml";

/// Reference locale used when the configuration does not name one.
pub const DEFAULT_REFERENCE_LOCALE: &str = "en-us";

#[derive(Debug, Error)]
pub enum SyncPathsConfigError {
    /// Configuration file not found.
    #[error("{} configuration file not found", path.display())]
    NotFound {
        /// Where the file was expected.
        path: PathBuf,
    },
    /// Failed to read or write the configuration file.
    #[error("Failed to access configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Failed to serialize the configuration.
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// The two trees to reconcile.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SyncPathsConfig {
    /// Root of the server tree.
    pub server: PathBuf,
    /// Root of the app tree.
    pub app: PathBuf,
    /// Directory name of the reference locale in both trees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_locale: Option<String>,
}

impl SyncPathsConfig {
    pub fn new(server: impl Into<PathBuf>, app: impl Into<PathBuf>) -> Self {
        Self {
            server: server.into(),
            app: app.into(),
            reference_locale: None,
        }
    }

    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SyncPathsConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SyncPathsConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs_err::read_to_string(path)?;
        let config: SyncPathsConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// Reads `strings-sync.toml` from a directory.
    pub fn read_from_dir(dir: &Path) -> Result<Self, SyncPathsConfigError> {
        Self::read_from_path(dir.join(CONFIG_FILE_NAME))
    }

    /// Writes the configuration, replacing any existing file.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), SyncPathsConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs_err::write(path.as_ref(), content)?;
        Ok(())
    }

    /// The reference locale, falling back to [`DEFAULT_REFERENCE_LOCALE`].
    pub fn reference_locale(&self) -> &str {
        self.reference_locale
            .as_deref()
            .unwrap_or(DEFAULT_REFERENCE_LOCALE)
    }

    /// Returns the server root resolved against `base_dir`.
    pub fn server_from_base(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.server)
    }

    /// Returns the app root resolved against `base_dir`.
    pub fn app_from_base(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.app)
    }

    /// Read a configuration file and resolve its paths against the file's directory.
    pub fn read_resolved(path: &Path) -> Result<Self, SyncPathsConfigError> {
        let config = Self::read_from_path(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

        Ok(Self {
            server: config.server_from_base(base_dir),
            app: config.app_from_base(base_dir),
            reference_locale: config.reference_locale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_from_path_success() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        let config_content = r#"
server = "server/strings"
app = "app/strings"
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = SyncPathsConfig::read_from_path(&config_path).unwrap();
        assert_eq!(config.server, PathBuf::from("server/strings"));
        assert_eq!(config.app, PathBuf::from("app/strings"));
        assert_eq!(config.reference_locale(), "en-us");
    }

    #[test]
    fn test_read_from_path_file_not_found() {
        let non_existent_path = Path::new("/non/existent/path/strings-sync.toml");
        let result = SyncPathsConfig::read_from_path(non_existent_path);
        assert!(matches!(result, Err(SyncPathsConfigError::NotFound { .. })));
    }

    #[rstest]
    #[case::missing_app("server = \"a\"\n")]
    #[case::wrong_type("server = 1\napp = \"b\"\n")]
    #[case::not_toml("server = \n")]
    fn test_read_from_path_invalid(#[case] content: &str) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, content).unwrap();

        let result = SyncPathsConfig::read_from_path(&config_path);
        assert!(matches!(result, Err(SyncPathsConfigError::ParseError(_))));
    }

    #[test]
    fn test_write_then_read_from_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = SyncPathsConfig::new("/repos/server/strings", "/repos/app/strings");
        config.reference_locale = Some("en".to_string());

        config
            .write_to_path(temp_dir.path().join(CONFIG_FILE_NAME))
            .unwrap();
        let read = SyncPathsConfig::read_from_dir(temp_dir.path()).unwrap();

        assert_eq!(read, config);
        assert_eq!(read.reference_locale(), "en");
    }

    #[test]
    fn test_write_omits_default_reference_locale() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        SyncPathsConfig::new("s", "a").write_to_path(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("reference_locale"));
    }

    #[test]
    fn test_read_resolved_joins_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "server = \"s\"\napp = \"/abs/app\"\n").unwrap();

        let config = SyncPathsConfig::read_resolved(&config_path).unwrap();

        assert_eq!(config.server, temp_dir.path().join("s"));
        assert_eq!(config.app, PathBuf::from("/abs/app"));
    }
}
