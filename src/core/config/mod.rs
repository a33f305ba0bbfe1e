//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order; the first file that exists wins:
//! 1. `$COURSETREE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/coursetree/config.toml`
//! 3. `~/.coursetree/config.toml`
//!
//! # Precedence
//!
//! For the data file (later overrides earlier):
//! 1. Default (`data/subjects.json`)
//! 2. `data_file` in the config file
//! 3. `$COURSETREE_DATA`
//! 4. `--data` on the command line (not handled here)
//!
//! # Example
//!
//! ```no_run
//! use coursetree::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Data file: {}", config.data_file().display());
//! ```

pub mod schema;

pub use schema::{AdminConfig, CatalogConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::DEFAULT_DATA_FILE;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "COURSETREE_CONFIG";

/// Environment variable overriding the data file.
pub const DATA_ENV: &str = "COURSETREE_DATA";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration plus where it came from.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: CatalogConfig,
    path: Option<PathBuf>,
    data_override: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation. Missing files are not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.data_override = std::env::var_os(DATA_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Ok(config)
    }

    /// Load configuration from an explicit file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: CatalogConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
            data_override: None,
        })
    }

    fn find_config_file() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Some(xdg_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("coursetree/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".coursetree/config.toml"))
            .filter(|path| path.exists())
    }

    /// Path of the config file that was loaded, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The catalogue document path with precedence applied.
    pub fn data_file(&self) -> PathBuf {
        self.data_override
            .clone()
            .or_else(|| self.file.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// Default tracing filter.
    ///
    /// Defaults to `warn` if not configured.
    pub fn log_filter(&self) -> &str {
        self.file.log_filter.as_deref().unwrap_or("warn")
    }

    /// Directory for rotating log files, if file logging is enabled.
    pub fn log_dir(&self) -> Option<&Path> {
        self.file.log_dir.as_deref()
    }

    /// Admin settings, if configured.
    pub fn admin(&self) -> Option<&AdminConfig> {
        self.file.admin.as_ref()
    }
}
