//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: paths and filters must not be
//! empty, and a configured admin password hash must be well formed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::auth::PasswordHash;

/// Catalogue configuration.
///
/// # Example
///
/// ```toml
/// data_file = "/srv/coursetree/subjects.json"
/// log_filter = "coursetree=info"
/// log_dir = "/var/log/coursetree"
///
/// [admin]
/// username = "admin"
/// password_hash = "pbkdf2:sha256:600000$<salt>$<digest-hex>"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Path of the catalogue document
    pub data_file: Option<PathBuf>,

    /// Default tracing filter (overridden by `RUST_LOG`)
    pub log_filter: Option<String>,

    /// Directory for rotating debug log files; no file logging when unset
    pub log_dir: Option<PathBuf>,

    /// Admin credentials gating mutations
    pub admin: Option<AdminConfig>,
}

impl CatalogConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.data_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "data_file cannot be empty".to_string(),
                ));
            }
        }

        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "log_filter cannot be empty".to_string(),
                ));
            }
        }

        if let Some(dir) = &self.log_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "log_dir cannot be empty".to_string(),
                ));
            }
        }

        if let Some(admin) = &self.admin {
            admin.validate()?;
        }

        Ok(())
    }
}

/// Admin credential settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    /// Admin user name
    pub username: Option<String>,

    /// `pbkdf2:sha256:<iterations>$<salt>$<digest>` hash as printed by
    /// `coursetree hash-password` or werkzeug's `generate_password_hash`
    pub password_hash: Option<String>,
}

impl AdminConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(username) = &self.username {
            if username.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "admin.username cannot be empty".to_string(),
                ));
            }
        }

        if let Some(hash) = &self.password_hash {
            PasswordHash::parse(hash).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid admin.password_hash: {}", e))
            })?;
        }

        Ok(())
    }
}
