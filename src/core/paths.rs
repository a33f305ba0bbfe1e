//! core::paths
//!
//! Centralized path routing for catalogue storage.
//!
//! All files the store touches live next to the data file, so the temporary
//! file can be renamed over the data file atomically (same filesystem):
//! - `<data>` - the catalogue document (e.g. `data/subjects.json`)
//! - `<data>.lock` - lock file guarding the write-and-rename step
//! - `<data>.<uuid>.tmp` - temporary file for one write
//!
//! # Example
//!
//! ```
//! use coursetree::core::paths::CatalogPaths;
//! use std::path::PathBuf;
//!
//! let paths = CatalogPaths::new("data/subjects.json");
//!
//! assert_eq!(paths.lock_path(), PathBuf::from("data/subjects.json.lock"));
//! assert_eq!(paths.data_dir(), PathBuf::from("data"));
//! ```

use std::path::{Path, PathBuf};

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/subjects.json";

/// Locations of the catalogue document and its sidecar files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    data_file: PathBuf,
}

impl CatalogPaths {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// The canonical document path.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Directory holding the document and its sidecar files.
    ///
    /// A bare file name resolves to the current directory.
    pub fn data_dir(&self) -> PathBuf {
        match self.data_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Lock file guarding writes of the document.
    pub fn lock_path(&self) -> PathBuf {
        self.sibling_with_suffix(".lock")
    }

    /// A temporary file for one write, unique per `token`.
    pub fn temp_path(&self, token: &str) -> PathBuf {
        self.sibling_with_suffix(&format!(".{token}.tmp"))
    }

    fn sibling_with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .data_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "subjects.json".into());
        name.push(suffix);
        self.data_dir().join(name)
    }
}

impl Default for CatalogPaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}
