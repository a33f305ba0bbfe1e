//! store
//!
//! Whole-document storage for the catalogue.
//!
//! # Architecture
//!
//! The catalogue lives in one JSON file. [`DocumentStore`] reads the whole
//! document and writes the whole document; there is no partial update.
//!
//! # Write Protocol
//!
//! 1. Acquire the exclusive, non-blocking [`StoreLock`] (fail fast if held)
//! 2. Write the new document to a uniquely named temp file next to the data file
//! 3. Flush and `sync_all` the temp file
//! 4. Rename the temp file over the data file
//! 5. Release the lock
//!
//! The rename is the only step that touches the data file, so readers see
//! either the old document or the new one. On any failure after step 2 the
//! temp file is removed.
//!
//! # Read Paths
//!
//! - [`DocumentStore::read`] never fails: a missing or malformed file reads
//!   as an empty document (logged as a warning)
//! - [`DocumentStore::load`] is strict about malformed files and is what
//!   mutations use, so a corrupt document is never overwritten
//!
//! # Example
//!
//! ```ignore
//! use coursetree::store::DocumentStore;
//!
//! let store = DocumentStore::at("data/subjects.json");
//! let mut doc = store.load()?;
//! doc.subjects.clear();
//! store.write(&doc)?;
//! ```

pub mod lock;

pub use lock::{LockError, StoreLock};

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::paths::CatalogPaths;
use crate::core::schema::Document;

/// Errors from document storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another writer holds the lock. Retrying later is safe.
    #[error("catalogue is being written by another process, try again")]
    Locked,

    /// Lock file could not be created, acquired or released.
    #[error(transparent)]
    Lock(LockError),

    /// Filesystem error.
    #[error("i/o error on '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    /// The document exists but is not a valid catalogue.
    #[error("corrupt catalogue document '{path}': {message}")]
    Corrupt { path: PathBuf, message: String },

    /// The document could not be serialized.
    #[error("failed to serialize catalogue: {0}")]
    Serialize(String),
}

impl StoreError {
    /// True for failures that may succeed if the caller tries again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Locked | StoreError::Lock(_) | StoreError::Io { .. }
        )
    }

    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<LockError> for StoreError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::AlreadyLocked => StoreError::Locked,
            other => StoreError::Lock(other),
        }
    }
}

/// Reads and atomically writes the catalogue document.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    paths: CatalogPaths,
}

impl DocumentStore {
    pub fn new(paths: CatalogPaths) -> Self {
        Self { paths }
    }

    /// Store backed by the given data file.
    pub fn at(data_file: impl Into<PathBuf>) -> Self {
        Self::new(CatalogPaths::new(data_file))
    }

    pub fn paths(&self) -> &CatalogPaths {
        &self.paths
    }

    /// Read the document, degrading to an empty one on any failure.
    pub fn read(&self) -> Document {
        match self.load() {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "reading catalogue failed, serving an empty catalogue");
                Document::default()
            }
        }
    }

    /// Read the document. A missing file is an empty document.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Io`] if the file exists but cannot be read
    /// - [`StoreError::Corrupt`] if the file is not a valid document
    pub fn load(&self) -> Result<Document, StoreError> {
        let path = self.paths.data_file();
        debug!(path = %path.display(), "loading catalogue");

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "catalogue file missing, starting empty");
                return Ok(Document::default());
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };

        Document::parse(&contents).map_err(|e| StoreError::Corrupt {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Atomically replace the document on disk.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Locked`] if another writer holds the lock
    /// - [`StoreError::Io`] if writing, syncing or renaming fails
    ///
    /// On error the data file is unchanged and no temp file is left behind.
    pub fn write(&self, doc: &Document) -> Result<(), StoreError> {
        let contents = doc
            .to_pretty_json()
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        let mut lock = StoreLock::acquire(&self.paths)?;

        let token = uuid::Uuid::new_v4().simple().to_string();
        let mut pending = PendingFile::new(self.paths.temp_path(&token));
        pending.write_synced(contents.as_bytes())?;
        pending.persist(self.paths.data_file())?;

        // The new document is already in place; a failed unlock is not a failed write.
        if let Err(e) = lock.release() {
            warn!(error = %e, "releasing catalogue lock failed");
        }

        info!(
            path = %self.paths.data_file().display(),
            subjects = doc.subjects.len(),
            "catalogue written"
        );
        Ok(())
    }
}

/// A temp file that is removed on drop unless it was renamed into place.
struct PendingFile {
    path: PathBuf,
    armed: bool,
}

impl PendingFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: false }
    }

    fn write_synced(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        self.armed = true;

        file.write_all(bytes)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.flush().map_err(|e| StoreError::io(&self.path, e))?;
        file.sync_all().map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    fn persist(mut self, target: &Path) -> Result<(), StoreError> {
        fs::rename(&self.path, target).map_err(|e| StoreError::io(target, e))?;
        self.armed = false;
        Ok(())
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(&self.path);
        }
    }
}
