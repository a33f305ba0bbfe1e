//! store::lock
//!
//! Exclusive lock guarding the write-and-rename step of the document store.
//!
//! # Storage
//!
//! - `<data>.lock` - Sidecar file carrying an OS-level advisory lock
//!
//! # Invariants
//!
//! - Acquisition never waits; a held lock is reported immediately
//! - Dropping the guard unlocks
//! - The sidecar is never renamed or deleted, so every writer contends on
//!   the same inode
//!
//! The lock is advisory: it excludes other writers that go through
//! [`StoreLock`], not processes that write the data file directly.
//!
//! # Example
//!
//! ```ignore
//! use coursetree::core::paths::CatalogPaths;
//! use coursetree::store::lock::StoreLock;
//!
//! let paths = CatalogPaths::new("data/subjects.json");
//! let guard = StoreLock::acquire(&paths)?;
//! // rename the new document into place
//! drop(guard);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;

use fs2::FileExt;
use thiserror::Error;

use crate::core::paths::CatalogPaths;

/// Errors from the catalogue lock.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another writer holds the lock right now.
    #[error("catalogue is locked by another writer")]
    AlreadyLocked,

    /// The data directory or the sidecar file could not be created.
    #[error("cannot open lock file '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    /// The OS refused the lock for a reason other than contention.
    #[error("cannot lock '{path}': {source}")]
    Acquire { path: PathBuf, source: io::Error },

    #[error("cannot unlock '{path}': {source}")]
    Release { path: PathBuf, source: io::Error },
}

/// Guard for the catalogue's sidecar lock.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
    /// `Some` exactly while the OS lock is held.
    handle: Option<File>,
}

impl StoreLock {
    /// Lock the catalogue at `paths`, creating the data directory first.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another writer holds the lock
    /// - [`LockError::Open`] if the directory or sidecar cannot be created
    /// - [`LockError::Acquire`] for any other OS failure
    pub fn acquire(paths: &CatalogPaths) -> Result<Self, LockError> {
        let dir = paths.data_dir();
        fs::create_dir_all(&dir).map_err(|source| LockError::Open {
            path: dir.clone(),
            source,
        })?;

        let path = paths.lock_path();
        let handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::Open {
                path: path.clone(),
                source,
            })?;

        if let Err(source) = handle.try_lock_exclusive() {
            // fs2 reports contention with a platform-specific errno.
            if source.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
                return Err(LockError::AlreadyLocked);
            }
            return Err(LockError::Acquire { path, source });
        }

        Ok(Self {
            path,
            handle: Some(handle),
        })
    }

    /// Like [`StoreLock::acquire`], but contention yields `Ok(None)`.
    #[cfg(test)]
    fn try_acquire(paths: &CatalogPaths) -> Result<Option<Self>, LockError> {
        match Self::acquire(paths) {
            Err(LockError::AlreadyLocked) => Ok(None),
            other => other.map(Some),
        }
    }

    #[cfg(test)]
    fn is_held(&self) -> bool {
        self.handle.is_some()
    }

    /// The sidecar lock file.
    #[cfg(test)]
    fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Unlock now instead of at drop. Calling it twice is a no-op.
    pub fn release(&mut self) -> Result<(), LockError> {
        match self.handle.take() {
            Some(handle) => handle.unlock().map_err(|source| LockError::Release {
                path: self.path.clone(),
                source,
            }),
            None => Ok(()),
        }
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.unlock();
        }
    }
}
