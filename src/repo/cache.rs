//! repo::cache
//!
//! Read-through cache for the subject list.
//!
//! # Design
//!
//! The cache holds at most one entry: the whole subject tree. Any change
//! anywhere in the tree invalidates it, so there is nothing to key on.
//!
//! Invalidation:
//! - The repository calls [`SubjectCache::invalidate`] after every mutation
//! - There is no expiry; edits made behind the repository's back stay
//!   invisible until the next invalidation or a restart

use std::sync::{Arc, RwLock};

use crate::core::schema::Subject;

/// Snapshot of the subject list.
pub type Snapshot = Arc<Vec<Subject>>;

/// Single-slot memoizing cache.
#[derive(Debug, Default)]
pub struct SubjectCache {
    slot: RwLock<Option<Snapshot>>,
}

impl SubjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot, populating it from `load` on a miss.
    pub fn get_or_load(&self, load: impl FnOnce() -> Vec<Subject>) -> Snapshot {
        if let Ok(slot) = self.slot.read() {
            if let Some(snapshot) = slot.as_ref() {
                return Arc::clone(snapshot);
            }
        }

        let snapshot: Snapshot = Arc::new(load());
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(Arc::clone(&snapshot));
        }
        snapshot
    }

    /// Drop the cached snapshot.
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    /// True if a snapshot is currently cached.
    #[cfg(test)]
    fn is_populated(&self) -> bool {
        self.slot.read().map(|slot| slot.is_some()).unwrap_or(false)
    }
}
