//! repo::error
//!
//! The tagged error returned by every repository operation.

use thiserror::Error;

use crate::core::types::EntityKind;
use crate::core::validate::ValidationError;
use crate::store::StoreError;

/// Refusal message for deleting a subject that still has sections.
pub const SUBJECT_HAS_SECTIONS: &str = "Cannot delete subject with sections";

/// Refusal message for deleting a section that still has topics.
pub const SECTION_HAS_TOPICS: &str = "Cannot delete section with topics";

/// Errors from catalogue operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Empty or over-length field. Never worth retrying.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// The referenced entity does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u64 },

    /// Duplicate sibling name, or delete of a non-empty parent.
    #[error("{0}")]
    Conflict(String),

    /// Every id of this kind up to `u64::MAX` is taken, so nothing new fits.
    #[error("no {0} ids left: the largest {0} id is already {max}", max = u64::MAX)]
    IdsExhausted(EntityKind),

    /// The document could not be loaded or written.
    #[error("storage failure: {0}")]
    StorageFailure(#[from] StoreError),
}

impl CatalogError {
    pub(crate) fn not_found(kind: EntityKind, id: impl Into<u64>) -> Self {
        CatalogError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub(crate) fn duplicate_name(kind: EntityKind, scope: Option<EntityKind>) -> Self {
        let message = match scope {
            Some(parent) => format!("A {kind} with this name already exists in this {parent}"),
            None => format!("A {kind} with this name already exists"),
        };
        CatalogError::Conflict(message)
    }

    /// True if the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::StorageFailure(e) => e.is_transient(),
            _ => false,
        }
    }
}
