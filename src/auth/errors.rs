//! auth::errors
//!
//! Authentication error types.
//!
//! # Design
//!
//! Error messages never contain passwords or password hashes.
//!
//! # Example
//!
//! ```
//! use coursetree::auth::AuthError;
//!
//! let err = AuthError::MalformedHash("missing salt".to_string());
//! assert!(err.to_string().contains("missing salt"));
//! ```

use thiserror::Error;

/// Errors from authentication operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No admin account is configured, so nobody may mutate the catalogue.
    #[error("admin credentials are not configured")]
    NotConfigured,

    /// The supplied credentials did not match.
    #[error("unauthorized")]
    Unauthorized,

    /// A stored password hash could not be parsed.
    #[error("malformed password hash: {0}")]
    MalformedHash(String),
}
