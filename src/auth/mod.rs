//! auth - Admin credential checks
//!
//! The catalogue core never checks credentials. The front-end gates every
//! mutating command on [`is_authorized`] before calling the repository.
//!
//! # Components
//!
//! - [`PasswordHash`] - PBKDF2-SHA256 hash in werkzeug's `pbkdf2:sha256:<iterations>$<salt>$<digest>` form
//! - [`Credentials`] - A user name and password supplied by the caller
//! - [`AdminAccount`] - The configured admin user name and hash
//!
//! # Example
//!
//! ```
//! use coursetree::auth::{is_authorized, AdminAccount, Credentials, PasswordHash};
//!
//! let hash = PasswordHash::derive("admin123", "docsalt", 1_000)?;
//! let admin = AdminAccount::new("admin", hash);
//!
//! assert!(is_authorized(&admin, &Credentials::new("admin", "admin123")));
//! assert!(!is_authorized(&admin, &Credentials::new("admin", "wrong")));
//! assert!(!is_authorized(&admin, &Credentials::new("root", "admin123")));
//! # Ok::<(), coursetree::auth::AuthError>(())
//! ```

mod errors;
mod password;

pub use errors::AuthError;
pub use password::PasswordHash;

use std::fmt;

use crate::core::config::AdminConfig;

/// Credentials presented by a caller.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// The configured admin account.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    username: String,
    password_hash: PasswordHash,
}

impl AdminAccount {
    pub fn new(username: impl Into<String>, password_hash: PasswordHash) -> Self {
        Self {
            username: username.into(),
            password_hash,
        }
    }

    /// Build the account from config.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotConfigured`] if the user name or hash is missing
    /// - [`AuthError::MalformedHash`] if the hash cannot be parsed
    pub fn from_config(config: Option<&AdminConfig>) -> Result<Self, AuthError> {
        let config = config.ok_or(AuthError::NotConfigured)?;
        match (&config.username, &config.password_hash) {
            (Some(username), Some(hash)) => {
                Ok(Self::new(username.clone(), PasswordHash::parse(hash)?))
            }
            _ => Err(AuthError::NotConfigured),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// True if the credentials match the admin account.
pub fn is_authorized(admin: &AdminAccount, credentials: &Credentials) -> bool {
    // Always verify the password so timing does not reveal the user name.
    let password_ok = admin.password_hash.verify(&credentials.password);
    password_ok && credentials.username == admin.username
}

/// Check credentials, reporting the failure as an error.
pub fn authorize(admin: &AdminAccount, credentials: &Credentials) -> Result<(), AuthError> {
    if is_authorized(admin, credentials) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}
