//! hash-password command - Produce a hash for the [admin] config table
//!
//! # Security
//!
//! The password itself is never printed, only its salted hash.

use anyhow::{Context as _, Result};

use super::{Context, ADMIN_PASSWORD_ENV};
use crate::auth::PasswordHash;
use crate::ui::{output, prompts};

/// Print a PBKDF2 hash of the admin password.
pub fn hash_password(ctx: &Context) -> Result<()> {
    let password = match std::env::var(ADMIN_PASSWORD_ENV) {
        Ok(password) if !password.is_empty() => password,
        _ => prompts::password("Password to hash: ", ctx.interactive).with_context(|| {
            format!("Password required. Set {ADMIN_PASSWORD_ENV} or run interactively.")
        })?,
    };

    println!("{}", PasswordHash::generate(&password));

    if ctx.config.path().is_none() {
        output::warn(
            "no config file found; put the hash in ~/.coursetree/config.toml under [admin]",
            ctx.verbosity,
        );
    }
    Ok(())
}
