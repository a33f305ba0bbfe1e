//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input must get it from flags or the
//! environment, or fail with a clear error message.

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Prompt for masked input (passwords).
///
/// The input is not echoed to the terminal. An empty answer counts as
/// cancelling.
pub fn password(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    let value =
        rpassword::prompt_password(message).map_err(|e| PromptError::IoError(e.to_string()))?;
    if value.is_empty() {
        return Err(PromptError::Cancelled);
    }
    Ok(value)
}
