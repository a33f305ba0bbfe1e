//! browse commands - Public, read-only views of the catalogue

use anyhow::{bail, Result};

use super::Context;
use crate::ui::output;

/// Show every subject with its sections and topics.
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let repo = ctx.repository();
    let subjects = repo.list_subjects();

    if json {
        println!("{}", output::subjects_json(&subjects)?);
    } else {
        output::print(output::format_catalogue(&subjects), ctx.verbosity);
    }
    Ok(())
}

/// Show a single subject, looked up by its exact name.
pub fn show(ctx: &Context, name: &str, json: bool) -> Result<()> {
    let repo = ctx.repository();
    let Some(subject) = repo.find_subject_by_name(name) else {
        bail!("Subject not found: {}", name);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&subject)?);
    } else {
        output::print(output::format_subject(&subject), ctx.verbosity);
    }
    Ok(())
}
