//! subject commands - Create, edit, delete and inspect subjects

use anyhow::{bail, Result};

use super::Context;
use crate::core::types::{EntityKind, SubjectId};
use crate::repo::{CatalogError, SUBJECT_HAS_SECTIONS};
use crate::ui::output;

pub fn add(ctx: &Context, name: &str, description: &str) -> Result<()> {
    ctx.require_admin()?;

    let mut repo = ctx.repository();
    let subject = repo.create_subject(name, description)?;

    output::print(
        format!("Subject added successfully (id {})", subject.id),
        ctx.verbosity,
    );
    Ok(())
}

/// Update a subject. Omitted fields keep their current value.
pub fn edit(
    ctx: &Context,
    id: u64,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    ctx.require_admin()?;

    let id = SubjectId::new(id);
    let mut repo = ctx.repository();
    let current = repo
        .find_subject(id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::Subject, id))?;

    let name = name.unwrap_or(&current.name);
    let description = description.unwrap_or(&current.description);
    repo.update_subject(id, name, description)?;

    output::print("Subject updated successfully", ctx.verbosity);
    Ok(())
}

pub fn remove(ctx: &Context, id: u64) -> Result<()> {
    ctx.require_admin()?;

    let id = SubjectId::new(id);
    let mut repo = ctx.repository();
    if repo.subject_has_sections(id) {
        bail!("{}. Delete its sections first.", SUBJECT_HAS_SECTIONS);
    }
    repo.delete_subject(id)?;

    output::print("Subject deleted successfully", ctx.verbosity);
    Ok(())
}

/// Print whether the subject has sections.
pub fn check(ctx: &Context, id: u64) -> Result<()> {
    let repo = ctx.repository();
    println!("{}", repo.subject_has_sections(SubjectId::new(id)));
    Ok(())
}
