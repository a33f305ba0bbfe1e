//! section commands - Create, rename, delete and inspect sections

use anyhow::{bail, Result};

use super::Context;
use crate::core::types::{SectionId, SubjectId};
use crate::repo::SECTION_HAS_TOPICS;
use crate::ui::output;

pub fn add(ctx: &Context, subject_id: u64, name: &str) -> Result<()> {
    ctx.require_admin()?;

    let mut repo = ctx.repository();
    let section = repo.create_section(SubjectId::new(subject_id), name)?;

    output::print(
        format!("Section added successfully (id {})", section.id),
        ctx.verbosity,
    );
    Ok(())
}

pub fn edit(ctx: &Context, id: u64, name: &str) -> Result<()> {
    ctx.require_admin()?;

    let mut repo = ctx.repository();
    repo.update_section(SectionId::new(id), name)?;

    output::print("Section updated successfully", ctx.verbosity);
    Ok(())
}

pub fn remove(ctx: &Context, id: u64) -> Result<()> {
    ctx.require_admin()?;

    let id = SectionId::new(id);
    let mut repo = ctx.repository();
    if repo.section_has_topics(id) {
        bail!("{}. Delete its topics first.", SECTION_HAS_TOPICS);
    }
    repo.delete_section(id)?;

    output::print("Section deleted successfully", ctx.verbosity);
    Ok(())
}

/// Print whether the section has topics.
pub fn check(ctx: &Context, id: u64) -> Result<()> {
    let repo = ctx.repository();
    println!("{}", repo.section_has_topics(SectionId::new(id)));
    Ok(())
}
