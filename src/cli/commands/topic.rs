//! topic commands - Create, edit, delete and show topics

use anyhow::Result;

use super::Context;
use crate::core::types::{EntityKind, SectionId, TopicId};
use crate::repo::CatalogError;
use crate::ui::output;

pub fn add(ctx: &Context, section_id: u64, name: &str, text: &str, code: &str) -> Result<()> {
    ctx.require_admin()?;

    let mut repo = ctx.repository();
    let topic = repo.create_topic(SectionId::new(section_id), name, text, code)?;

    output::print(
        format!("Topic added successfully (id {})", topic.id),
        ctx.verbosity,
    );
    Ok(())
}

/// Update a topic. Omitted fields keep their current value; an empty
/// `--text ""` or `--code ""` clears the field.
pub fn edit(
    ctx: &Context,
    id: u64,
    name: Option<&str>,
    text: Option<&str>,
    code: Option<&str>,
) -> Result<()> {
    ctx.require_admin()?;

    let id = TopicId::new(id);
    let mut repo = ctx.repository();
    let current = repo
        .find_topic(id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::Topic, id))?;

    let name = name.unwrap_or(&current.name);
    let text = text.unwrap_or_else(|| current.details.text.as_deref().unwrap_or(""));
    let code = code.unwrap_or_else(|| current.details.code.as_deref().unwrap_or(""));
    repo.update_topic(id, name, text, code)?;

    output::print("Topic updated successfully", ctx.verbosity);
    Ok(())
}

pub fn remove(ctx: &Context, id: u64) -> Result<()> {
    ctx.require_admin()?;

    let mut repo = ctx.repository();
    repo.delete_topic(TopicId::new(id))?;

    output::print("Topic deleted successfully", ctx.verbosity);
    Ok(())
}

pub fn show(ctx: &Context, id: u64) -> Result<()> {
    let id = TopicId::new(id);
    let repo = ctx.repository();
    let topic = repo
        .find_topic(id)
        .ok_or_else(|| CatalogError::not_found(EntityKind::Topic, id))?;

    output::print(output::format_topic(&topic), ctx.verbosity);
    Ok(())
}
