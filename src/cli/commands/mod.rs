//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves command-specific arguments
//! 2. Checks admin credentials if the command mutates the catalogue
//! 3. Calls the repository
//! 4. Formats and displays output
//!
//! Handlers do NOT touch the catalogue file directly.

mod browse;
mod completion;
mod hash_password;
mod section;
mod subject;
mod topic;

pub use browse::{list, show};
pub use completion::completion;
pub use hash_password::hash_password;

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};

use crate::auth::{self, AdminAccount, Credentials};
use crate::cli::args::{Cli, Command, SectionAction, SubjectAction, TopicAction};
use crate::core::config::Config;
use crate::repo::CatalogRepository;
use crate::ui::output::Verbosity;
use crate::ui::prompts;

/// Environment variable holding the admin user name.
pub const ADMIN_USER_ENV: &str = "COURSETREE_ADMIN_USER";

/// Environment variable holding the admin password.
pub const ADMIN_PASSWORD_ENV: &str = "COURSETREE_ADMIN_PASSWORD";

/// Everything a command handler needs from the environment.
#[derive(Debug, Clone)]
pub struct Context {
    pub data_file: PathBuf,
    pub verbosity: Verbosity,
    pub interactive: bool,
    pub user: Option<String>,
    pub config: Config,
}

impl Context {
    /// Build the context; `--data` wins over config and environment.
    pub fn from_cli(cli: &Cli, config: Config) -> Self {
        Self {
            data_file: cli.data.clone().unwrap_or_else(|| config.data_file()),
            verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
            interactive: cli.interactive(),
            user: cli.user.clone(),
            config,
        }
    }

    /// Open the repository over this context's data file.
    pub fn repository(&self) -> CatalogRepository {
        CatalogRepository::open(&self.data_file)
    }

    /// Fail unless the caller presents the admin credentials.
    pub fn require_admin(&self) -> Result<()> {
        let admin = AdminAccount::from_config(self.config.admin())
            .context("Changing the catalogue requires an [admin] account in the config file")?;

        let username = match self.user.clone().or_else(|| std::env::var(ADMIN_USER_ENV).ok()) {
            Some(name) => name,
            None => bail!("Admin user required. Use --user <NAME> or set {ADMIN_USER_ENV}."),
        };

        let password = match std::env::var(ADMIN_PASSWORD_ENV) {
            Ok(password) => password,
            Err(_) => prompts::password("Admin password: ", self.interactive).with_context(
                || format!("Admin password required. Set {ADMIN_PASSWORD_ENV} or run interactively."),
            )?,
        };

        auth::authorize(&admin, &Credentials::new(username, password))?;
        Ok(())
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::List { json } => browse::list(ctx, json),
        Command::Show { name, json } => browse::show(ctx, &name, json),

        Command::Subject { action } => match action {
            SubjectAction::Add { name, description } => subject::add(ctx, &name, &description),
            SubjectAction::Edit {
                id,
                name,
                description,
            } => subject::edit(ctx, id, name.as_deref(), description.as_deref()),
            SubjectAction::Rm { id } => subject::remove(ctx, id),
            SubjectAction::Check { id } => subject::check(ctx, id),
        },

        Command::Section { action } => match action {
            SectionAction::Add { subject_id, name } => section::add(ctx, subject_id, &name),
            SectionAction::Edit { id, name } => section::edit(ctx, id, &name),
            SectionAction::Rm { id } => section::remove(ctx, id),
            SectionAction::Check { id } => section::check(ctx, id),
        },

        Command::Topic { action } => match action {
            TopicAction::Add {
                section_id,
                name,
                text,
                code,
            } => topic::add(ctx, section_id, &name, &text, &code),
            TopicAction::Edit {
                id,
                name,
                text,
                code,
            } => topic::edit(ctx, id, name.as_deref(), text.as_deref(), code.as_deref()),
            TopicAction::Rm { id } => topic::remove(ctx, id),
            TopicAction::Show { id } => topic::show(ctx, id),
        },

        Command::HashPassword => hash_password::hash_password(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
