//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--data <path>`: Catalogue document to use
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--no-interactive`: Never prompt
//! - `--user <name>`: Admin user name for mutating commands

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// coursetree - a catalogue of subjects, sections and topics
#[derive(Parser, Debug)]
#[command(name = "coursetree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalogue document (overrides config and COURSETREE_DATA)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    /// Admin user name (defaults to COURSETREE_ADMIN_USER)
    #[arg(long, global = true, value_name = "NAME")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Interactive unless `--no-interactive` or `--quiet` was set, and only
    /// when stdin is a terminal.
    pub fn interactive(&self) -> bool {
        !(self.no_interactive || self.quiet) && std::io::stdin().is_terminal()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every subject with its sections and topics
    #[command(
        name = "list",
        after_help = "\
EXAMPLES:
    # Browse the catalogue
    coursetree list

    # Machine-readable output
    coursetree list --json"
    )]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one subject by name
    #[command(name = "show")]
    Show {
        /// Exact subject name
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage subjects
    #[command(name = "subject")]
    Subject {
        #[command(subcommand)]
        action: SubjectAction,
    },

    /// Manage sections
    #[command(name = "section")]
    Section {
        #[command(subcommand)]
        action: SectionAction,
    },

    /// Manage topics
    #[command(name = "topic")]
    Topic {
        #[command(subcommand)]
        action: TopicAction,
    },

    /// Print a password hash for the [admin] config table
    #[command(
        name = "hash-password",
        long_about = "Print a salted PBKDF2-SHA256 password hash for the admin account.\n\n\
            Reads the password from COURSETREE_ADMIN_PASSWORD, or prompts for it \
            without echo. Paste the output into the password_hash key of the \
            [admin] table in the config file."
    )]
    HashPassword,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    coursetree completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    coursetree completion zsh >> ~/.zshrc"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Subject subcommands.
#[derive(Subcommand, Debug)]
pub enum SubjectAction {
    /// Create a subject
    Add {
        name: String,
        #[arg(long, short, default_value = "")]
        description: String,
    },
    /// Rename a subject or change its description
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, short)]
        description: Option<String>,
    },
    /// Delete an empty subject
    Rm { id: u64 },
    /// Report whether a subject has sections
    Check { id: u64 },
}

/// Section subcommands.
#[derive(Subcommand, Debug)]
pub enum SectionAction {
    /// Create a section in a subject
    Add { subject_id: u64, name: String },
    /// Rename a section
    Edit { id: u64, name: String },
    /// Delete an empty section
    Rm { id: u64 },
    /// Report whether a section has topics
    Check { id: u64 },
}

/// Topic subcommands.
#[derive(Subcommand, Debug)]
pub enum TopicAction {
    /// Create a topic in a section
    Add {
        section_id: u64,
        name: String,
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long, default_value = "")]
        code: String,
    },
    /// Change a topic's name, text or code
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        code: Option<String>,
    },
    /// Delete a topic
    Rm { id: u64 },
    /// Show a topic's text and code
    Show { id: u64 },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
