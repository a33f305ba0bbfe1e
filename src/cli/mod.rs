//! cli
//!
//! Command-line interface layer for coursetree.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and initialise logging (stderr, plus rotating
//!   files when `log_dir` is configured)
//! - Gate mutating commands on admin credentials
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It checks credentials, merges omitted edit fields
//! with current values, and calls the [`crate::repo`] operations. All catalogue state changes flow
//! through the repository.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::Path;

use anyhow::{Context as _, Result};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::core::config::Config;

/// Prefix of the rotating log files written under `log_dir`.
const LOG_FILE_PREFIX: &str = "coursetree";

/// Rotated log files kept before the oldest is removed.
const LOG_FILES_KEPT: usize = 5;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config = Config::load().context("Failed to load configuration")?;
    init_logging(cli.debug, config.log_filter(), config.log_dir());

    let ctx = commands::Context::from_cli(&cli, config);
    commands::dispatch(cli.command, &ctx)
}

/// Install the tracing subscriber.
///
/// Stderr follows `RUST_LOG`, else `--debug`, else the configured default
/// filter. With a `log_dir`, everything at debug and above also goes to a
/// daily rotating file there.
fn init_logging(debug: bool, default_filter: &str, log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(default_filter)
        }
    });

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    let (file_layer, file_error) = match log_dir.map(file_appender) {
        Some(Ok(appender)) => {
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(appender)
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), None)
        }
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if let Some(e) = file_error {
        tracing::warn!(error = %e, "file logging disabled");
    }
}

fn file_appender(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(LOG_FILES_KEPT)
        .build(dir)
}
