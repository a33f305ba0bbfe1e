//! coursetree binary entry point

use std::process::ExitCode;

use coursetree::repo::CatalogError;
use coursetree::ui::output;

fn main() -> ExitCode {
    match coursetree::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            if err
                .downcast_ref::<CatalogError>()
                .is_some_and(CatalogError::is_retryable)
            {
                output::error("The data file is busy or unreadable. Try again shortly.");
            }
            ExitCode::FAILURE
        }
    }
}
