//! lbrmeta CLI entry point
//!
//! Parses arguments, runs the batch, and turns run-level errors into a
//! colored message and exit code 1.

use anyhow::Result;
use clap::Parser;
use lbrmeta::cli;
use lbrmeta::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
