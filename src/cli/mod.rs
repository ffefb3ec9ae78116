//! Command line interface for kodegen_platform_remote.
//!
//! This module parses arguments, wires the git and API collaborators together
//! and runs the selected command.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
