//! Platform Remote - Git remotes and release commits for platform apps.
//!
//! This binary resolves platform releases to Git commits and runs git against them.

use kodegen_platform_remote::cli;
use kodegen_platform_remote::cli::OutputManager;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            let output = OutputManager::default();
            output.error(&format!("Fatal error: {e}"));

            for suggestion in e.recovery_suggestions() {
                output.hint(&suggestion);
            }

            process::exit(e.exit_code());
        }
    }
}
