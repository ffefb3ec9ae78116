//! Command execution.
//!
//! Each invocation reads the remote bindings once, settles on an app and an
//! API backend, then hands a single [`ReleaseResolver`] to the command so every
//! lookup in the run shares the same cached state.

mod checkout;
mod fetch;
mod log;
mod push;
mod remote;
mod sha;

use crate::api::{ApiBackend, ReleaseApi};
use crate::cli::{Args, Command, OutputManager};
use crate::config::PlatformConfig;
use crate::error::Result;
use crate::git::{GitCli, GitOperations};
use crate::remote::{RemoteBindings, resolve_app};
use crate::resolve::{InvocationContext, ReleaseResolver};

use checkout::execute_checkout;
use fetch::execute_fetch;
use self::log::execute_log;
use push::execute_push;
use remote::{execute_add, execute_name, execute_remote, execute_url};
use sha::execute_sha;

/// Execute the command selected by `args` and return the process exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    let output = OutputManager::default();

    if let Err(validation_error) = args.validate() {
        output.error(&validation_error.to_string());
        return Ok(1);
    }

    match prepare_and_run(&args, &output).await {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            output.error(&format!("Command '{}' failed: {}", args.command.name(), e));
            for suggestion in e.recovery_suggestions() {
                output.hint(&suggestion);
            }
            Ok(e.exit_code())
        }
    }
}

async fn prepare_and_run(args: &Args, output: &OutputManager) -> Result<i32> {
    let config = PlatformConfig::from_env();
    let git = GitCli::new()?;

    let remotes = git.remotes().await?;
    let bindings = RemoteBindings::from_remotes(&remotes, &config.git_host);
    let app = resolve_app(args.app.as_deref(), args.remote.as_deref(), &bindings)?;

    let api = ApiBackend::select(&config)?;
    ::log::debug!("Running {} for {} with the {} API", args.command.name(), app, api.name());

    let mut resolver = ReleaseResolver::new(&git, &api, app, config.git_host.clone())
        .with_context(InvocationContext::new().with_bindings(bindings));

    run(&args.command, &mut resolver, output).await
}

/// Dispatch one command against a prepared resolver
pub async fn run<G: GitOperations, A: ReleaseApi>(
    command: &Command,
    resolver: &mut ReleaseResolver<'_, G, A>,
    output: &OutputManager,
) -> Result<i32> {
    match command {
        Command::Remote => execute_remote(resolver, output).await,
        Command::Url => execute_url(resolver, output).await,
        Command::Name => execute_name(resolver, output).await,
        Command::Add { name } => execute_add(resolver, output, name.as_deref()).await,
        Command::Sha { release } => execute_sha(resolver, output, release.as_deref()).await,
        Command::Push {
            force,
            dry_run,
            args,
        } => execute_push(resolver, output, args, *force, *dry_run).await,
        Command::Fetch { args } => execute_fetch(resolver, output, args).await,
        Command::Log { args } => execute_log(resolver, args).await,
        Command::Checkout { args } => execute_checkout(resolver, args).await,
    }
}
