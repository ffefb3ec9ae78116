//! `remote`, `remote:url`, `remote:name` and `remote:add`.

use crate::api::ReleaseApi;
use crate::cli::OutputManager;
use crate::error::{CliError, Result};
use crate::git::GitOperations;
use crate::resolve::ReleaseResolver;

/// Show the remote bound to the app, or its Git URL
pub(super) async fn execute_remote<G: GitOperations, A: ReleaseApi>(
    resolver: &mut ReleaseResolver<'_, G, A>,
    output: &OutputManager,
) -> Result<i32> {
    let target = resolver.fetch_target().await?;
    output.println(&target);
    Ok(0)
}

/// Show the Git URL of the app
pub(super) async fn execute_url<G: GitOperations, A: ReleaseApi>(
    resolver: &mut ReleaseResolver<'_, G, A>,
    output: &OutputManager,
) -> Result<i32> {
    let url = resolver.git_url().await?;
    output.println(&url);
    Ok(0)
}

/// Show the remote bound to the app; fails when there is none
pub(super) async fn execute_name<G: GitOperations, A: ReleaseApi>(
    resolver: &mut ReleaseResolver<'_, G, A>,
    output: &OutputManager,
) -> Result<i32> {
    match resolver.remote_name().await? {
        Some(name) => {
            output.println(&name);
            Ok(0)
        }
        None => Err(CliError::NoRemote {
            app: resolver.app().to_string(),
        }
        .into()),
    }
}

/// Add a remote for the app unless one with that name already exists
pub(super) async fn execute_add<G: GitOperations, A: ReleaseApi>(
    resolver: &mut ReleaseResolver<'_, G, A>,
    output: &OutputManager,
    name: Option<&str>,
) -> Result<i32> {
    let name = name.unwrap_or(resolver.app()).to_string();
    let git = resolver.git();

    if git.remotes().await?.iter().any(|r| r.name == name) {
        log::info!("Remote {} already exists, leaving it alone", name);
        return Ok(0);
    }

    let url = resolver.git_url().await?;
    git.add_remote(&name, &url).await?;
    output.println(&format!("Git remote {} added", name));
    Ok(0)
}
