//! `fetch [REFSPEC ...]`

use crate::api::ReleaseApi;
use crate::cli::OutputManager;
use crate::error::Result;
use crate::git::GitOperations;
use crate::resolve::ReleaseResolver;

/// Fetch from the app remote, or its URL into FETCH_HEAD when no remote is bound
pub(super) async fn execute_fetch<G: GitOperations, A: ReleaseApi>(
    resolver: &mut ReleaseResolver<'_, G, A>,
    output: &OutputManager,
    args: &[String],
) -> Result<i32> {
    let target = resolver.fetch_target().await?;

    let mut arguments = vec!["fetch".to_string(), target];
    arguments.extend(args.iter().cloned());

    output.command("git", &arguments);
    resolver.git().run(&arguments).await
}
