//! `push [REFSPEC ...]`

use crate::api::ReleaseApi;
use crate::cli::OutputManager;
use crate::error::Result;
use crate::git::GitOperations;
use crate::resolve::ReleaseResolver;

const DEPLOY_BRANCH: &str = "master";

/// Push to the app remote and exit with git's status
pub(super) async fn execute_push<G: GitOperations, A: ReleaseApi>(
    resolver: &mut ReleaseResolver<'_, G, A>,
    output: &OutputManager,
    args: &[String],
    force: bool,
    dry_run: bool,
) -> Result<i32> {
    let target = resolver.fetch_target().await?;
    let arguments = push_arguments(&target, args, force, dry_run);
    output.command("git", &arguments);
    resolver.git().run(&arguments).await
}

/// Build `push <target> <refspec> [--dry-run] [--force] <rest>`
///
/// The refspec defaults to `HEAD`; `:master` is appended unless it already
/// names a destination or is really an option.
fn push_arguments(target: &str, args: &[String], force: bool, dry_run: bool) -> Vec<String> {
    let (refspec, rest) = match args.split_first() {
        Some((first, rest)) => (first.clone(), rest),
        None => ("HEAD".to_string(), args),
    };

    let refspec = if refspec.contains(':') || refspec.starts_with('-') {
        refspec
    } else {
        format!("{refspec}:{DEPLOY_BRANCH}")
    };

    let mut arguments = vec!["push".to_string(), target.to_string(), refspec];
    if dry_run {
        arguments.push("--dry-run".to_string());
    }
    if force {
        arguments.push("--force".to_string());
    }
    arguments.extend(rest.iter().cloned());
    arguments
}
