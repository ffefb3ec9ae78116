//! `checkout [RELEASE] [...]`

use crate::api::ReleaseApi;
use crate::error::Result;
use crate::git::GitOperations;
use crate::resolve::{ReleaseResolver, TokenKind};

/// Check out a release commit, the latest one unless a release is named
pub(super) async fn execute_checkout<G: GitOperations, A: ReleaseApi>(
    resolver: &mut ReleaseResolver<'_, G, A>,
    args: &[String],
) -> Result<i32> {
    let (release, rest) = split_release(args);
    let commit = resolver.resolve_release_commit(release.as_deref()).await?;

    let mut arguments = vec!["checkout".to_string(), commit];
    arguments.extend(rest);
    resolver.git().run(&arguments).await
}

/// Take the first release name out of the arguments
fn split_release(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut release = None;
    let mut rest = Vec::with_capacity(args.len());

    for arg in args {
        if release.is_none() && TokenKind::classify(arg) == TokenKind::Release {
            release = Some(arg.clone());
        } else {
            rest.push(arg.clone());
        }
    }

    (release, rest)
}
