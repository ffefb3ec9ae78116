//! `sha [RELEASE]`

use crate::api::ReleaseApi;
use crate::cli::OutputManager;
use crate::error::Result;
use crate::git::GitOperations;
use crate::resolve::ReleaseResolver;

/// Print the full SHA of a release commit
///
/// When the commit cannot be found locally even after fetching, the short
/// commit from the API is printed and the command exits with status 1.
pub(super) async fn execute_sha<G: GitOperations, A: ReleaseApi>(
    resolver: &mut ReleaseResolver<'_, G, A>,
    output: &OutputManager,
    release: Option<&str>,
) -> Result<i32> {
    let commit = resolver.resolve_release_commit(release).await?;

    match resolver.git().verify_commit(&commit).await? {
        Some(sha) => {
            output.println(&sha);
            Ok(0)
        }
        None => {
            output.println(&commit);
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeGit, scenario_api};

    #[tokio::test]
    async fn test_sha_of_fetched_release() {
        let git = FakeGit::with_upstream();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        let status = execute_sha(&mut resolver, &OutputManager::default(), Some("v1"))
            .await
            .unwrap();
        assert_eq!(status, 0);
        assert_eq!(git.fetches.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_sha_unavailable_exits_one() {
        let git = FakeGit::default();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        let status = execute_sha(&mut resolver, &OutputManager::default(), None)
            .await
            .unwrap();
        assert_eq!(status, 1);
    }
}
