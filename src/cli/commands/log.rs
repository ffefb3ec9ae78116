//! `log [...]`
//!
//! Not to be confused with the platform's application logs.

use crate::api::ReleaseApi;
use crate::error::Result;
use crate::git::GitOperations;
use crate::resolve::{ReleaseResolver, RevisionRange, TokenKind};

/// Run git log with release names translated to commits
pub(super) async fn execute_log<G: GitOperations, A: ReleaseApi>(
    resolver: &mut ReleaseResolver<'_, G, A>,
    args: &[String],
) -> Result<i32> {
    let mut arguments = vec!["log".to_string()];
    arguments.extend(translate_log_args(resolver, args).await?);
    resolver.git().run(&arguments).await
}

/// Replace release names and ranges with commits
///
/// Options and bare `..` / `...` are left alone. When no argument names a
/// release or a range, the latest release is put in front.
pub(super) async fn translate_log_args<G: GitOperations, A: ReleaseApi>(
    resolver: &mut ReleaseResolver<'_, G, A>,
    args: &[String],
) -> Result<Vec<String>> {
    let mut found = false;
    let mut translated = Vec::with_capacity(args.len() + 1);

    for arg in args {
        if arg.starts_with('-') || arg == ".." || arg == "..." {
            translated.push(arg.clone());
        } else if let Some(range) = RevisionRange::parse(arg) {
            found = true;
            translated.push(resolver.resolve_range(&range).await?);
        } else if TokenKind::classify(arg) == TokenKind::Release {
            found = true;
            translated.push(resolver.resolve_release_commit(Some(arg)).await?);
        } else {
            translated.push(arg.clone());
        }
    }

    if !found {
        translated.insert(0, resolver.resolve_release_commit(None).await?);
    }

    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FULL_A, FULL_B, FakeGit, scenario_api};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_latest_release_prepended() {
        let git = FakeGit::with_local();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        let args = translate_log_args(&mut resolver, &strings(&["-p", "master"]))
            .await
            .unwrap();
        assert_eq!(args, strings(&[FULL_B, "-p", "master"]));
    }

    #[tokio::test]
    async fn test_release_and_range_translated() {
        let git = FakeGit::with_local();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        let args = translate_log_args(&mut resolver, &strings(&["--oneline", "v1...v2", "..", "v1"]))
            .await
            .unwrap();
        assert_eq!(
            args,
            vec![
                "--oneline".to_string(),
                format!("{FULL_A}...{FULL_B}"),
                "..".to_string(),
                FULL_A.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_open_range_side_means_latest() {
        let git = FakeGit::with_local();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        let args = translate_log_args(&mut resolver, &strings(&["v1.."]))
            .await
            .unwrap();
        assert_eq!(args, vec![format!("{FULL_A}..{FULL_B}")]);
    }

    #[tokio::test]
    async fn test_plain_range_counts_as_found() {
        let git = FakeGit::default();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        let args = translate_log_args(&mut resolver, &strings(&["origin/main..HEAD"]))
            .await
            .unwrap();
        assert_eq!(args, strings(&["origin/main..HEAD"]));
        assert_eq!(api.lookups.get(), 0);
    }

    #[tokio::test]
    async fn test_log_runs_git_log() {
        let git = FakeGit::with_local();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        execute_log(&mut resolver, &strings(&["v1"])).await.unwrap();
        assert_eq!(git.runs.borrow()[0], strings(&["log", FULL_A]));
    }
}
