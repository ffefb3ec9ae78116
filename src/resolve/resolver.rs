//! Release-to-commit resolution.
//!
//! [`ReleaseResolver`] turns release tokens into revisions git understands:
//! the release is looked up through the active API backend, and its commit is
//! fetched from the app's repository when it is not available locally. At most
//! one fetch happens per invocation.

use super::{InvocationContext, RevisionRange, TokenKind};
use crate::api::ReleaseApi;
use crate::error::Result;
use crate::git::GitOperations;
use crate::remote::RemoteBindings;

/// Resolves release tokens for one app during one command invocation
#[derive(Debug)]
pub struct ReleaseResolver<'a, G, A> {
    git: &'a G,
    api: &'a A,
    app: String,
    git_host: String,
    context: InvocationContext,
}

impl<'a, G: GitOperations, A: ReleaseApi> ReleaseResolver<'a, G, A> {
    /// Create a resolver for `app`
    pub fn new(git: &'a G, api: &'a A, app: impl Into<String>, git_host: impl Into<String>) -> Self {
        Self {
            git,
            api,
            app: app.into(),
            git_host: git_host.into(),
            context: InvocationContext::new(),
        }
    }

    /// Replace the invocation context, e.g. to reuse bindings already read
    pub fn with_context(mut self, context: InvocationContext) -> Self {
        self.context = context;
        self
    }

    /// App this resolver works on
    pub fn app(&self) -> &str {
        &self.app
    }

    /// Git operations backing this resolver
    pub fn git(&self) -> &'a G {
        self.git
    }

    /// Current invocation state
    pub fn context(&self) -> &InvocationContext {
        &self.context
    }

    /// Resolve a release token to a commit reference
    ///
    /// `None` and `""` both mean the latest release. Tokens that are not
    /// release names come back unchanged without touching the API or git.
    pub async fn resolve_release_commit(&mut self, token: Option<&str>) -> Result<String> {
        let token = token.unwrap_or("");
        let kind = TokenKind::classify(token);
        if !kind.is_resolvable() {
            return Ok(token.to_string());
        }

        let release = (kind == TokenKind::Release).then_some(token);
        let commit = self.api.release_commit(&self.app, release).await?;
        log::debug!(
            "{} of {} is commit {}",
            release.unwrap_or("latest release"),
            self.app,
            commit
        );

        self.materialize(commit).await
    }

    /// Resolve both sides of a range, keeping the separator verbatim
    pub async fn resolve_range(&mut self, range: &RevisionRange<'_>) -> Result<String> {
        let left = self.resolve_release_commit(Some(range.left)).await?;
        let right = self.resolve_release_commit(Some(range.right)).await?;
        Ok(format!("{}{}{}", left, range.separator, right))
    }

    /// Make sure `commit` is usable locally, fetching once per invocation if needed
    ///
    /// Returns the full SHA when git knows the commit, otherwise `commit` unchanged.
    pub async fn materialize(&mut self, commit: String) -> Result<String> {
        if let Some(sha) = self.git.verify_commit(&commit).await? {
            return Ok(sha);
        }

        if self.context.fetched {
            log::debug!("{} still unknown, already fetched this run", commit);
            return Ok(commit);
        }

        let target = self.fetch_target().await?;
        self.git.fetch(&target).await?;
        self.context.fetched = true;

        match self.git.verify_commit(&commit).await? {
            Some(sha) => Ok(sha),
            None => {
                log::warn!("{} is not available after fetching {}", commit, target);
                Ok(commit)
            }
        }
    }

    /// Remote bound to the app, if any
    pub async fn remote_name(&mut self) -> Result<Option<String>> {
        if let Some(name) = &self.context.remote_name {
            return Ok(name.clone());
        }

        if self.context.bindings.is_none() {
            let remotes = self.git.remotes().await?;
            self.context.bindings = Some(RemoteBindings::from_remotes(&remotes, &self.git_host));
        }

        let name = self
            .context
            .bindings
            .as_ref()
            .and_then(|bindings| bindings.remote_for_app(&self.app))
            .map(str::to_string);
        self.context.remote_name = Some(name.clone());
        Ok(name)
    }

    /// Repository URL of the app
    pub async fn git_url(&mut self) -> Result<String> {
        if let Some(url) = &self.context.git_url {
            return Ok(url.clone());
        }

        let url = self.api.git_url(&self.app).await?;
        self.context.git_url = Some(url.clone());
        Ok(url)
    }

    /// Bound remote name, or the repository URL when no remote is bound
    pub async fn fetch_target(&mut self) -> Result<String> {
        match self.remote_name().await? {
            Some(name) => Ok(name),
            None => self.git_url().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::RemoteInfo;
    use crate::testing::{FULL_A, FULL_B, FakeApi, FakeGit, scenario_api};

    #[tokio::test]
    async fn test_latest_release_is_last_in_list() {
        let git = FakeGit::with_upstream();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        assert_eq!(resolver.resolve_release_commit(None).await.unwrap(), FULL_B);
        assert_eq!(resolver.resolve_release_commit(Some("")).await.unwrap(), FULL_B);
    }

    #[tokio::test]
    async fn test_opaque_tokens_pass_through_untouched() {
        let git = FakeGit::default();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        for token in ["master", "a..b", "-n", "deadbeef"] {
            assert_eq!(resolver.resolve_release_commit(Some(token)).await.unwrap(), token);
        }
        assert_eq!(api.lookups.get(), 0);
        assert!(git.fetches.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_local_commit_needs_no_fetch() {
        let git = FakeGit::with_local();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        assert_eq!(resolver.resolve_release_commit(Some("v1")).await.unwrap(), FULL_A);
        assert!(git.fetches.borrow().is_empty());
        assert!(!resolver.context().has_fetched());
    }

    #[tokio::test]
    async fn test_fetches_at_most_once_per_invocation() {
        // Nothing is ever available: every resolution would want a fetch
        let git = FakeGit::default();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        assert_eq!(resolver.resolve_release_commit(Some("v1")).await.unwrap(), "aaaa111");
        assert_eq!(resolver.resolve_release_commit(Some("v2")).await.unwrap(), "bbbb222");
        assert_eq!(resolver.resolve_release_commit(None).await.unwrap(), "bbbb222");

        assert_eq!(git.fetches.borrow().len(), 1);
        assert!(resolver.context().has_fetched());
    }

    #[tokio::test]
    async fn test_fetch_uses_git_url_without_bound_remote() {
        let git = FakeGit::with_upstream().with_remote("origin", "git@github.com:acme/shop.git");
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        assert_eq!(resolver.resolve_release_commit(Some("v1")).await.unwrap(), FULL_A);
        assert_eq!(*git.fetches.borrow(), vec!["git@heroku.com:shop.git".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_prefers_bound_remote() {
        let git = FakeGit::with_upstream().with_remote("production", "https://git.heroku.com/shop.git");
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        resolver.resolve_release_commit(None).await.unwrap();
        assert_eq!(*git.fetches.borrow(), vec!["production".to_string()]);
        assert_eq!(api.url_lookups.get(), 0);
    }

    #[tokio::test]
    async fn test_unresolvable_after_fetch_returns_raw_commit() {
        let git = FakeGit::default();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        let commit = resolver.resolve_release_commit(Some("v2")).await.unwrap();
        assert_eq!(commit, "bbbb222");
        assert_eq!(git.fetches.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_idempotent_within_invocation() {
        let git = FakeGit::with_upstream();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        let first = resolver.resolve_release_commit(Some("v1")).await.unwrap();
        let second = resolver.resolve_release_commit(Some("v1")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(git.fetches.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_range_resolves_each_side() {
        let git = FakeGit::with_local();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        let range = RevisionRange::parse("v1..v2").unwrap();
        assert_eq!(
            resolver.resolve_range(&range).await.unwrap(),
            format!("{FULL_A}..{FULL_B}")
        );

        let range = RevisionRange::parse("v1...master").unwrap();
        assert_eq!(
            resolver.resolve_range(&range).await.unwrap(),
            format!("{FULL_A}...master")
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_is_fatal() {
        let git = FakeGit::default();
        let api = FakeApi::new(Vec::new());
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        assert!(resolver.resolve_release_commit(None).await.is_err());
        assert!(resolver.resolve_release_commit(Some("v3")).await.is_err());
        assert!(git.fetches.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_git_status() {
        let git = FakeGit {
            fail_fetch: Some(128),
            ..FakeGit::default()
        };
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        let err = resolver.resolve_release_commit(None).await.unwrap_err();
        assert_eq!(err.exit_code(), 128);
    }

    #[tokio::test]
    async fn test_remote_lookups_are_memoized() {
        let git = FakeGit::default();
        let api = scenario_api();
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com");

        assert_eq!(resolver.remote_name().await.unwrap(), None);
        assert_eq!(resolver.remote_name().await.unwrap(), None);
        resolver.git_url().await.unwrap();
        resolver.git_url().await.unwrap();

        assert_eq!(git.remote_listings.get(), 1);
        assert_eq!(api.url_lookups.get(), 1);
    }

    #[tokio::test]
    async fn test_seeded_bindings_skip_remote_listing() {
        let git = FakeGit::default();
        let api = scenario_api();
        let bindings = RemoteBindings::from_remotes(
            &[RemoteInfo {
                name: "heroku".to_string(),
                url: "git@heroku.com:shop.git".to_string(),
            }],
            "heroku.com",
        );
        let mut resolver = ReleaseResolver::new(&git, &api, "shop", "heroku.com")
            .with_context(InvocationContext::new().with_bindings(bindings));

        assert_eq!(resolver.remote_name().await.unwrap(), Some("heroku".to_string()));
        assert_eq!(git.remote_listings.get(), 0);
    }
}
