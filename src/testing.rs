//! In-memory fakes of the git and API seams for unit tests.

use crate::api::ReleaseApi;
use crate::error::{ApiError, GitError, Result};
use crate::git::{GitOperations, RemoteInfo};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub(crate) const FULL_A: &str = "aaaa111000000000000000000000000000000000";
pub(crate) const FULL_B: &str = "bbbb222000000000000000000000000000000000";

/// Git double: commits become "local" once fetched
#[derive(Default)]
pub(crate) struct FakeGit {
    /// Short ref → full SHA, known locally
    pub local: RefCell<HashMap<String, String>>,
    /// Short ref → full SHA, known after a fetch
    pub upstream: HashMap<String, String>,
    pub remotes: RefCell<Vec<RemoteInfo>>,
    pub fetches: RefCell<Vec<String>>,
    pub runs: RefCell<Vec<Vec<String>>>,
    pub remote_listings: Cell<usize>,
    pub fail_fetch: Option<i32>,
    pub run_status: i32,
}

impl FakeGit {
    /// Commits of [`scenario_api`] reachable only after a fetch
    pub fn with_upstream() -> Self {
        Self {
            upstream: scenario_commits(),
            ..Self::default()
        }
    }

    /// Commits of [`scenario_api`] already present locally
    pub fn with_local() -> Self {
        Self {
            local: RefCell::new(scenario_commits()),
            ..Self::default()
        }
    }

    pub fn with_remote(self, name: &str, url: &str) -> Self {
        self.remotes.borrow_mut().push(RemoteInfo {
            name: name.to_string(),
            url: url.to_string(),
        });
        self
    }
}

impl GitOperations for FakeGit {
    async fn verify_commit(&self, revision: &str) -> Result<Option<String>> {
        Ok(self.local.borrow().get(revision).cloned())
    }

    async fn fetch(&self, remote: &str) -> Result<()> {
        if let Some(status) = self.fail_fetch {
            return Err(GitError::CommandFailed {
                command: format!("fetch {remote}"),
                status,
            }
            .into());
        }
        self.fetches.borrow_mut().push(remote.to_string());
        self.local.borrow_mut().extend(self.upstream.clone());
        Ok(())
    }

    async fn remotes(&self) -> Result<Vec<RemoteInfo>> {
        self.remote_listings.set(self.remote_listings.get() + 1);
        Ok(self.remotes.borrow().clone())
    }

    async fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.remotes.borrow_mut().push(RemoteInfo {
            name: name.to_string(),
            url: url.to_string(),
        });
        Ok(())
    }

    async fn run(&self, args: &[String]) -> Result<i32> {
        self.runs.borrow_mut().push(args.to_vec());
        Ok(self.run_status)
    }
}

/// API double serving a fixed release list
pub(crate) struct FakeApi {
    releases: Vec<(&'static str, &'static str)>,
    pub lookups: Cell<usize>,
    pub url_lookups: Cell<usize>,
}

impl FakeApi {
    pub fn new(releases: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            releases,
            lookups: Cell::new(0),
            url_lookups: Cell::new(0),
        }
    }
}

impl ReleaseApi for FakeApi {
    async fn release_commit(&self, app: &str, release: Option<&str>) -> Result<String> {
        self.lookups.set(self.lookups.get() + 1);
        let found = match release {
            None => self.releases.last(),
            Some(name) => self.releases.iter().find(|(n, _)| *n == name),
        };
        match (found, release) {
            (Some((_, commit)), _) => Ok(commit.to_string()),
            (None, None) => Err(ApiError::NoReleases {
                app: app.to_string(),
            }
            .into()),
            (None, Some(name)) => Err(ApiError::ReleaseNotFound {
                app: app.to_string(),
                release: name.to_string(),
            }
            .into()),
        }
    }

    async fn git_url(&self, app: &str) -> Result<String> {
        self.url_lookups.set(self.url_lookups.get() + 1);
        Ok(format!("git@heroku.com:{app}.git"))
    }
}

/// `v1 → aaaa111`, `v2 → bbbb222`
pub(crate) fn scenario_api() -> FakeApi {
    FakeApi::new(vec![("v1", "aaaa111"), ("v2", "bbbb222")])
}

fn scenario_commits() -> HashMap<String, String> {
    HashMap::from([
        ("aaaa111".to_string(), FULL_A.to_string()),
        ("bbbb222".to_string(), FULL_B.to_string()),
    ])
}
