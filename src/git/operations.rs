//! Core Git operations trait and types for remote management.
//!
//! This module defines the GitOperations trait that specifies every Git
//! operation the commands need. The production implementation is provided by
//! the git_cli module which drives the system `git` binary.

use crate::error::Result;
use std::future::Future;

/// Trait defining all required Git operations
pub trait GitOperations {
    /// Resolve a revision to its full SHA
    ///
    /// Returns `Ok(None)` when the revision is not known locally.
    fn verify_commit(&self, revision: &str) -> impl Future<Output = Result<Option<String>>>;

    /// Fetch from a remote name or repository URL
    fn fetch(&self, remote: &str) -> impl Future<Output = Result<()>>;

    /// List configured remotes with their fetch URLs
    fn remotes(&self) -> impl Future<Output = Result<Vec<RemoteInfo>>>;

    /// Add a new remote
    fn add_remote(&self, name: &str, url: &str) -> impl Future<Output = Result<()>>;

    /// Run git with inherited stdio and return its exit status
    fn run(&self, args: &[String]) -> impl Future<Output = Result<i32>>;
}

/// Information about a Git remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    /// Remote name
    pub name: String,
    /// Fetch URL
    pub url: String,
}

impl RemoteInfo {
    /// Parse `git config --get-regexp '^remote\..*\.url$'` output
    ///
    /// Each line looks like `remote.<name>.url <url>`; remote names may contain dots.
    pub fn parse_config_lines(output: &str) -> Vec<RemoteInfo> {
        output
            .lines()
            .filter_map(|line| {
                let (key, url) = line.trim().split_once(char::is_whitespace)?;
                let name = key.strip_prefix("remote.")?.strip_suffix(".url")?;
                Some(RemoteInfo {
                    name: name.to_string(),
                    url: url.trim().to_string(),
                })
            })
            .collect()
    }
}
