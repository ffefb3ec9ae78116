//! Remote bindings between local Git remotes and platform apps.
//!
//! A remote is bound to an app when its URL points at the platform Git host,
//! e.g. `git@heroku.com:shop.git` or `https://git.heroku.com/shop.git`.

use crate::error::{CliError, Result};
use crate::git::RemoteInfo;
use regex::Regex;

/// Remote name → app mapping read from the local Git configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteBindings {
    entries: Vec<(String, String)>,
}

impl RemoteBindings {
    /// Build bindings from configured remotes, keeping those on `git_host`
    pub fn from_remotes(remotes: &[RemoteInfo], git_host: &str) -> Self {
        let pattern = app_url_pattern(git_host);
        let entries = remotes
            .iter()
            .filter_map(|remote| {
                let app = pattern
                    .as_ref()
                    .and_then(|re| re.captures(&remote.url))
                    .and_then(|caps| caps.name("app"))?;
                Some((remote.name.clone(), app.as_str().to_string()))
            })
            .collect();

        Self { entries }
    }

    /// Remote bound to `app`
    ///
    /// When several remotes point at the same app the last configured one wins.
    pub fn remote_for_app(&self, app: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(_, bound)| bound == app)
            .map(|(remote, _)| remote.as_str())
    }

    /// App bound to `remote`
    pub fn app_for_remote(&self, remote: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == remote)
            .map(|(_, app)| app.as_str())
    }

    /// Distinct apps bound in this repository, in configuration order
    pub fn apps(&self) -> Vec<&str> {
        let mut apps: Vec<&str> = Vec::new();
        for (_, app) in &self.entries {
            if !apps.contains(&app.as_str()) {
                apps.push(app);
            }
        }
        apps
    }
}

fn app_url_pattern(git_host: &str) -> Option<Regex> {
    let host = regex::escape(git_host);
    let pattern = format!(
        r"^(?:git@(?:git\.)?{host}:|(?:https?|ssh)://(?:[^@/]+@)?(?:git\.)?{host}/)(?P<app>[\w.-]+?)(?:\.git)?/?$"
    );
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Ignoring remotes: cannot match git host '{}': {}", git_host, e);
            None
        }
    }
}

/// Determine the app this invocation operates on
///
/// Order: explicit app, then the app bound to `remote`, then the only app
/// bound in the repository.
pub fn resolve_app(
    explicit: Option<&str>,
    remote: Option<&str>,
    bindings: &RemoteBindings,
) -> Result<String> {
    if let Some(app) = explicit.filter(|a| !a.is_empty()) {
        return Ok(app.to_string());
    }

    if let Some(remote) = remote {
        return bindings
            .app_for_remote(remote)
            .map(str::to_string)
            .ok_or_else(|| {
                CliError::UnknownRemote {
                    remote: remote.to_string(),
                }
                .into()
            });
    }

    match bindings.apps().as_slice() {
        [app] => Ok(app.to_string()),
        [] => Err(CliError::NoAppSpecified.into()),
        apps => Err(CliError::AmbiguousApp {
            apps: apps.iter().map(|a| a.to_string()).collect(),
        }
        .into()),
    }
}
