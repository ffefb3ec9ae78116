//! GitOperations implementation backed by the system `git` binary.
//!
//! Every call shells out through [`tokio::process::Command`] and blocks the
//! command until git exits.

use crate::error::{GitError, Result};
use crate::git::{GitOperations, RemoteInfo};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;

/// Git operations using the git executable found on PATH
#[derive(Debug, Clone)]
pub struct GitCli {
    git: PathBuf,
    work_dir: Option<PathBuf>,
}

impl GitCli {
    /// Locate git on PATH
    pub fn new() -> Result<Self> {
        let git = which::which("git").map_err(|_| GitError::NotInstalled)?;
        log::debug!("Using git at {}", git.display());
        Ok(Self {
            git,
            work_dir: None,
        })
    }

    /// Run every git invocation inside `dir` instead of the current directory
    pub fn with_work_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.work_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.git);
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run git with captured output; a non-zero status is not an error here
    async fn capture(&self, args: &[&str]) -> Result<Output> {
        let line = args.join(" ");
        log::debug!("git {}", line);

        self.command()
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                GitError::SpawnFailed {
                    command: line,
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Run git with captured output and fail on a non-zero status
    async fn checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.capture(args).await?;
        if output.status.success() {
            return Ok(output);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        log::warn!("git {} failed: {}", args.join(" "), stderr.trim());
        Err(GitError::CommandFailed {
            command: args.join(" "),
            status: output.status.code().unwrap_or(1),
        }
        .into())
    }
}

impl GitOperations for GitCli {
    async fn verify_commit(&self, revision: &str) -> Result<Option<String>> {
        let output = self
            .capture(&["rev-parse", "--quiet", "--verify", revision])
            .await?;

        let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !output.status.success() || sha.is_empty() {
            log::debug!("{} is not available locally", revision);
            return Ok(None);
        }

        Ok(Some(sha))
    }

    async fn fetch(&self, remote: &str) -> Result<()> {
        log::info!("Fetching {}", remote);
        self.checked(&["fetch", remote]).await?;
        Ok(())
    }

    async fn remotes(&self) -> Result<Vec<RemoteInfo>> {
        let output = self
            .capture(&["config", "--get-regexp", r"^remote\..*\.url$"])
            .await?;

        // Exit 1 means no remote has a URL configured
        match output.status.code() {
            Some(0) => Ok(RemoteInfo::parse_config_lines(&String::from_utf8_lossy(
                &output.stdout,
            ))),
            Some(1) => Ok(Vec::new()),
            status => Err(GitError::CommandFailed {
                command: "config --get-regexp".to_string(),
                status: status.unwrap_or(1),
            }
            .into()),
        }
    }

    async fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.checked(&["remote", "add", name, url]).await?;
        Ok(())
    }

    async fn run(&self, args: &[String]) -> Result<i32> {
        let line = args.join(" ");
        log::debug!("git {} (interactive)", line);

        let status = self
            .command()
            .args(args)
            .status()
            .await
            .map_err(|e| GitError::SpawnFailed {
                command: line.clone(),
                reason: e.to_string(),
            })?;

        match status.code() {
            Some(code) => Ok(code),
            None => Err(GitError::SpawnFailed {
                command: line,
                reason: "terminated by signal".to_string(),
            }
            .into()),
        }
    }
}
