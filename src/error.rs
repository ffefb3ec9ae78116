//! Error types for platform remote operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use thiserror::Error;

/// Result type alias for platform remote operations
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Main error type for all platform remote operations
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Platform API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Git operation errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors reported by the platform API backends
#[derive(Error, Debug)]
pub enum ApiError {
    /// App has no releases at all
    #[error("No releases found for app '{app}'")]
    NoReleases {
        /// App identifier
        app: String,
    },

    /// Named release does not exist
    #[error("Release '{release}' not found for app '{app}'")]
    ReleaseNotFound {
        /// App identifier
        app: String,
        /// Release name
        release: String,
    },

    /// App does not exist or is not accessible
    #[error("App '{app}' not found")]
    AppNotFound {
        /// App identifier
        app: String,
    },

    /// Release exists but carries no commit
    #[error("Release '{release}' of app '{app}' has no commit")]
    MissingCommit {
        /// App identifier
        app: String,
        /// Release name
        release: String,
    },

    /// Credentials were rejected
    #[error("Invalid credentials for {host}. Set PLATFORM_API_KEY or add it to ~/.netrc")]
    Unauthorized {
        /// API host
        host: String,
    },

    /// Any other unexpected HTTP status
    #[error("Unexpected response {status} from {url}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Slug referenced by a release does not exist
    #[error("Slug '{slug}' of app '{app}' not found")]
    SlugNotFound {
        /// App identifier
        app: String,
        /// Slug identifier
        slug: String,
    },

    /// Client could not be constructed
    #[error("Failed to initialize API client: {reason}")]
    ClientInit {
        /// Reason for the error
        reason: String,
    },
}

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Git binary not found on PATH
    #[error("Git executable not found on PATH. Please install git.")]
    NotInstalled,

    /// Git ran and exited with a non-zero status
    #[error("git {command} exited with status {status}")]
    CommandFailed {
        /// Subcommand line that failed
        command: String,
        /// Exit status reported by git
        status: i32,
    },

    /// Git could not be spawned or was killed by a signal
    #[error("Failed to run git {command}: {reason}")]
    SpawnFailed {
        /// Subcommand line that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// No app could be determined for this invocation
    #[error("No app specified. Run this command from an app folder or specify which app to use with --app APP.")]
    NoAppSpecified,

    /// Several remotes point at different apps
    #[error("Multiple apps in folder and no app specified: {apps:?}")]
    AmbiguousApp {
        /// Candidate apps
        apps: Vec<String>,
    },

    /// --remote names a remote that is not bound to any app
    #[error("Remote '{remote}' is not bound to an app")]
    UnknownRemote {
        /// Remote name
        remote: String,
    },

    /// App has no Git remote in this repository
    #[error("No remote for application {app}")]
    NoRemote {
        /// App identifier
        app: String,
    },

    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl RemoteError {
    /// Process exit code this error should terminate with
    ///
    /// A failed git subprocess hands its own status through; everything else exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            RemoteError::Git(GitError::CommandFailed { status, .. }) if *status != 0 => *status,
            _ => 1,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            RemoteError::Cli(CliError::NoAppSpecified) => vec![
                "Pass the app explicitly: --app APP".to_string(),
                "Or export PLATFORM_APP=APP".to_string(),
                "Or add a remote for it: remote:add --app APP".to_string(),
            ],
            RemoteError::Cli(CliError::AmbiguousApp { apps }) => vec![
                format!("Pick one of: {}", apps.join(", ")),
                "Use --remote NAME to select the app bound to a remote".to_string(),
            ],
            RemoteError::Api(ApiError::Unauthorized { host }) => vec![
                "Export PLATFORM_API_KEY with a valid API key".to_string(),
                format!("Or add 'machine {host} login <email> password <key>' to ~/.netrc"),
            ],
            RemoteError::Api(ApiError::NoReleases { .. }) => {
                vec!["Deploy the app at least once before resolving releases".to_string()]
            }
            RemoteError::Git(GitError::NotInstalled) => {
                vec!["Install git and make sure it is on PATH".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_status_becomes_exit_code() {
        let err = RemoteError::from(GitError::CommandFailed {
            command: "fetch origin".to_string(),
            status: 128,
        });
        assert_eq!(err.exit_code(), 128);
    }

    #[test]
    fn test_api_errors_exit_one() {
        let err = RemoteError::from(ApiError::NoReleases {
            app: "demo".to_string(),
        });
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "API error: No releases found for app 'demo'");
    }

    #[test]
    fn test_invalid_arguments_message() {
        let err = RemoteError::from(CliError::InvalidArguments {
            reason: "--app must not be empty".to_string(),
        });
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "CLI error: Invalid arguments: --app must not be empty");
    }
}
