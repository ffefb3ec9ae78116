//! # Platform Remote
//!
//! Git remotes and release-to-commit resolution for apps on a hosted
//! application platform.
//!
//! Release names such as `v42` are translated into the commit they deployed so
//! ordinary git commands can work on deployed code. Commits missing from the
//! local repository are fetched from the app repository, at most once per
//! command.
//!
//! ## Features
//!
//! - **Release Resolution**: latest or named release to commit, through either
//!   the legacy REST API or the platform API (slug lookups)
//! - **Remote Bindings**: find the Git remote that points at an app
//! - **Git Passthrough**: `log`, `checkout`, `push` and `fetch` on release commits
//!
//! ## Usage
//!
//! ```bash
//! kodegen_platform_remote sha                  # SHA of the latest release
//! kodegen_platform_remote log v101..v103       # History between two releases
//! kodegen_platform_remote checkout -b fix v99  # Branch off a release
//! kodegen_platform_remote remote:add staging   # Add a remote for the app
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod remote;
pub mod resolve;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for public API
pub use api::{ApiBackend, LegacyClient, PlatformClient, ReleaseApi};
pub use cli::Args;
pub use config::PlatformConfig;
pub use error::{RemoteError, Result};
pub use git::{GitCli, GitOperations, RemoteInfo};
pub use remote::{RemoteBindings, resolve_app};
pub use resolve::{InvocationContext, ReleaseResolver, RevisionRange, TokenKind};
