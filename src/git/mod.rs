//! Git operations for platform remotes.
//!
//! The [`GitOperations`] trait is the seam the resolver and commands depend on;
//! [`GitCli`] is the subprocess implementation used by the binary.

mod git_cli;
mod operations;

pub use git_cli::GitCli;
pub use operations::{GitOperations, RemoteInfo};
