//! Release token resolution.
//!
//! Tokens are classified first ([`TokenKind`]); only empty tokens and release
//! names reach the [`ReleaseResolver`], everything else is left for git.

mod context;
mod resolver;
mod token;

pub use context::InvocationContext;
pub use resolver::ReleaseResolver;
pub use token::{RevisionRange, TokenKind};
