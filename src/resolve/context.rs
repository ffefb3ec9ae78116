//! Per-invocation state shared by every resolution in one command run.

use crate::remote::RemoteBindings;

/// Memoized lookups and the fetch guard for one command invocation
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Remote bindings, once read from the Git configuration
    pub(crate) bindings: Option<RemoteBindings>,
    /// Remote bound to the app; outer `None` means not computed yet
    pub(crate) remote_name: Option<Option<String>>,
    /// Repository URL reported by the API
    pub(crate) git_url: Option<String>,
    /// Whether this invocation already fetched from the remote
    pub(crate) fetched: bool,
}

impl InvocationContext {
    /// Fresh context with nothing cached
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the context with bindings already read while resolving the app
    pub fn with_bindings(mut self, bindings: RemoteBindings) -> Self {
        self.bindings = Some(bindings);
        self
    }

    /// Whether a fetch already happened
    pub fn has_fetched(&self) -> bool {
        self.fetched
    }
}
