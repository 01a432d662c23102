//! The agent's own handle, resolved once at startup.
//!
//! The handle is only known after an asynchronous `get_me` call against the
//! platform. Until then every consumer sees `None` and must fail closed.
//! Modeled as an explicit shared value rather than a module-level static so
//! tests can inject a pre-resolved identity.

use std::sync::OnceLock;

use tracing::{info, warn};

/// Lifecycle: starts unresolved, transitions to resolved exactly once.
#[derive(Debug, Default)]
pub struct AgentIdentity {
    handle: OnceLock<String>,
}

impl AgentIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-resolved identity, for tests and wiring that already knows the handle.
    pub fn resolved(handle: impl Into<String>) -> Self {
        let identity = Self::new();
        identity.resolve(handle.into());
        identity
    }

    /// Record the handle. A second call is ignored with a warning.
    pub fn resolve(&self, handle: String) {
        let resolved = handle.clone();
        match self.handle.set(handle) {
            Ok(()) => info!(handle = %resolved, "agent identity resolved"),
            Err(rejected) => warn!(rejected = %rejected, "agent identity already resolved"),
        }
    }

    /// The agent's handle, or `None` while startup resolution is pending.
    pub fn handle(&self) -> Option<&str> {
        self.handle.get().map(String::as_str)
    }

    pub fn is_ready(&self) -> bool {
        self.handle.get().is_some()
    }
}
