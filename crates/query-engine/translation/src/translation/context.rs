//! The per-request execution context.
//!
//! The context is opaque to the bridge, except for an optional diagnostic channel
//! that generated SQL can be copied into.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// A settable key/value surface on the request, e.g. outgoing response headers.
pub trait DiagnosticChannel: Send + Sync {
    fn set(&self, key: &str, value: String) -> Result<(), DiagnosticError>;
}

/// A diagnostic write could not be made. These never reach the caller.
#[derive(Debug, Error)]
#[error("unable to write diagnostic '{key}': {message}")]
pub struct DiagnosticError {
    pub key: String,
    pub message: String,
}

/// Created once per request and shared by all of the request's field resolutions.
#[derive(Clone, Default)]
pub struct RequestContext {
    diagnostics: Option<Arc<dyn DiagnosticChannel>>,
}

impl RequestContext {
    /// A context without a diagnostic channel.
    pub fn new() -> Self {
        RequestContext { diagnostics: None }
    }

    pub fn with_diagnostics(diagnostics: Arc<dyn DiagnosticChannel>) -> Self {
        RequestContext {
            diagnostics: Some(diagnostics),
        }
    }

    pub fn diagnostics(&self) -> Option<&dyn DiagnosticChannel> {
        self.diagnostics.as_deref()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}
