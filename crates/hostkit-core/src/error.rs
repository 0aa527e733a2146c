//! Error types for hostkit

use thiserror::Error;

/// Result type alias for hostkit operations
pub type HostkitResult<T> = Result<T, HostkitError>;

/// Main error type for hostkit
///
/// The core distinguishes contract violations (programmer errors that must
/// surface immediately, like asking a host context for a capability it does
/// not carry) from benign absence, which is expressed as `Option` on the
/// registry and context APIs and never as an error.
#[derive(Error, Debug, Clone)]
pub enum HostkitError {
    /// The hosting context does not provide a requested capability
    #[error("Host context does not provide capability: {0}")]
    MissingCapability(String),

    /// Instance-state serialization errors
    #[error("State error: {0}")]
    State(String),
}

impl HostkitError {
    /// Create a new missing-capability error
    pub fn missing_capability(capability: impl Into<String>) -> Self {
        Self::MissingCapability(capability.into())
    }

    /// Create a new state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }
}
