//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
///
/// Per-destination failures are not errors here; they are recorded in the
/// destination's `DispatchOutcome`.
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// HTTP client construction error
    #[error("failed to build HTTP client: {message}")]
    ClientBuild { message: String },
}

impl DispatcherError {
    /// Create a client construction error
    pub fn client_build(message: impl Into<String>) -> Self {
        Self::ClientBuild {
            message: message.into(),
        }
    }
}
