//! Unified error type for scriptbridge.
//!
//! Every failure of the bridge funnels into [`Error`]. Each variant carries
//! enough context (script path, directory, command text) to diagnose a failed
//! run without re-running it.

use std::time::Duration;

/// Unified error type covering all failure modes of the bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller supplied no live engine session.
    #[error("Engine handle is null: no live engine session was supplied. Aborting.")]
    NullEngineHandle,

    /// The script path or configuration cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The engine rejected the working-directory change.
    ///
    /// The session has been closed (best effort) by the time this surfaces.
    #[error("Engine failed to change into directory {directory}: {message}. Aborting.")]
    EngineDirectory {
        /// The directory the engine was asked to enter.
        directory: String,
        /// Engine-reported failure description.
        message: String,
    },

    /// The engine reported failure while evaluating a script invocation.
    #[error("Evaluation of `{command}` failed: {message}")]
    Evaluation {
        /// The exact command text that was issued.
        command: String,
        /// Engine-reported failure description.
        message: String,
    },

    /// An image could not be converted to or from the engine's array type.
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// An engine call did not complete within the configured bound.
    #[error("Engine call [{operation}] timed out after {timeout:?}")]
    EngineTimeout {
        /// The engine call that was pending.
        operation: String,
        /// The bound that was exceeded.
        timeout: Duration,
    },

    /// An engine call other than an evaluation failed at the transport level.
    #[error("Engine error [{operation}]: {message}")]
    Engine {
        /// The engine call that failed.
        operation: String,
        /// Human-readable error description.
        message: String,
    },

    /// The run was cancelled before all images were processed.
    #[error("Run cancelled after {completed} of {total} images")]
    Cancelled {
        /// Images completed before cancellation was observed.
        completed: usize,
        /// Images in the input sequence.
        total: usize,
    },
}

impl Error {
    /// Whether the engine session must be considered unusable after this
    /// error.
    pub fn session_lost(&self) -> bool {
        matches!(
            self,
            Error::EngineDirectory { .. } | Error::EngineTimeout { .. }
        )
    }

    /// Convenience constructor for [`Error::InvalidConfiguration`].
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration(message.into())
    }

    /// Convenience constructor for [`Error::Engine`].
    pub fn engine(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Engine {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Conversion`].
    pub fn conversion(message: impl Into<String>) -> Self {
        Error::Conversion(message.into())
    }

    /// Convenience constructor for [`Error::Evaluation`].
    pub fn evaluation(command: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Evaluation {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
