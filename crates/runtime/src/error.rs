//! Error types for the WebDriver runtime.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the WebDriver runtime.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration field missing or unrecognized.
    ///
    /// Raised at configuration resolution, before any session exists.
    #[error("configuration error: {field}: {reason}")]
    Configuration { field: String, reason: String },

    /// Driver executable could not be located.
    #[error(
        "WebDriver executable not found: {0}. Set driverPath in the configuration or WD_DRIVER in the environment."
    )]
    DriverNotFound(PathBuf),

    /// Failed to launch the driver process.
    #[error("failed to launch WebDriver process: {0}")]
    LaunchFailed(String),

    /// Browser or grid failed to produce a session.
    #[error("failed to start browser session: {0}")]
    SessionStart(String),

    /// Transport-level error (HTTP plumbing).
    #[error("transport error: {0}")]
    TransportError(String),

    /// Protocol-level error (unexpected wire shape).
    #[error("protocol error: {0}")]
    ProtocolError(String),

    /// Error payload reported by the remote end.
    #[error("{error}: {message}")]
    Wire {
        /// Spec error code (e.g. "no such element", "invalid session id")
        error: String,
        /// Human-readable message from the driver
        message: String,
        /// Driver-side stacktrace (if provided)
        stacktrace: Option<String>,
    },

    /// Expected element absent after the bounded wait.
    #[error("element not found: selector '{selector}' (waited {timeout_ms}ms)")]
    ElementNotFound { selector: String, timeout_ms: u64 },

    /// Bounded wait elapsed for a non-element condition.
    #[error("timeout after {ms}ms waiting for: {condition}")]
    Timeout { ms: u64, condition: String },

    /// Expected vs. observed state mismatch (the normal test failure path).
    #[error("assertion failed: {0}")]
    AssertionFailed(String),

    /// Invalid argument provided to an operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation attempted on a session that was already torn down.
    #[error("session closed: cannot {0} after teardown")]
    SessionClosed(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] value.
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the wire error code if this is a remote-end error.
    pub fn wire_code(&self) -> Option<&str> {
        match self {
            Error::Wire { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns true if the remote end reported "no such element".
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, Error::Wire { error, .. } if error == "no such element")
    }

    /// Returns true if this error means an element could not be located,
    /// either directly from the wire or after a bounded wait.
    pub fn is_element_not_found(&self) -> bool {
        matches!(self, Error::ElementNotFound { .. }) || self.is_no_such_element()
    }

    /// Returns true if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } | Error::ElementNotFound { .. } => true,
            Error::Wire { error, .. } => error == "timeout",
            _ => false,
        }
    }
}
