//! Error types for the bridge.

use thiserror::Error;

/// Primary error type for all bridge operations.
///
/// Every backend-client failure is converted into one of these before it
/// reaches a tool handler; handlers convert them one-to-one into the
/// `{success: false, error}` tool-result shape. Only `Configuration` and
/// `DuplicateTool` are fatal, and only at startup.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Duplicate tool registration: {0}")]
    DuplicateTool(String),

    #[error("Invalid arguments: {0}")]
    Validation(String),

    #[error("timeout after {timeout_secs}s waiting for {operation}")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("GNS3 API error (status {status}): {message}")]
    BackendRejected { status: u16, message: String },

    #[error("Malformed GNS3 response in {operation}: {message}")]
    MalformedResponse { operation: String, message: String },

    #[error("Connection error in {operation}: {message}")]
    Network { operation: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Create a `BackendRejected` error from a status code and message.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::BackendRejected {
            status,
            message: message.into(),
        }
    }

    /// Create a `Timeout` error for a named operation.
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create a `MalformedResponse` error for a named operation.
    pub fn malformed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a `Network` error for a named operation.
    pub fn network(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Whether this error should abort startup rather than surface as a
    /// tool-result failure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::DuplicateTool(_))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BridgeError>;
