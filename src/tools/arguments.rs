//! Typed access to tool call arguments.

use crate::error::{BridgeError, Result};

/// Wrapper around a call's JSON arguments providing typed extraction.
///
/// Arguments are schema-validated before a handler runs, so the required
/// accessors only fail on calls that bypass the dispatcher (direct handler
/// invocation in tests).
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// The raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Required string argument.
    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| BridgeError::Validation(format!("missing string argument '{key}'")))
    }

    /// Optional string argument.
    pub fn opt_str(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }

    /// Integer argument with a default when absent.
    pub fn i64_or(&self, key: &str, default: i64) -> Result<i64> {
        match self.value.get(key) {
            None | Some(serde_json::Value::Null) => Ok(default),
            Some(v) => v.as_i64().ok_or_else(|| {
                BridgeError::Validation(format!("argument '{key}' must be an integer"))
            }),
        }
    }

    /// Required non-negative integer (port numbers).
    pub fn require_u32(&self, key: &str) -> Result<u32> {
        let raw = self
            .value
            .get(key)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| BridgeError::Validation(format!("missing integer argument '{key}'")))?;
        u32::try_from(raw).map_err(|_| {
            BridgeError::Validation(format!("argument '{key}' must be a non-negative integer"))
        })
    }

    /// Optional object argument.
    pub fn opt_object(&self, key: &str) -> Option<&serde_json::Value> {
        self.value.get(key).filter(|v| v.is_object())
    }
}
