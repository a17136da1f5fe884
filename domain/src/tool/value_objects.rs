//! Tool domain value objects: immutable result and error types
//!
//! Every tool execution produces a [`ToolResult`]: a JSON output on success
//! or a coded [`ToolError`] on failure. A failed result is ordinary data:
//! the run orchestrator records it and moves on; it never aborts a run.

use super::entities::ToolCall;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error that occurred during tool registration or execution.
///
/// | Code | Meaning |
/// |------|---------|
/// | `NOT_FOUND` | Requested tool name has no registry entry |
/// | `INVALID_ARGUMENT` | Missing or malformed call arguments |
/// | `EXECUTION_FAILED` | The executable raised during invocation |
/// | `INVALID_DEFINITION` | Registration rejected (e.g. blank name) |
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[error("[{code}] {message}")]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "EXECUTION_FAILED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", format!("Unknown tool: {}", name.into()))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::new("INVALID_DEFINITION", message)
    }
}

/// Result of a tool execution, carrying output or error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output value (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: serde_json::Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output),
            error: None,
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
        }
    }

    /// Check if execution was successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the output value
    pub fn output(&self) -> Option<&serde_json::Value> {
        self.output.as_ref()
    }

    /// Get the error
    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Serialize into the payload carried by a `tool-call-result` event:
    /// the raw output JSON on success, `{"success":false,"error":...}` on
    /// failure.
    pub fn to_event_json(&self) -> String {
        let value = if self.success {
            self.output.clone().unwrap_or(serde_json::Value::Null)
        } else {
            serde_json::json!({
                "success": false,
                "error": self
                    .error
                    .as_ref()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| "unknown error".to_string()),
            })
        };
        value.to_string()
    }
}

/// An executed (request, result) pair.
///
/// Accumulated by the run orchestrator during the execution loop and read
/// by the response-generation step; discarded when the run ends. Tools are
/// executed exactly once; the summary only ever reads these outcomes.
#[derive(Debug, Clone)]
pub struct ToolCallOutcome {
    /// The originating request
    pub call: ToolCall,
    /// What the execution produced
    pub result: ToolResult,
}

impl ToolCallOutcome {
    pub fn new(call: ToolCall, result: ToolResult) -> Self {
        Self { call, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_display() {
        let err = ToolError::not_found("getWeather");
        assert_eq!(err.code, "NOT_FOUND");
        assert_eq!(err.to_string(), "[NOT_FOUND] Unknown tool: getWeather");
    }

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("getPortfolio", serde_json::json!({"totalValue": 42.0}));

        assert!(result.is_success());
        assert!(result.error().is_none());
        assert_eq!(result.to_event_json(), r#"{"totalValue":42.0}"#);
    }

    #[test]
    fn test_tool_result_failure_event_json() {
        let result = ToolResult::failure(
            "depositFunds",
            ToolError::invalid_argument("Missing required argument: amount"),
        );

        assert!(!result.is_success());
        let payload: serde_json::Value = serde_json::from_str(&result.to_event_json()).unwrap();
        assert_eq!(payload["success"], false);
        assert_eq!(payload["error"], "Missing required argument: amount");
    }
}
