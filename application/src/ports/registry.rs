//! Tool Registry port
//!
//! Defines how the orchestrator and the remote resolver see the tool
//! collection: named, described, executable entries in a stable order.

use async_trait::async_trait;
use relay_domain::{ToolCall, ToolDefinition, ToolError, ToolResult};
use std::sync::Arc;

/// An executable tool body.
///
/// Accepts the resolved call (the tool owns its own argument parsing and
/// validation) and produces a JSON-serializable result, or fails with a
/// tool-specific [`ToolError`]. Side effects belong entirely to the
/// implementation.
#[async_trait]
pub trait ToolExecutable: Send + Sync {
    async fn run(&self, call: &ToolCall) -> Result<serde_json::Value, ToolError>;
}

/// Port for the tool registry.
///
/// A conceptually single-threaded, read-heavy name→tool map. No retry and
/// no error swallowing happen at this layer: a failing executable surfaces
/// as a failed [`ToolResult`] to the caller, exactly once.
#[async_trait]
pub trait ToolRegistry: Send + Sync {
    /// Insert or replace the entry named by `definition.name`.
    ///
    /// Empty or blank names are rejected with `INVALID_DEFINITION`.
    fn register(
        &self,
        definition: ToolDefinition,
        executable: Arc<dyn ToolExecutable>,
    ) -> Result<(), ToolError>;

    /// Current tools in registration order.
    ///
    /// Used both for the UI listing and for building the remote resolver's
    /// capability schema.
    fn list(&self) -> Vec<ToolDefinition>;

    /// Find a tool's definition, or fail with `NOT_FOUND`.
    fn lookup(&self, name: &str) -> Result<ToolDefinition, ToolError>;

    /// Look up and invoke the named tool.
    ///
    /// A missing tool yields a `NOT_FOUND` failure result; an executable
    /// error is wrapped into a failure result carrying the cause.
    async fn execute(&self, call: &ToolCall) -> ToolResult;

    /// Check if a tool is registered.
    fn has_tool(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }
}
