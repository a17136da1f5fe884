//! In-memory tool registry, the concrete implementation of [`ToolRegistry`].
//!
//! A name-keyed map plus a registration-order list, so [`list()`] is stable
//! for both the UI listing and the remote capability schema. Re-registering
//! a name replaces the executable but keeps the original ordering slot.
//!
//! [`list()`]: ToolRegistry::list

use async_trait::async_trait;
use relay_application::{ToolExecutable, ToolRegistry};
use relay_domain::{ToolCall, ToolDefinition, ToolError, ToolResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

struct Entry {
    definition: ToolDefinition,
    executable: Arc<dyn ToolExecutable>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    order: Vec<String>,
}

/// Registry holding tools in process memory.
///
/// Read-heavy and conceptually single-threaded; the mutex only guards
/// registration against the occasional lookup, never a tool execution
/// (the executable is cloned out before it runs).
pub struct InMemoryToolRegistry {
    inner: Mutex<Inner>,
}

impl InMemoryToolRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }
}

impl Default for InMemoryToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolRegistry for InMemoryToolRegistry {
    fn register(
        &self,
        definition: ToolDefinition,
        executable: Arc<dyn ToolExecutable>,
    ) -> Result<(), ToolError> {
        if definition.name.trim().is_empty() {
            return Err(ToolError::invalid_definition(
                "tool name must not be empty",
            ));
        }

        let Ok(mut inner) = self.inner.lock() else {
            return Err(ToolError::execution_failed("registry lock poisoned"));
        };

        let name = definition.name.clone();
        if !inner.entries.contains_key(&name) {
            inner.order.push(name.clone());
        }
        debug!("registered tool {name}");
        inner.entries.insert(
            name,
            Entry {
                definition,
                executable,
            },
        );
        Ok(())
    }

    fn list(&self) -> Vec<ToolDefinition> {
        let Ok(inner) = self.inner.lock() else {
            return Vec::new();
        };
        inner
            .order
            .iter()
            .filter_map(|name| inner.entries.get(name))
            .map(|entry| entry.definition.clone())
            .collect()
    }

    fn lookup(&self, name: &str) -> Result<ToolDefinition, ToolError> {
        let Ok(inner) = self.inner.lock() else {
            return Err(ToolError::execution_failed("registry lock poisoned"));
        };
        inner
            .entries
            .get(name)
            .map(|entry| entry.definition.clone())
            .ok_or_else(|| ToolError::not_found(name))
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        // Clone the executable out so the lock is never held across await.
        let executable = match self.inner.lock() {
            Ok(inner) => inner
                .entries
                .get(&call.tool_name)
                .map(|entry| entry.executable.clone()),
            Err(_) => {
                return ToolResult::failure(
                    &call.tool_name,
                    ToolError::execution_failed("registry lock poisoned"),
                );
            }
        };

        let Some(executable) = executable else {
            return ToolResult::failure(&call.tool_name, ToolError::not_found(&call.tool_name));
        };

        match executable.run(call).await {
            Ok(output) => ToolResult::success(&call.tool_name, output),
            Err(tool_error) => ToolResult::failure(&call.tool_name, tool_error),
        }
    }
}
