//! Model-based intent resolution.
//!
//! The remote strategy: advertise the registry's tools as a capability
//! schema, send the prompt to the completion service, and map the returned
//! function-call directives into [`ToolCall`]s, preserving service order.
//!
//! Transport, HTTP, and parse failures surface as
//! [`ResolverError::Transport`]; wrapping this resolver in
//! [`FallbackResolver`](super::fallback::FallbackResolver) turns those into
//! a silent local resolution.

use crate::ports::completion::CompletionClient;
use crate::ports::registry::ToolRegistry;
use crate::ports::resolver::{IntentResolver, ResolverError};
use async_trait::async_trait;
use relay_domain::{ToolCall, ToolDefinition};
use std::sync::Arc;
use tracing::debug;

/// System prompt for the tool-selection call.
pub const RESOLVER_SYSTEM_PROMPT: &str = "You are an assistant managing a demo investment \
portfolio. Decide which of the available tools satisfy the user's request and call them. \
Call no tools when none apply.";

/// Build the capability schema payload advertised to the completion
/// service: one JSON-schema function declaration per registered tool,
/// in registration order.
pub fn capability_schema(definitions: &[ToolDefinition]) -> Vec<serde_json::Value> {
    definitions
        .iter()
        .map(|def| {
            let mut properties = serde_json::Map::new();
            let mut required = Vec::new();
            for param in &def.parameters {
                let mut prop = serde_json::json!({
                    "type": param.param_type,
                    "description": param.description,
                });
                if let Some(values) = &param.allowed_values {
                    prop["enum"] = serde_json::json!(values);
                }
                properties.insert(param.name.clone(), prop);
                if param.required {
                    required.push(serde_json::Value::String(param.name.clone()));
                }
            }
            serde_json::json!({
                "type": "function",
                "function": {
                    "name": def.name,
                    "description": def.description,
                    "parameters": {
                        "type": "object",
                        "properties": properties,
                        "required": required,
                    },
                },
            })
        })
        .collect()
}

/// The remote resolution strategy.
pub struct ModelResolver {
    client: Arc<dyn CompletionClient>,
    registry: Arc<dyn ToolRegistry>,
}

impl ModelResolver {
    pub fn new(client: Arc<dyn CompletionClient>, registry: Arc<dyn ToolRegistry>) -> Self {
        Self { client, registry }
    }
}

#[async_trait]
impl IntentResolver for ModelResolver {
    async fn resolve(&self, prompt: &str) -> Result<Vec<ToolCall>, ResolverError> {
        let schema = capability_schema(&self.registry.list());
        let directives = self
            .client
            .resolve_tools(RESOLVER_SYSTEM_PROMPT, prompt, &schema)
            .await?;

        debug!("model resolved {} tool directive(s)", directives.len());

        Ok(directives
            .into_iter()
            .map(|directive| ToolCall {
                tool_name: directive.name,
                arguments: directive.arguments,
            })
            .collect())
    }
}
