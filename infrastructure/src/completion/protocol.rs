//! Chat-completions wire format.
//!
//! The remote service speaks an OpenAI-style chat-completions API: the
//! request carries messages plus optional `tools` declarations, and the
//! response's first choice carries either text content or a list of
//! `tool_calls` whose `arguments` field is a JSON-encoded string.
//!
//! Nothing outside this module and [`client`](super::client) knows this
//! shape; the application layer only sees [`ToolDirective`]s.

use relay_application::{CompletionError, ToolDirective};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [serde_json::Value]>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<WireToolCall>,
}

#[derive(Debug, Deserialize)]
pub struct WireToolCall {
    pub function: WireFunction,
}

#[derive(Debug, Deserialize)]
pub struct WireFunction {
    pub name: String,
    /// JSON-encoded argument object.
    pub arguments: String,
}

impl ResponseMessage {
    /// Convert the message's tool calls into directives, preserving order.
    ///
    /// An unparseable `arguments` string is a malformed response, not an
    /// empty argument set; an empty string is tolerated as "no arguments".
    pub fn into_directives(self) -> Result<Vec<ToolDirective>, CompletionError> {
        self.tool_calls
            .into_iter()
            .map(|call| {
                let arguments: HashMap<String, serde_json::Value> =
                    if call.function.arguments.trim().is_empty() {
                        HashMap::new()
                    } else {
                        serde_json::from_str(&call.function.arguments).map_err(|e| {
                            CompletionError::Malformed(format!(
                                "tool call '{}' arguments: {e}",
                                call.function.name
                            ))
                        })?
                    };
                Ok(ToolDirective {
                    name: call.function.name,
                    arguments,
                })
            })
            .collect()
    }
}
