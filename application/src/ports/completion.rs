//! Remote completion service port
//!
//! The external LLM service is a black box behind this trait: it receives
//! a prompt plus tool capability schemas and returns function-call
//! directives (or fluent text for the summary path). The concrete wire
//! format lives entirely in the infrastructure adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur talking to the completion service.
///
/// All of these are recoverable from the resolver's point of view: the
/// fallback combinator converts them into a local resolution, and the
/// summary path degrades to a templated sentence.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("completion service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    Malformed(String),

    #[error("completion request timed out")]
    Timeout,
}

/// A function-call directive returned by the completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDirective {
    /// Tool name the model chose.
    pub name: String,
    /// Parsed argument object (possibly empty).
    pub arguments: HashMap<String, serde_json::Value>,
}

/// Port for the remote completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Ask the model which tools to invoke for `user_prompt`.
    ///
    /// `tools` is the capability schema payload built from the registry
    /// listing. Directive order is preserved as returned by the service.
    async fn resolve_tools(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        tools: &[serde_json::Value],
    ) -> Result<Vec<ToolDirective>, CompletionError>;

    /// Ask the model for a fluent natural-language reply.
    async fn summarize(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError>;
}
