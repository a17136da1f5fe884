//! Intent resolution port
//!
//! A resolver turns a free-text prompt into an ordered list of tool calls.
//! Two interchangeable strategies exist (keyword rules, remote model);
//! the orchestrator only ever sees this trait.

use super::completion::CompletionError;
use async_trait::async_trait;
use relay_domain::ToolCall;
use thiserror::Error;

/// Errors a resolver can surface.
///
/// The local strategy never fails; only the remote strategy produces
/// `Transport`, and the fallback combinator normally absorbs it before it
/// reaches the orchestrator.
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("completion service failure: {0}")]
    Transport(#[from] CompletionError),
}

/// Port for converting a prompt into tool-call requests.
#[async_trait]
pub trait IntentResolver: Send + Sync {
    /// Resolve `prompt` into an ordered list of calls (possibly empty).
    async fn resolve(&self, prompt: &str) -> Result<Vec<ToolCall>, ResolverError>;
}
