//! HTTP adapter for the remote completion service.
//!
//! Implements [`CompletionClient`] over a chat-completions endpoint.
//! Transport failures, non-success statuses, timeouts, and malformed
//! bodies all map to [`CompletionError`] variants; callers (the fallback
//! combinator, the summary path) decide how to degrade.

use super::protocol::{ChatMessage, ChatRequest, ChatResponse, ResponseMessage};
use crate::config::ApiConfig;
use async_trait::async_trait;
use relay_application::{CompletionClient, CompletionError, ToolDirective};
use std::time::Duration;
use tracing::debug;

/// Client for an OpenAI-style chat-completions API.
pub struct HttpCompletionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HttpCompletionClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.key.clone(),
            model: config.model.clone(),
        }
    }

    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        tools: Option<&[serde_json::Value]>,
    ) -> Result<ResponseMessage, CompletionError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            tools,
        };

        debug!(
            "completion request to {} (tools: {})",
            self.base_url,
            tools.map(<[_]>::len).unwrap_or(0)
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| CompletionError::Malformed("response contained no choices".to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> CompletionError {
    if error.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Transport(error.to_string())
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn resolve_tools(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        tools: &[serde_json::Value],
    ) -> Result<Vec<ToolDirective>, CompletionError> {
        let message = self.chat(system_prompt, user_prompt, Some(tools)).await?;
        message.into_directives()
    }

    async fn summarize(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError> {
        let message = self.chat(system_prompt, user_prompt, None).await?;
        message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| CompletionError::Malformed("response contained no text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let client = HttpCompletionClient::new(&ApiConfig {
            key: "k".to_string(),
            base_url: "https://example.test/v1/".to_string(),
            model: "demo".to_string(),
            timeout_secs: 5,
        });
        assert_eq!(client.base_url, "https://example.test/v1");
    }
}
