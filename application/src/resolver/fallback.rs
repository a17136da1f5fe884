//! Fallback combinator over two resolvers.
//!
//! Wraps a primary (remote) and a fallback (local) resolver. A primary
//! failure is absorbed: the combinator records a diagnostic event, logs a
//! warning, and resolves via the fallback for that single call. The
//! orchestrator simply receives a list; it cannot tell which strategy
//! produced it.

use crate::ports::diagnostics::{DiagnosticEvent, DiagnosticsSink, NoDiagnostics};
use crate::ports::resolver::{IntentResolver, ResolverError};
use async_trait::async_trait;
use relay_domain::ToolCall;
use std::sync::Arc;
use tracing::warn;

/// Resolver that degrades primary failures to the fallback strategy.
pub struct FallbackResolver {
    primary: Arc<dyn IntentResolver>,
    fallback: Arc<dyn IntentResolver>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl FallbackResolver {
    pub fn new(primary: Arc<dyn IntentResolver>, fallback: Arc<dyn IntentResolver>) -> Self {
        Self {
            primary,
            fallback,
            diagnostics: Arc::new(NoDiagnostics),
        }
    }

    /// Record fallbacks to a diagnostics sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

#[async_trait]
impl IntentResolver for FallbackResolver {
    async fn resolve(&self, prompt: &str) -> Result<Vec<ToolCall>, ResolverError> {
        match self.primary.resolve(prompt).await {
            Ok(calls) => Ok(calls),
            Err(error) => {
                warn!("remote intent resolution failed, using local rules: {error}");
                self.diagnostics.record(DiagnosticEvent::new(
                    "resolver_fallback",
                    serde_json::json!({ "error": error.to_string() }),
                ));
                self.fallback.resolve(prompt).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion::CompletionError;
    use crate::resolver::local::RuleResolver;
    use std::sync::Mutex;

    struct FailingResolver;

    #[async_trait]
    impl IntentResolver for FailingResolver {
        async fn resolve(&self, _prompt: &str) -> Result<Vec<ToolCall>, ResolverError> {
            Err(ResolverError::Transport(CompletionError::Transport(
                "connection refused".to_string(),
            )))
        }
    }

    struct RecordingDiagnostics {
        events: Mutex<Vec<&'static str>>,
    }

    impl DiagnosticsSink for RecordingDiagnostics {
        fn record(&self, event: DiagnosticEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    #[tokio::test]
    async fn failing_primary_matches_direct_local_resolution() {
        let local = Arc::new(RuleResolver::new());
        let combined = FallbackResolver::new(Arc::new(FailingResolver), local.clone());

        let prompt = "rebalance to aggressive";
        let via_fallback = combined.resolve(prompt).await.unwrap();
        let direct = local.resolve(prompt).await.unwrap();

        assert_eq!(via_fallback, direct);
    }

    #[tokio::test]
    async fn fallback_records_diagnostic_event() {
        let diagnostics = Arc::new(RecordingDiagnostics {
            events: Mutex::new(Vec::new()),
        });
        let combined =
            FallbackResolver::new(Arc::new(FailingResolver), Arc::new(RuleResolver::new()))
                .with_diagnostics(diagnostics.clone());

        combined.resolve("show my portfolio").await.unwrap();

        assert_eq!(
            diagnostics.events.lock().unwrap().as_slice(),
            &["resolver_fallback"]
        );
    }

    #[tokio::test]
    async fn healthy_primary_skips_fallback() {
        let diagnostics = Arc::new(RecordingDiagnostics {
            events: Mutex::new(Vec::new()),
        });
        let combined = FallbackResolver::new(
            Arc::new(RuleResolver::new()),
            Arc::new(FailingResolver),
        )
        .with_diagnostics(diagnostics.clone());

        let calls = combined.resolve("show my portfolio").await.unwrap();

        assert_eq!(calls.len(), 1);
        assert!(diagnostics.events.lock().unwrap().is_empty());
    }
}
