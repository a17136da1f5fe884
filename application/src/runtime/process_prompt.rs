//! Process Prompt use case: the run orchestrator.
//!
//! One [`AgentRuntime`] processes one prompt at a time. A run resolves the
//! prompt into tool calls, executes each call exactly once against the
//! registry, and emits the lifecycle protocol to the event sink:
//!
//! ```text
//! run-started
//!   (per call) tool-call-started → tool-call-arguments? → tool-call-ended → tool-call-result
//! text-message-started → text-message-content+ → text-message-ended
//! run-finished
//! ```
//!
//! A tool failure is recorded as data and the loop continues; only an error
//! escaping the loop itself (e.g. a resolver used without the fallback
//! combinator) produces `run-error`, and even then the run is terminated by
//! exactly one `run-finished`. The already-computed outcomes feed the
//! response summary; tools are never executed a second time to build
//! response context.

use crate::ports::completion::CompletionClient;
use crate::ports::diagnostics::{DiagnosticEvent, DiagnosticsSink, NoDiagnostics};
use crate::ports::event_sink::EventSink;
use crate::ports::id_source::{IdSource, SequentialIdSource};
use crate::ports::pacing::{FixedDelayPacing, PacingPolicy};
use crate::ports::registry::ToolRegistry;
use crate::ports::resolver::{IntentResolver, ResolverError};
use relay_domain::{
    MessageId, MessageRole, RunEvent, RunEventKind, RunId, RunStatus, ToolCall, ToolCallOutcome,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Informational message emitted when a prompt arrives mid-run.
pub const BUSY_MESSAGE: &str = "The agent is busy; a run is already in progress.";

/// Fixed reply when no rule or directive matched the prompt.
pub const NO_TOOL_MESSAGE: &str = "I don't have a tool that can help with that. \
Try asking about your portfolio, performance, rebalancing, deposits, or the market.";

/// System prompt for the fluent summary call.
const SUMMARY_SYSTEM_PROMPT: &str = "You are an assistant managing a demo investment \
portfolio. Summarize the executed tool results for the user in one or two friendly \
sentences. Do not invent figures that are not in the results.";

/// Default pause between streamed response chunks.
const DEFAULT_CHUNK_DELAY_MS: u64 = 80;

/// A new run was rejected before it started.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RunRejected {
    #[error("a run is already in progress")]
    AlreadyActive,
}

/// What a finished run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub run_id: RunId,
    pub status: RunStatus,
    /// Full response text, as streamed to the sink.
    pub response: String,
    /// Executed (request, result) pairs, in execution order.
    pub outcomes: Vec<ToolCallOutcome>,
}

/// Error that escaped the orchestration loop.
struct RunFailure {
    code: &'static str,
    message: String,
}

impl From<ResolverError> for RunFailure {
    fn from(error: ResolverError) -> Self {
        Self {
            code: "resolver_error",
            message: error.to_string(),
        }
    }
}

/// The run orchestrator.
///
/// Owns the single-run guard; all other state is per-run and discarded
/// when `process_prompt` returns.
pub struct AgentRuntime {
    registry: Arc<dyn ToolRegistry>,
    resolver: Arc<dyn IntentResolver>,
    summarizer: Option<Arc<dyn CompletionClient>>,
    sink: Arc<dyn EventSink>,
    pacing: Arc<dyn PacingPolicy>,
    ids: Arc<dyn IdSource>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    busy: AtomicBool,
}

impl AgentRuntime {
    pub fn new(
        registry: Arc<dyn ToolRegistry>,
        resolver: Arc<dyn IntentResolver>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            registry,
            resolver,
            summarizer: None,
            sink,
            pacing: Arc::new(FixedDelayPacing::from_millis(DEFAULT_CHUNK_DELAY_MS)),
            ids: Arc::new(SequentialIdSource::new()),
            diagnostics: Arc::new(NoDiagnostics),
            busy: AtomicBool::new(false),
        }
    }

    /// Use the completion service for fluent response phrasing.
    ///
    /// Without a summarizer the response is a templated sentence naming the
    /// executed tools (the local-strategy mode).
    pub fn with_summarizer(mut self, summarizer: Arc<dyn CompletionClient>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn with_pacing(mut self, pacing: Arc<dyn PacingPolicy>) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Process one prompt, emitting the full event protocol to the sink.
    ///
    /// Rejects immediately (one informational event, no state change) if a
    /// run is already in progress. The busy flag is released on every exit
    /// path before this method returns.
    pub async fn process_prompt(&self, prompt: &str) -> Result<RunOutcome, RunRejected> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("prompt rejected: run already in progress");
            self.emit(RunEventKind::Custom {
                message: BUSY_MESSAGE.to_string(),
            });
            return Err(RunRejected::AlreadyActive);
        }

        let outcome = self.run(prompt).await;
        self.busy.store(false, Ordering::Release);
        Ok(outcome)
    }

    async fn run(&self, prompt: &str) -> RunOutcome {
        let thread_id = self.ids.thread_id();
        let run_id = self.ids.run_id();
        info!("run {run_id} started");

        self.emit(RunEventKind::RunStarted {
            thread_id: thread_id.clone(),
            run_id: run_id.clone(),
        });

        match self.drive(prompt).await {
            Ok((response, outcomes)) => {
                self.emit(RunEventKind::RunFinished {
                    thread_id,
                    run_id: run_id.clone(),
                    status: RunStatus::Completed,
                });
                info!("run {run_id} completed with {} tool call(s)", outcomes.len());
                RunOutcome {
                    run_id,
                    status: RunStatus::Completed,
                    response,
                    outcomes,
                }
            }
            Err(failure) => {
                error!("run {run_id} failed: {}", failure.message);
                self.emit(RunEventKind::RunError {
                    thread_id: thread_id.clone(),
                    run_id: run_id.clone(),
                    message: failure.message,
                    code: failure.code.to_string(),
                });
                self.emit(RunEventKind::RunFinished {
                    thread_id,
                    run_id: run_id.clone(),
                    status: RunStatus::Error,
                });
                RunOutcome {
                    run_id,
                    status: RunStatus::Error,
                    response: String::new(),
                    outcomes: Vec::new(),
                }
            }
        }
    }

    async fn drive(
        &self,
        prompt: &str,
    ) -> Result<(String, Vec<ToolCallOutcome>), RunFailure> {
        let calls = self.resolver.resolve(prompt).await?;
        debug!("resolved {} tool call(s)", calls.len());

        let mut outcomes = Vec::with_capacity(calls.len());
        for call in calls {
            outcomes.push(self.execute_call(call).await);
        }

        let response = self.respond(prompt, &outcomes).await;
        Ok((response, outcomes))
    }

    /// Execute one resolved call, emitting its event subsequence:
    /// started → arguments (iff non-empty) → ended → result.
    async fn execute_call(&self, call: ToolCall) -> ToolCallOutcome {
        let tool_call_id = self.ids.tool_call_id();
        let message_id = self.ids.message_id();

        self.emit(RunEventKind::ToolCallStarted {
            tool_call_id: tool_call_id.clone(),
            tool_name: call.tool_name.clone(),
            message_id: message_id.clone(),
        });

        if !call.arguments.is_empty() {
            let args_json =
                serde_json::to_string(&call.arguments).unwrap_or_else(|_| "{}".to_string());
            self.emit(RunEventKind::ToolCallArguments {
                tool_call_id: tool_call_id.clone(),
                args_json,
            });
        }

        let result = self.registry.execute(&call).await;
        if let Some(tool_error) = result.error() {
            warn!("tool {} failed: {tool_error}", call.tool_name);
        }

        self.emit(RunEventKind::ToolCallEnded {
            tool_call_id: tool_call_id.clone(),
        });
        self.emit(RunEventKind::ToolCallResult {
            message_id,
            tool_call_id,
            result_json: result.to_event_json(),
        });

        ToolCallOutcome::new(call, result)
    }

    /// Emit the response message for the run.
    async fn respond(&self, prompt: &str, outcomes: &[ToolCallOutcome]) -> String {
        let message_id = self.ids.message_id();
        self.emit(RunEventKind::TextMessageStarted {
            message_id: message_id.clone(),
            role: MessageRole::Assistant,
        });

        let response = if outcomes.is_empty() {
            self.emit(RunEventKind::TextMessageContent {
                message_id: message_id.clone(),
                delta: NO_TOOL_MESSAGE.to_string(),
            });
            NO_TOOL_MESSAGE.to_string()
        } else if let Some(summarizer) = &self.summarizer {
            let text = self.fluent_summary(summarizer.as_ref(), prompt, outcomes).await;
            self.stream_text(&message_id, &text).await;
            text
        } else {
            let text = template_summary(outcomes);
            self.emit(RunEventKind::TextMessageContent {
                message_id: message_id.clone(),
                delta: text.clone(),
            });
            text
        };

        self.emit(RunEventKind::TextMessageEnded { message_id });
        response
    }

    /// Fluent phrasing via the completion service, degrading to the
    /// template sentence on any failure. Never aborts the run.
    async fn fluent_summary(
        &self,
        summarizer: &dyn CompletionClient,
        prompt: &str,
        outcomes: &[ToolCallOutcome],
    ) -> String {
        match summarizer
            .summarize(SUMMARY_SYSTEM_PROMPT, &summary_request(prompt, outcomes))
            .await
        {
            // Normalize whitespace so the streamed deltas reassemble into
            // exactly the returned response text.
            Ok(text) if !text.trim().is_empty() => {
                text.split_whitespace().collect::<Vec<_>>().join(" ")
            }
            Ok(_) => template_summary(outcomes),
            Err(completion_error) => {
                warn!("summary call failed, using template: {completion_error}");
                self.diagnostics.record(DiagnosticEvent::new(
                    "summary_fallback",
                    serde_json::json!({ "error": completion_error.to_string() }),
                ));
                template_summary(outcomes)
            }
        }
    }

    /// Stream `text` word by word, pausing between chunks to preserve the
    /// visible streaming effect.
    async fn stream_text(&self, message_id: &MessageId, text: &str) {
        let mut first = true;
        for word in text.split_whitespace() {
            if !first {
                self.pacing.pause().await;
            }
            let delta = if first {
                word.to_string()
            } else {
                format!(" {word}")
            };
            self.emit(RunEventKind::TextMessageContent {
                message_id: message_id.clone(),
                delta,
            });
            first = false;
        }
    }

    fn emit(&self, kind: RunEventKind) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        self.sink.on_event(&RunEvent::new(timestamp, kind));
    }
}

/// Templated response sentence naming the executed tools.
fn template_summary(outcomes: &[ToolCallOutcome]) -> String {
    let names: Vec<&str> = outcomes
        .iter()
        .map(|outcome| outcome.call.tool_name.as_str())
        .collect();
    let failed = outcomes
        .iter()
        .filter(|outcome| !outcome.result.success)
        .count();

    let mut text = format!("I ran {}.", names.join(", "));
    if failed > 0 {
        text.push_str(&format!(" {failed} of {} calls failed.", outcomes.len()));
    }
    text
}

/// User prompt for the fluent summary call: the original request plus the
/// recorded outcomes (truncated), never a re-execution.
fn summary_request(prompt: &str, outcomes: &[ToolCallOutcome]) -> String {
    let mut request = format!("The user asked: {prompt}\nTool executions:\n");
    for outcome in outcomes {
        let status = if outcome.result.success { "ok" } else { "failed" };
        request.push_str(&format!(
            "- {} [{status}]: {}\n",
            outcome.call.tool_name,
            truncate(&outcome.result.to_event_json(), 240),
        ));
    }
    request.push_str("Reply to the user describing what was done.");
    request
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(max_chars).collect();
        truncated.push_str("...");
        truncated
    }
}
