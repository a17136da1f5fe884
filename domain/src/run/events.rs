//! Lifecycle events emitted while a run executes.
//!
//! [`RunEvent`] is the unit the orchestrator hands to every event sink:
//! a creation timestamp plus one [`RunEventKind`] variant. Events form a
//! write-once, append-only log for the duration of one run: they are
//! emitted in strict program order, never mutated, never replayed.
//!
//! The serialized form carries the variant as a kebab-case `kind` tag
//! (`run-started`, `tool-call-result`, ...), which is also the shape the
//! JSONL event log writes.

use super::ids::{MessageId, RunId, ThreadId, ToolCallId};
use serde::{Deserialize, Serialize};

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// The run reached the end of its protocol, tool failures included.
    Completed,
    /// An error escaped the orchestration loop.
    Error,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Error => write!(f, "error"),
        }
    }
}

/// Role attached to a streamed text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    Assistant,
}

/// One observable step of a run.
///
/// Within a single correlation id the variants appear in a fixed order:
/// `ToolCallStarted` → `ToolCallArguments`? → `ToolCallEnded` →
/// `ToolCallResult`, and `RunFinished` is always the last event of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RunEventKind {
    RunStarted {
        thread_id: ThreadId,
        run_id: RunId,
    },
    RunFinished {
        thread_id: ThreadId,
        run_id: RunId,
        status: RunStatus,
    },
    RunError {
        thread_id: ThreadId,
        run_id: RunId,
        message: String,
        code: String,
    },
    ToolCallStarted {
        tool_call_id: ToolCallId,
        tool_name: String,
        message_id: MessageId,
    },
    ToolCallArguments {
        tool_call_id: ToolCallId,
        args_json: String,
    },
    ToolCallEnded {
        tool_call_id: ToolCallId,
    },
    ToolCallResult {
        message_id: MessageId,
        tool_call_id: ToolCallId,
        result_json: String,
    },
    TextMessageStarted {
        message_id: MessageId,
        role: MessageRole,
    },
    TextMessageContent {
        message_id: MessageId,
        delta: String,
    },
    TextMessageEnded {
        message_id: MessageId,
    },
    /// Open informational variant (e.g. the busy notification).
    Custom {
        message: String,
    },
}

impl RunEventKind {
    /// The kebab-case tag used on the wire and in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            RunEventKind::RunStarted { .. } => "run-started",
            RunEventKind::RunFinished { .. } => "run-finished",
            RunEventKind::RunError { .. } => "run-error",
            RunEventKind::ToolCallStarted { .. } => "tool-call-started",
            RunEventKind::ToolCallArguments { .. } => "tool-call-arguments",
            RunEventKind::ToolCallEnded { .. } => "tool-call-ended",
            RunEventKind::ToolCallResult { .. } => "tool-call-result",
            RunEventKind::TextMessageStarted { .. } => "text-message-started",
            RunEventKind::TextMessageContent { .. } => "text-message-content",
            RunEventKind::TextMessageEnded { .. } => "text-message-ended",
            RunEventKind::Custom { .. } => "custom",
        }
    }

    /// Returns true if this event terminates a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunEventKind::RunFinished { .. })
    }

    /// The tool-call correlation id, if this event belongs to one.
    pub fn tool_call_id(&self) -> Option<&ToolCallId> {
        match self {
            RunEventKind::ToolCallStarted { tool_call_id, .. }
            | RunEventKind::ToolCallArguments { tool_call_id, .. }
            | RunEventKind::ToolCallEnded { tool_call_id }
            | RunEventKind::ToolCallResult { tool_call_id, .. } => Some(tool_call_id),
            _ => None,
        }
    }
}

/// A timestamped run event.
///
/// The timestamp is supplied by the emitter (RFC3339); the domain type
/// does not read a clock itself, which keeps event construction
/// deterministic under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvent {
    pub timestamp: String,
    #[serde(flatten)]
    pub kind: RunEventKind,
}

impl RunEvent {
    pub fn new(timestamp: impl Into<String>, kind: RunEventKind) -> Self {
        Self {
            timestamp: timestamp.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kebab_case_kind_tag() {
        let event = RunEvent::new(
            "2026-01-01T00:00:00.000Z",
            RunEventKind::RunStarted {
                thread_id: ThreadId::from("thread-1"),
                run_id: RunId::from("run-2"),
            },
        );

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["kind"], "run-started");
        assert_eq!(value["thread_id"], "thread-1");
        assert_eq!(value["run_id"], "run-2");
        assert_eq!(value["timestamp"], "2026-01-01T00:00:00.000Z");
    }

    #[test]
    fn status_serializes_lowercase() {
        let kind = RunEventKind::RunFinished {
            thread_id: ThreadId::from("thread-1"),
            run_id: RunId::from("run-2"),
            status: RunStatus::Completed,
        };
        let value = serde_json::to_value(&kind).unwrap();
        assert_eq!(value["status"], "completed");
        assert!(kind.is_terminal());
    }

    #[test]
    fn kind_names_match_wire_tags() {
        let kind = RunEventKind::ToolCallResult {
            message_id: MessageId::from("msg-1"),
            tool_call_id: ToolCallId::from("call-1"),
            result_json: "{}".to_string(),
        };
        let value = serde_json::to_value(&kind).unwrap();
        assert_eq!(value["kind"], kind.name());
    }

    #[test]
    fn tool_call_id_accessor_covers_call_events_only() {
        let id = ToolCallId::from("call-9");
        let ended = RunEventKind::ToolCallEnded {
            tool_call_id: id.clone(),
        };
        assert_eq!(ended.tool_call_id(), Some(&id));

        let custom = RunEventKind::Custom {
            message: "busy".to_string(),
        };
        assert_eq!(custom.tool_call_id(), None);
    }

    #[test]
    fn roundtrips_through_serde() {
        let event = RunEvent::new(
            "2026-01-01T00:00:00.000Z",
            RunEventKind::TextMessageContent {
                message_id: MessageId::from("msg-4"),
                delta: " world".to_string(),
            },
        );
        let json = serde_json::to_string(&event).unwrap();
        let back: RunEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
