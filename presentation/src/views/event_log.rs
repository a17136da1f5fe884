//! Technical event view.
//!
//! One line per protocol event: timestamp, kind tag, correlation ids, and
//! a payload preview. Written to stderr so the clean transcript on stdout
//! stays usable in pipelines (`agent-relay "..." 2>/dev/null`).

use colored::Colorize;
use relay_application::EventSink;
use relay_domain::{RunEvent, RunEventKind};

const PREVIEW_CHARS: usize = 96;

/// The technical view of the run protocol.
pub struct EventLogView;

impl EventLogView {
    pub fn new() -> Self {
        Self
    }

    /// Render one event as a log line.
    pub fn format_line(event: &RunEvent) -> String {
        let kind = event.kind.name();
        let tag = match &event.kind {
            RunEventKind::RunError { .. } => kind.red().bold(),
            RunEventKind::RunStarted { .. } | RunEventKind::RunFinished { .. } => {
                kind.cyan().bold()
            }
            RunEventKind::ToolCallStarted { .. }
            | RunEventKind::ToolCallArguments { .. }
            | RunEventKind::ToolCallEnded { .. }
            | RunEventKind::ToolCallResult { .. } => kind.yellow(),
            RunEventKind::Custom { .. } => kind.magenta(),
            _ => kind.green(),
        };

        format!(
            "{} {:<24} {}",
            format!("[{}]", clock_part(&event.timestamp)).dimmed(),
            tag,
            details(&event.kind),
        )
    }
}

impl Default for EventLogView {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventLogView {
    fn on_event(&self, event: &RunEvent) {
        eprintln!("{}", Self::format_line(event));
    }
}

/// Time-of-day portion of an RFC3339 timestamp.
fn clock_part(timestamp: &str) -> &str {
    timestamp
        .split_once('T')
        .map(|(_, time)| time.trim_end_matches('Z'))
        .unwrap_or(timestamp)
}

fn details(kind: &RunEventKind) -> String {
    match kind {
        RunEventKind::RunStarted { thread_id, run_id } => {
            format!("thread={thread_id} run={run_id}")
        }
        RunEventKind::RunFinished { run_id, status, .. } => {
            format!("run={run_id} status={status}")
        }
        RunEventKind::RunError {
            run_id,
            message,
            code,
            ..
        } => format!("run={run_id} code={code} {message}"),
        RunEventKind::ToolCallStarted {
            tool_call_id,
            tool_name,
            message_id,
        } => format!("call={tool_call_id} tool={tool_name} msg={message_id}"),
        RunEventKind::ToolCallArguments {
            tool_call_id,
            args_json,
        } => format!("call={tool_call_id} args={}", preview(args_json)),
        RunEventKind::ToolCallEnded { tool_call_id } => format!("call={tool_call_id}"),
        RunEventKind::ToolCallResult {
            tool_call_id,
            result_json,
            ..
        } => format!("call={tool_call_id} result={}", preview(result_json)),
        RunEventKind::TextMessageStarted { message_id, .. } => {
            format!("msg={message_id} role=assistant")
        }
        RunEventKind::TextMessageContent { message_id, delta } => {
            format!("msg={message_id} delta={delta:?}")
        }
        RunEventKind::TextMessageEnded { message_id } => format!("msg={message_id}"),
        RunEventKind::Custom { message } => message.clone(),
    }
}

fn preview(json: &str) -> String {
    if json.chars().count() <= PREVIEW_CHARS {
        json.to_string()
    } else {
        let mut preview: String = json.chars().take(PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_domain::{RunId, ThreadId, ToolCallId};

    #[test]
    fn line_carries_clock_kind_and_ids() {
        let event = RunEvent::new(
            "2026-01-01T12:30:00.123Z",
            RunEventKind::RunStarted {
                thread_id: ThreadId::from("thread-1"),
                run_id: RunId::from("run-2"),
            },
        );

        let line = EventLogView::format_line(&event);
        assert!(line.contains("12:30:00.123"));
        assert!(line.contains("run-started"));
        assert!(line.contains("thread=thread-1"));
        assert!(line.contains("run=run-2"));
    }

    #[test]
    fn long_result_payloads_are_previewed() {
        let event = RunEvent::new(
            "2026-01-01T00:00:00Z",
            RunEventKind::ToolCallResult {
                message_id: "msg-1".into(),
                tool_call_id: ToolCallId::from("call-1"),
                result_json: "x".repeat(300),
            },
        );

        let line = EventLogView::format_line(&event);
        assert!(line.contains("..."));
        assert!(line.len() < 300);
    }
}
