//! Clean chat transcript view.
//!
//! Suppresses protocol noise and renders what a chat user cares about:
//! tool activity markers, the assistant's reply streaming in as it is
//! generated, and error/busy notices. Deltas are printed without a
//! trailing newline and flushed so the streaming effect is visible.

use colored::Colorize;
use relay_application::EventSink;
use relay_domain::{RunEvent, RunEventKind};
use std::io::Write;

/// A renderable piece of transcript output.
#[derive(Debug, PartialEq)]
pub struct Fragment {
    pub text: String,
    /// Whether the fragment ends the current line.
    pub newline: bool,
}

impl Fragment {
    fn line(text: String) -> Self {
        Self {
            text,
            newline: true,
        }
    }

    fn partial(text: String) -> Self {
        Self {
            text,
            newline: false,
        }
    }
}

/// The clean chat view of the run protocol.
pub struct TranscriptView;

impl TranscriptView {
    pub fn new() -> Self {
        Self
    }

    /// Map one event to its transcript fragment, if it has one.
    pub fn render(kind: &RunEventKind) -> Option<Fragment> {
        match kind {
            RunEventKind::ToolCallStarted { tool_name, .. } => Some(Fragment::line(
                format!("  {} {}", "·".dimmed(), format!("calling {tool_name}...").dimmed()),
            )),
            RunEventKind::ToolCallResult { result_json, .. } => {
                Some(Fragment::line(result_marker(result_json)))
            }
            RunEventKind::TextMessageStarted { .. } => {
                Some(Fragment::partial(format!("{} ", "agent>".green().bold())))
            }
            RunEventKind::TextMessageContent { delta, .. } => {
                Some(Fragment::partial(delta.clone()))
            }
            RunEventKind::TextMessageEnded { .. } => Some(Fragment::line(String::new())),
            RunEventKind::RunError { message, .. } => {
                Some(Fragment::line(format!("{} {message}", "error:".red().bold())))
            }
            RunEventKind::Custom { message } => {
                Some(Fragment::line(message.yellow().to_string()))
            }
            _ => None,
        }
    }
}

impl Default for TranscriptView {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for TranscriptView {
    fn on_event(&self, event: &RunEvent) {
        let Some(fragment) = Self::render(&event.kind) else {
            return;
        };
        if fragment.newline {
            println!("{}", fragment.text);
        } else {
            print!("{}", fragment.text);
            let _ = std::io::stdout().flush();
        }
    }
}

/// One-line outcome marker under the tool activity line.
fn result_marker(result_json: &str) -> String {
    let failed = serde_json::from_str::<serde_json::Value>(result_json)
        .ok()
        .and_then(|value| value.get("success").and_then(|s| s.as_bool()))
        .is_some_and(|success| !success);

    if failed {
        let reason = serde_json::from_str::<serde_json::Value>(result_json)
            .ok()
            .and_then(|value| value.get("error").and_then(|e| e.as_str().map(String::from)))
            .unwrap_or_else(|| "tool failed".to_string());
        format!("  {} {}", "✗".red(), reason.red())
    } else {
        format!("  {} {}", "✓".green(), "done".dimmed())
    }
}
