//! JSONL file writer for run events and diagnostics.
//!
//! Each run event is serialized as a single JSON line (its `kind` tag and
//! timestamp included); diagnostic events get a `type` field and a fresh
//! timestamp. Appended via a buffered writer, flushed per line so the log
//! survives crashes, flushed again on `Drop`.

use relay_application::{DiagnosticEvent, DiagnosticsSink, EventSink};
use relay_domain::RunEvent;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Append-only JSONL log implementing both [`EventSink`] and
/// [`DiagnosticsSink`], so run protocol and fallback diagnostics land in
/// one file in arrival order.
pub struct JsonlEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLogger {
    /// Create a logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create event log directory {}: {e}", parent.display());
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {e}", path.display());
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_value(&self, value: &serde_json::Value) {
        let Ok(line) = serde_json::to_string(value) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{line}");
            let _ = writer.flush();
        }
    }
}

impl EventSink for JsonlEventLogger {
    fn on_event(&self, event: &RunEvent) {
        if let Ok(value) = serde_json::to_value(event) {
            self.write_value(&value);
        }
    }
}

impl DiagnosticsSink for JsonlEventLogger {
    fn record(&self, event: DiagnosticEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let serde_json::Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        self.write_value(&record);
    }
}

impl Drop for JsonlEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_domain::{RunEventKind, RunId, ThreadId};

    #[test]
    fn writes_run_events_as_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = JsonlEventLogger::new(&path).unwrap();

        logger.on_event(&RunEvent::new(
            "2026-01-01T00:00:00.000Z",
            RunEventKind::RunStarted {
                thread_id: ThreadId::from("thread-1"),
                run_id: RunId::from("run-2"),
            },
        ));
        logger.on_event(&RunEvent::new(
            "2026-01-01T00:00:01.000Z",
            RunEventKind::Custom {
                message: "hello".to_string(),
            },
        ));
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["kind"], "run-started");
        assert_eq!(first["run_id"], "run-2");
        assert_eq!(first["timestamp"], "2026-01-01T00:00:00.000Z");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["kind"], "custom");
        assert_eq!(second["message"], "hello");
    }

    #[test]
    fn appends_across_logger_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        for n in 0..2 {
            let logger = JsonlEventLogger::new(&path).unwrap();
            logger.on_event(&RunEvent::new(
                "2026-01-01T00:00:00.000Z",
                RunEventKind::Custom {
                    message: format!("line {n}"),
                },
            ));
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim().lines().count(), 2);
    }

    #[test]
    fn records_diagnostics_with_type_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = JsonlEventLogger::new(&path).unwrap();

        logger.record(DiagnosticEvent::new(
            "resolver_fallback",
            serde_json::json!({ "error": "timeout" }),
        ));
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(value["type"], "resolver_fallback");
        assert_eq!(value["error"], "timeout");
        assert!(value.get("timestamp").is_some());
    }
}
