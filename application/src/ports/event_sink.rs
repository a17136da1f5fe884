//! Event Sink port
//!
//! Consumers of the ordered run event stream (views, loggers) implement
//! [`EventSink`]. The orchestrator calls `on_event` once per emitted event,
//! in emission order; sinks must process events in receipt order and must
//! not fail; rendering errors are the sink's own responsibility and may
//! never abort a run.

use relay_domain::RunEvent;
use std::sync::{Arc, Mutex};

/// Port for consuming run events.
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: &RunEvent);
}

/// No-op sink for tests and headless runs.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn on_event(&self, _event: &RunEvent) {}
}

/// Delivers each event to every child sink, in child order.
///
/// This is how the demo drives its two independent views (technical event
/// log and chat transcript) plus the JSONL log from a single emission.
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn EventSink>>) -> Self {
        Self { sinks }
    }

    /// Append another consumer.
    pub fn push(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

impl EventSink for FanoutSink {
    fn on_event(&self, event: &RunEvent) {
        for sink in &self.sinks {
            sink.on_event(event);
        }
    }
}

/// Test sink that records every event it receives.
pub struct CollectingSink {
    events: Mutex<Vec<RunEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Copy of everything received so far, in receipt order.
    pub fn snapshot(&self) -> Vec<RunEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CollectingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for CollectingSink {
    fn on_event(&self, event: &RunEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_domain::RunEventKind;

    fn custom(message: &str) -> RunEvent {
        RunEvent::new(
            "2026-01-01T00:00:00Z",
            RunEventKind::Custom {
                message: message.to_string(),
            },
        )
    }

    #[test]
    fn fanout_delivers_to_all_children_in_order() {
        let a = Arc::new(CollectingSink::new());
        let b = Arc::new(CollectingSink::new());
        let fanout = FanoutSink::new(vec![a.clone(), b.clone()]);

        fanout.on_event(&custom("one"));
        fanout.on_event(&custom("two"));

        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
        assert_eq!(a.snapshot()[0], custom("one"));
        assert_eq!(b.snapshot()[1], custom("two"));
    }

    #[test]
    fn collecting_sink_snapshots_in_receipt_order() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());
        sink.on_event(&custom("first"));
        sink.on_event(&custom("second"));
        let events = sink.snapshot();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], custom("first"));
    }
}
