//! Port for structured diagnostics.
//!
//! Captures machine-readable operational events (resolver fallbacks,
//! summary degradations) separately from the run event stream and from
//! `tracing`'s human-readable messages. The run orchestrator and the
//! fallback combinator write here so silent recoveries stay observable.

use serde_json::Value;

/// A structured diagnostic event.
pub struct DiagnosticEvent {
    /// Event type identifier (e.g., "resolver_fallback").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DiagnosticEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording diagnostic events.
///
/// `record` is intentionally synchronous and non-fallible so diagnostics
/// can never disrupt a run; write failures are silently ignored by
/// implementations.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: DiagnosticEvent);
}

/// No-op implementation for tests and when diagnostics are disabled.
pub struct NoDiagnostics;

impl DiagnosticsSink for NoDiagnostics {
    fn record(&self, _event: DiagnosticEvent) {}
}
