//! Application layer for agent-relay
//!
//! Ports (abstract interfaces to collaborators) and the two pieces of real
//! control flow: intent resolution and the run orchestrator.
//!
//! # Architecture
//!
//! ```text
//! prompt ──▶ IntentResolver ──▶ [ToolCall] ──▶ AgentRuntime
//!                                                 │
//!                              ToolRegistry ◀─────┤ executes each call once
//!                              EventSink    ◀─────┘ ordered RunEvent stream
//! ```
//!
//! Adapters for the ports live in `relay-infrastructure`; renderers for the
//! event stream live in `relay-presentation`.

pub mod ports;
pub mod resolver;
pub mod runtime;

// Re-export the primary surface
pub use ports::{
    completion::{CompletionClient, CompletionError, ToolDirective},
    diagnostics::{DiagnosticEvent, DiagnosticsSink, NoDiagnostics},
    event_sink::{CollectingSink, EventSink, FanoutSink, NullEventSink},
    id_source::{IdSource, SequentialIdSource},
    pacing::{FixedDelayPacing, NoPacing, PacingPolicy},
    registry::{ToolExecutable, ToolRegistry},
    resolver::{IntentResolver, ResolverError},
};
pub use resolver::{
    fallback::FallbackResolver,
    local::RuleResolver,
    remote::{ModelResolver, capability_schema},
};
pub use runtime::process_prompt::{AgentRuntime, RunOutcome, RunRejected};
