//! Correlation identifier generation.
//!
//! Injected into the orchestrator as a dependency so tests get
//! deterministic ids. Identifiers only need to be unique within the
//! process; they carry no meaning beyond a single run's lifetime.

use relay_domain::{MessageId, RunId, ThreadId, ToolCallId};
use std::sync::atomic::{AtomicU64, Ordering};

/// Port for generating fresh correlation identifiers.
pub trait IdSource: Send + Sync {
    fn thread_id(&self) -> ThreadId;
    fn run_id(&self) -> RunId;
    fn tool_call_id(&self) -> ToolCallId;
    fn message_id(&self) -> MessageId;
}

/// Monotonic counter-based id source.
///
/// Produces `thread-1`, `run-2`, `call-3`, ... from one shared counter,
/// which makes event transcripts stable and assertable in tests.
pub struct SequentialIdSource {
    counter: AtomicU64,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for SequentialIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIdSource {
    fn thread_id(&self) -> ThreadId {
        ThreadId::new(format!("thread-{}", self.next()))
    }

    fn run_id(&self) -> RunId {
        RunId::new(format!("run-{}", self.next()))
    }

    fn tool_call_id(&self) -> ToolCallId {
        ToolCallId::new(format!("call-{}", self.next()))
    }

    fn message_id(&self) -> MessageId {
        MessageId::new(format!("msg-{}", self.next()))
    }
}
