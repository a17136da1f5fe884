//! Pacing policy for streamed response text.
//!
//! The visible streaming effect comes from a brief pause between text
//! deltas. The pause is a strategy object injected into the orchestrator
//! so production code sleeps on the runtime timer (a suspension point,
//! never busy-waiting) while tests use [`NoPacing`] to run at full speed.

use async_trait::async_trait;
use std::time::Duration;

/// Controls the delay between consecutive `text-message-content` deltas.
#[async_trait]
pub trait PacingPolicy: Send + Sync {
    /// Suspend for one inter-chunk pause.
    async fn pause(&self);
}

/// Fixed delay between chunks.
pub struct FixedDelayPacing {
    delay: Duration,
}

impl FixedDelayPacing {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }
}

#[async_trait]
impl PacingPolicy for FixedDelayPacing {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Zero-delay policy for tests.
pub struct NoPacing;

#[async_trait]
impl PacingPolicy for NoPacing {
    async fn pause(&self) {}
}
