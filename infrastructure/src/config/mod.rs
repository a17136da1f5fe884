//! Configuration for agent-relay
//!
//! A small figment-merged TOML config. The API key doubles as the strategy
//! selector: with a key configured the resolver runs remotely (with local
//! fallback), without one it stays local.

pub mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub api: ApiConfig,
    pub streaming: StreamingConfig,
    pub log: LogConfig,
}

impl RelayConfig {
    /// Whether the remote strategy should be active.
    pub fn remote_enabled(&self) -> bool {
        !self.api.key.trim().is_empty()
    }
}

/// Remote completion service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API credential; empty means "local strategy only".
    pub key: String,
    pub base_url: String,
    pub model: String,
    /// Request timeout; an elapsed timeout counts as a failed call and
    /// triggers the local fallback.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Response streaming settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Pause between streamed response chunks, in milliseconds.
    pub chunk_delay_ms: u64,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self { chunk_delay_ms: 80 }
    }
}

/// Event log settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Where to append the JSONL event log; `None` disables it.
    pub events_path: Option<String>,
}
