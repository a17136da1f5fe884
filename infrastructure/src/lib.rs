//! Infrastructure layer for agent-relay
//!
//! Concrete adapters for the application layer's ports:
//!
//! - [`registry::InMemoryToolRegistry`]: the name-keyed tool map
//! - [`tools`]: the demo portfolio toolset
//! - [`completion::HttpCompletionClient`]: the remote function-calling service
//! - [`config`]: figment-based configuration and credential storage
//! - [`logging::JsonlEventLogger`]: append-only JSONL event log

pub mod completion;
pub mod config;
pub mod logging;
pub mod registry;
pub mod tools;

pub use completion::HttpCompletionClient;
pub use config::{ApiConfig, ConfigLoader, RelayConfig};
pub use logging::JsonlEventLogger;
pub use registry::InMemoryToolRegistry;
pub use tools::portfolio::{SharedPortfolio, register_portfolio_tools};
