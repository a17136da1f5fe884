//! Domain layer for agent-relay
//!
//! This crate contains the core entities and value objects of the agent
//! pipeline. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Run
//!
//! A run is one complete processing cycle for a single user prompt: the
//! prompt is resolved into tool calls, each call is executed exactly once,
//! and a strictly ordered sequence of [`RunEvent`]s describes what happened.
//!
//! ## Tool
//!
//! A tool is a named, independently invocable unit of application logic.
//! [`ToolDefinition`] carries the metadata advertised to the resolver;
//! the executable itself lives behind a port in the application layer.
//!
//! ## Portfolio
//!
//! The demo application state: an in-memory investment portfolio that the
//! bundled tools read and mutate.

pub mod portfolio;
pub mod run;
pub mod tool;

// Re-export commonly used types
pub use portfolio::{
    entities::{AssetClass, Holding, Portfolio},
    strategy::{Allocation, AllocationStrategy},
};
pub use run::{
    events::{MessageRole, RunEvent, RunEventKind, RunStatus},
    ids::{MessageId, RunId, ThreadId, ToolCallId},
};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolCallOutcome, ToolError, ToolResult},
};
