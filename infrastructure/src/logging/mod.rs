//! Structured logging adapters

pub mod jsonl;

pub use jsonl::JsonlEventLogger;
