//! Demo portfolio state
//!
//! The in-memory application state the bundled tools operate on. Mutated
//! exclusively by tool executables; because at most one run (and thus at
//! most one tool execution) is in flight, no locking is required beyond
//! the single-run invariant itself.

pub mod entities;
pub mod strategy;
