//! Intent resolution strategies
//!
//! - [`local`]: deterministic keyword/pattern rules, no I/O
//! - [`remote`]: model-based function calling over the completion port
//! - [`fallback`]: combinator degrading remote failures to the local path

pub mod fallback;
pub mod local;
pub mod remote;
