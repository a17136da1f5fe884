//! Remote completion service adapter
//!
//! - [`protocol`]: the chat-completions wire format (requests, choices,
//!   function-call directives)
//! - [`client`]: the reqwest-backed [`HttpCompletionClient`]

pub mod client;
pub mod protocol;

pub use client::HttpCompletionClient;
