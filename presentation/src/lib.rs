//! Presentation layer for agent-relay
//!
//! Renders the run event stream into the demo's two independent views and
//! hosts the interactive chat REPL:
//!
//! - [`EventLogView`]: the technical view, one line per protocol event
//!   (written to stderr so it can be silenced or redirected separately)
//! - [`TranscriptView`]: the clean chat transcript with live streaming
//!   deltas (written to stdout)
//! - [`ChatRepl`]: readline loop with slash commands
//! - [`Cli`]: clap argument definitions for the binary

pub mod cli;
pub mod repl;
pub mod views;

pub use cli::Cli;
pub use repl::ChatRepl;
pub use views::{event_log::EventLogView, transcript::TranscriptView};
