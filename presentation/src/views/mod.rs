//! Event sink implementations rendering the run protocol

pub mod event_log;
pub mod transcript;
