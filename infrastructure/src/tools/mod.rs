//! Demo toolset
//!
//! The portfolio tools every demo session registers at startup.

pub mod portfolio;
