//! Tool domain model
//!
//! - [`entities`]: tool definitions, parameter schemas, and call requests
//! - [`value_objects`]: execution results and error descriptors

pub mod entities;
pub mod value_objects;
