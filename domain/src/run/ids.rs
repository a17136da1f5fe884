//! Correlation identifiers tying related run events together.
//!
//! Each identifier is generated fresh per run (or per tool call / message)
//! and has no meaning beyond a single run's lifetime. Generation itself is
//! behind the application layer's `IdSource` port so tests can supply
//! deterministic values.

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(
    /// Identifies the conversation thread a run belongs to.
    ThreadId
);
id_newtype!(
    /// Identifies one run (one processed prompt).
    RunId
);
id_newtype!(
    /// Identifies one tool invocation within a run.
    ToolCallId
);
id_newtype!(
    /// Identifies one rendered message (tool activity or assistant text).
    MessageId
);
