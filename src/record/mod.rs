//! Log record model.
//!
//! # Data Flow
//! ```text
//! call site (message + flat key/values)
//!     → attr.rs (pairing into Attr, !BADKEY degradation)
//!     → Logger (prepends default attrs, nests under group path)
//!     → Record (level, message, error, attrs)
//!     → Handler (filter + serialize)
//! ```
//!
//! # Design Decisions
//! - Values are a closed enum, no runtime type inspection
//! - The error message is a distinguished field, never an attribute
//! - Records are built per call and dropped after the handler returns

pub mod attr;
pub mod level;
pub mod value;

pub use attr::{pair_key_values, Attr, BAD_KEY};
pub use level::Level;
pub use value::Value;

use chrono::{DateTime, Utc};

/// A single structured log record handed to a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Wall-clock time the record was created.
    pub time: DateTime<Utc>,
    /// Severity.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
    /// Message of the error passed to `Logger::error`, if any.
    pub error: Option<String>,
    /// Attributes in emission order, groups already nested.
    pub attrs: Vec<Attr>,
}

impl Record {
    /// Create a record stamped with the current time.
    pub fn new(level: Level, message: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            time: Utc::now(),
            level,
            message: message.into(),
            error: None,
            attrs,
        }
    }

    /// Attach an error message under the reserved `error` field.
    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}
