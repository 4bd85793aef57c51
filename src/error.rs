//! Facade error types.

use thiserror::Error;

use crate::handler::HandlerError;

/// Errors surfaced by the logger facade.
#[derive(Debug, Error)]
pub enum LogError {
    /// A flat key/value list had an odd number of elements.
    #[error("key/value list has odd length {len}")]
    OddKeyValues { len: usize },

    /// A non-string value sat in key position.
    #[error("key/value list has a non-string key at index {index}")]
    NonStringKey { index: usize },

    /// A level name did not match any known level.
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    /// The handler failed to write the record.
    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),
}
