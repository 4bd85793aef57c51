//! Structured logging facade with default attributes, groups and
//! context-scoped logger propagation.
//!
//! # Architecture Overview
//!
//! ```text
//!   Logger::new(options) ──▶ Logger ──with/group──▶ Logger (copy-on-derive)
//!                              │
//!                              │ debug/info/warn/error
//!                              ▼
//!                           Record ──▶ Handler (json | text | tracing)
//!
//!   to_context(ctx, logger) ──▶ Context ──from_context──▶ Logger
//! ```
//!
//! ```no_run
//! use ctxlog::{kv, Context, Logger, to_context, from_context};
//!
//! let logger = Logger::default().group("user-service");
//! logger.with(kv!["user_id", 456]).info("Processing user request", kv![]);
//!
//! let ctx = to_context(&Context::background(), logger);
//! from_context(&ctx).warn("Message using logger from context", kv!["retry", true]);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod logger;
pub mod observability;
pub mod record;

#[cfg(test)]
pub(crate) mod testing;

pub use config::LogConfig;
pub use context::{from_context, to_context, Context};
pub use error::LogError;
pub use handler::{DiscardHandler, Handler, HandlerOptions, JsonHandler, TextHandler, TracingHandler};
pub use logger::{with_default_attrs, with_group, with_handler, with_level, Logger, LoggerOption};
pub use record::{Attr, Level, Record, Value, BAD_KEY};

/// Build a flat key/value list of [`Value`]s.
///
/// ```
/// use ctxlog::{kv, Value};
///
/// let args = kv!["user_id", 123, "action", "login"];
/// assert_eq!(args[1], Value::Int(123));
/// assert!(kv![].is_empty());
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}
