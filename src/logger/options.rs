//! Construction options for [`Logger::new`](crate::Logger::new).
//!
//! Options are applied strictly in the order passed. Attribute order is
//! observable in output, so `with_default_attrs` placed after `with_group`
//! nests under that group while placed before it does not.

use std::fmt;
use std::sync::Arc;

use crate::handler::Handler;
use crate::record::{Level, Value};

/// A single construction option.
#[derive(Clone)]
pub enum LoggerOption {
    /// Replace the handler.
    Handler(Arc<dyn Handler>),
    /// Replace the minimum level.
    Level(Level),
    /// Append default attributes from a flat key/value list.
    DefaultAttrs(Vec<Value>),
    /// Push a group onto the initial group path.
    Group(String),
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerOption::Handler(h) => f.debug_tuple("Handler").field(h).finish(),
            LoggerOption::Level(l) => f.debug_tuple("Level").field(l).finish(),
            LoggerOption::DefaultAttrs(kv) => f.debug_tuple("DefaultAttrs").field(kv).finish(),
            LoggerOption::Group(g) => f.debug_tuple("Group").field(g).finish(),
        }
    }
}

pub fn with_handler(handler: impl Handler + 'static) -> LoggerOption {
    LoggerOption::Handler(Arc::new(handler))
}

pub fn with_level(level: Level) -> LoggerOption {
    LoggerOption::Level(level)
}

/// Append default attributes. Malformed lists degrade to `!BADKEY`.
pub fn with_default_attrs(key_values: impl IntoIterator<Item = Value>) -> LoggerOption {
    LoggerOption::DefaultAttrs(key_values.into_iter().collect())
}

pub fn with_group(name: impl Into<String>) -> LoggerOption {
    LoggerOption::Group(name.into())
}
