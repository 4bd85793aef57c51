//! The logger facade.
//!
//! # Data Flow
//! ```text
//! Logger::new(options)          (options applied in order)
//!     → with / with_attrs       (append default attrs under the group path)
//!     → group                   (push a group name)
//!     → debug/info/warn/error   (pair call args, nest, build Record)
//!     → Handler::handle
//! ```
//!
//! # Design Decisions
//! - Copy-on-derive: derivation takes `&self` and returns a new `Logger`;
//!   derived loggers share only the handler `Arc`
//! - Default attributes are stored already nested, so attributes attached
//!   before a `group` call stay outside it
//! - Groups nest and join with `.`: `group("a").group("b")` places later
//!   attributes at `a.b.*`
//! - Level methods never fail; handler errors are reported through `tracing`

pub mod options;

pub use options::{with_default_attrs, with_group, with_handler, with_level, LoggerOption};

use std::error::Error as StdError;
use std::sync::Arc;

use crate::config::{ConfigError, LogConfig};
use crate::error::LogError;
use crate::handler::{DiscardHandler, Handler, JsonHandler};
use crate::record::attr::{nest, try_pair_key_values};
use crate::record::{pair_key_values, Attr, Level, Record, Value};

/// A structured logger carrying a handler, a minimum level, default
/// attributes and a group path.
#[derive(Debug, Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    level: Level,
    attrs: Vec<Attr>,
    groups: Vec<String>,
}

impl Logger {
    /// Build a logger from options applied in the order given.
    ///
    /// Handler and level options replace earlier ones, default attributes
    /// accumulate, groups nest. Without a handler option records go to stdout
    /// as JSON; without a level option the minimum level is `Info`.
    pub fn new(options: impl IntoIterator<Item = LoggerOption>) -> Self {
        let mut handler: Option<Arc<dyn Handler>> = None;
        let mut logger = Logger {
            handler: Arc::new(DiscardHandler),
            level: Level::Info,
            attrs: Vec::new(),
            groups: Vec::new(),
        };

        for option in options {
            match option {
                LoggerOption::Handler(h) => handler = Some(h),
                LoggerOption::Level(level) => logger.level = level,
                LoggerOption::DefaultAttrs(args) => logger = logger.with(args),
                LoggerOption::Group(name) => logger = logger.group(name),
            }
        }

        logger.handler = handler.unwrap_or_else(|| Arc::new(JsonHandler::stdout()));
        logger
    }

    /// Build a logger from a validated configuration.
    pub fn from_config(config: &LogConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.to_options()?))
    }

    /// Derive a logger with extra default attributes from a flat key/value
    /// list. Malformed entries degrade to `!BADKEY` attributes.
    pub fn with(&self, key_values: impl IntoIterator<Item = Value>) -> Logger {
        self.with_attrs(pair_key_values(key_values))
    }

    /// Like [`Logger::with`], but rejects odd-length lists and non-string keys.
    pub fn try_with(&self, key_values: impl IntoIterator<Item = Value>) -> Result<Logger, LogError> {
        Ok(self.with_attrs(try_pair_key_values(key_values)?))
    }

    /// Derive a logger with extra typed default attributes.
    pub fn with_attrs(&self, attrs: impl IntoIterator<Item = Attr>) -> Logger {
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        let mut child = self.clone();
        if !attrs.is_empty() {
            child.attrs.extend(nest(&self.groups, attrs));
        }
        child
    }

    /// Derive a logger whose later attributes nest under `name`.
    ///
    /// An empty name returns an unchanged copy.
    pub fn group(&self, name: impl Into<String>) -> Logger {
        let name = name.into();
        let mut child = self.clone();
        if !name.is_empty() {
            child.groups.push(name);
        }
        child
    }

    /// Dot-joined group path, if any.
    pub fn group_prefix(&self) -> Option<String> {
        if self.groups.is_empty() {
            None
        } else {
            Some(self.groups.join("."))
        }
    }

    /// Default attributes, nested as they will be emitted.
    pub fn default_attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Minimum level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Shared handler.
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Whether a record at `level` would reach the handler.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level && self.handler.enabled(level)
    }

    pub fn debug(&self, message: &str, key_values: impl IntoIterator<Item = Value>) {
        self.emit(Level::Debug, message, None, key_values);
    }

    pub fn info(&self, message: &str, key_values: impl IntoIterator<Item = Value>) {
        self.emit(Level::Info, message, None, key_values);
    }

    pub fn warn(&self, message: &str, key_values: impl IntoIterator<Item = Value>) {
        self.emit(Level::Warn, message, None, key_values);
    }

    /// Emit at `Error`, recording `err`'s message under the reserved `error`
    /// field.
    pub fn error(
        &self,
        message: &str,
        err: &(dyn StdError + '_),
        key_values: impl IntoIterator<Item = Value>,
    ) {
        self.emit(Level::Error, message, Some(err), key_values);
    }

    /// Emit one record, returning handler failures to the caller.
    pub fn log(
        &self,
        level: Level,
        message: &str,
        err: Option<&(dyn StdError + '_)>,
        key_values: impl IntoIterator<Item = Value>,
    ) -> Result<(), LogError> {
        if !self.enabled(level) {
            return Ok(());
        }

        let call_attrs = pair_key_values(key_values);
        let mut attrs = self.attrs.clone();
        if !call_attrs.is_empty() {
            attrs.extend(nest(&self.groups, call_attrs));
        }

        let record = Record::new(level, message, attrs).with_error(err.map(|e| e.to_string()));
        self.handler.handle(&record)?;
        Ok(())
    }

    fn emit(
        &self,
        level: Level,
        message: &str,
        err: Option<&(dyn StdError + '_)>,
        key_values: impl IntoIterator<Item = Value>,
    ) {
        if let Err(e) = self.log(level, message, err, key_values) {
            tracing::error!(target: "ctxlog", error = %e, level = %level, "Failed to write log record");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new([])
    }
}
