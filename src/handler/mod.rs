//! Record handlers (sinks).
//!
//! # Responsibilities
//! - Decide whether a level is enabled
//! - Serialize a record and write it to the output
//!
//! # Design Decisions
//! - Handlers are shared behind `Arc<dyn Handler>` by every derived logger
//! - Writers sit behind a `Mutex`; a record is encoded into a buffer first and
//!   written with a single `write_all`, so concurrent records never interleave
//! - No buffering across records: every record is flushed when written

pub mod json;
pub mod text;
pub mod tracing_bridge;

pub use json::JsonHandler;
pub use text::TextHandler;
pub use tracing_bridge::TracingHandler;

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

use thiserror::Error;

use crate::record::{Level, Record};

/// A sink that filters and serializes records.
pub trait Handler: fmt::Debug + Send + Sync {
    /// Whether records at `level` would be written.
    fn enabled(&self, level: Level) -> bool;

    /// Serialize and write one record.
    fn handle(&self, record: &Record) -> Result<(), HandlerError>;
}

/// Errors raised while writing a record.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("writer lock poisoned")]
    Poisoned,
}

/// Top-level field names written by the handlers themselves.
pub const RESERVED_KEYS: [&str; 4] = ["time", "level", "msg", "error"];

/// Prefix given to top-level attributes whose key is in [`RESERVED_KEYS`].
pub const RESERVED_PREFIX: &str = "!RESERVED:";

/// Options shared by the writer-backed handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerOptions {
    /// Lowest level the handler writes.
    pub level: Level,
    /// Emit the `time` field.
    pub timestamps: bool,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            timestamps: true,
        }
    }
}

/// Handler that drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardHandler;

impl Handler for DiscardHandler {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn handle(&self, _record: &Record) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// Mutex-guarded writer shared by the JSON and text handlers.
pub(crate) struct LockedWriter<W> {
    inner: Mutex<W>,
}

impl<W: Write> LockedWriter<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// Write one encoded line and flush.
    pub(crate) fn write_line(&self, line: &[u8]) -> Result<(), HandlerError> {
        let mut writer = self.inner.lock().map_err(|_| HandlerError::Poisoned)?;
        writer.write_all(line)?;
        writer.flush()?;
        Ok(())
    }
}

impl<W> fmt::Debug for LockedWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockedWriter")
            .field("writer", &std::any::type_name::<W>())
            .finish()
    }
}

/// Timestamp format shared by the writer-backed handlers.
pub(crate) fn format_time(record: &Record) -> String {
    record
        .time
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
