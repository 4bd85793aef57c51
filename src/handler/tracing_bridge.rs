//! Bridge into the `tracing` ecosystem.
//!
//! Records become `tracing` events on target `ctxlog`. `tracing` needs field
//! names at compile time, so the record's error and attributes are rendered
//! in logfmt under a single `attrs` field.

use crate::handler::text::{push_pair, render_attrs};
use crate::handler::{Handler, HandlerError};
use crate::record::{Level, Record};

/// Handler that re-emits records through the installed `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHandler;

impl TracingHandler {
    pub fn new() -> Self {
        Self
    }

    fn render(record: &Record) -> String {
        let mut out = String::new();
        if let Some(error) = &record.error {
            push_pair(&mut out, "error", error);
        }
        render_attrs(&mut out, "", &record.attrs);
        out
    }
}

impl Handler for TracingHandler {
    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Debug => tracing::enabled!(target: "ctxlog", tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(target: "ctxlog", tracing::Level::INFO),
            Level::Warn => tracing::enabled!(target: "ctxlog", tracing::Level::WARN),
            Level::Error => tracing::enabled!(target: "ctxlog", tracing::Level::ERROR),
        }
    }

    fn handle(&self, record: &Record) -> Result<(), HandlerError> {
        let attrs = Self::render(record);
        let message = record.message.as_str();
        match record.level {
            Level::Debug => tracing::debug!(target: "ctxlog", attrs = %attrs, "{}", message),
            Level::Info => tracing::info!(target: "ctxlog", attrs = %attrs, "{}", message),
            Level::Warn => tracing::warn!(target: "ctxlog", attrs = %attrs, "{}", message),
            Level::Error => tracing::error!(target: "ctxlog", attrs = %attrs, "{}", message),
        }
        Ok(())
    }
}
