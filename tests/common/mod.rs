//! Shared utilities for integration tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use ctxlog::{with_handler, HandlerOptions, JsonHandler, Logger, LoggerOption, TextHandler};

/// A cloneable in-memory writer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Each written line parsed as JSON.
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.contents()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Handler options without timestamps, for exact output comparisons.
pub fn untimed() -> HandlerOptions {
    HandlerOptions {
        timestamps: false,
        ..HandlerOptions::default()
    }
}

/// A JSON logger writing into a fresh buffer, with extra options appended.
pub fn json_logger(options: Vec<LoggerOption>) -> (Logger, SharedBuffer) {
    let buf = SharedBuffer::default();
    let mut all = vec![with_handler(JsonHandler::new(buf.clone(), untimed()))];
    all.extend(options);
    (Logger::new(all), buf)
}

/// A text logger writing into a fresh buffer.
#[allow(dead_code)]
pub fn text_logger(options: Vec<LoggerOption>) -> (Logger, SharedBuffer) {
    let buf = SharedBuffer::default();
    let mut all = vec![with_handler(TextHandler::new(buf.clone(), untimed()))];
    all.extend(options);
    (Logger::new(all), buf)
}
