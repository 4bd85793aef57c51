//! JSON lines handler.

use std::fmt;
use std::io::{self, Stdout, Write};

use crate::handler::{
    format_time, Handler, HandlerError, HandlerOptions, LockedWriter, RESERVED_KEYS, RESERVED_PREFIX,
};
use crate::record::{Attr, Level, Record};

/// Writes one JSON object per record.
///
/// Field order is `time`, `level`, `msg`, `error`, then attributes. Groups
/// become nested objects and a repeated key within one object keeps the last
/// value. A top-level attribute named like a reserved field is written as
/// `!RESERVED:<key>` so it never replaces the record's own fields.
pub struct JsonHandler<W> {
    writer: LockedWriter<W>,
    options: HandlerOptions,
}

impl<W> fmt::Debug for JsonHandler<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonHandler")
            .field("writer", &self.writer)
            .field("options", &self.options)
            .finish()
    }
}

impl<W: Write + Send> JsonHandler<W> {
    pub fn new(writer: W, options: HandlerOptions) -> Self {
        Self {
            writer: LockedWriter::new(writer),
            options,
        }
    }

    /// Encode a record without writing it.
    pub fn encode(&self, record: &Record) -> Result<Vec<u8>, HandlerError> {
        let mut map = serde_json::Map::new();
        if self.options.timestamps {
            map.insert("time".into(), format_time(record).into());
        }
        map.insert("level".into(), record.level.as_str().into());
        map.insert("msg".into(), record.message.clone().into());
        if let Some(error) = &record.error {
            map.insert("error".into(), error.clone().into());
        }
        for attr in &record.attrs {
            if RESERVED_KEYS.contains(&attr.key.as_str()) {
                Attr {
                    key: format!("{}{}", RESERVED_PREFIX, attr.key),
                    value: attr.value.clone(),
                }
                .merge_into(&mut map);
            } else {
                attr.merge_into(&mut map);
            }
        }

        let mut line = serde_json::to_vec(&serde_json::Value::Object(map))?;
        line.push(b'\n');
        Ok(line)
    }
}

impl JsonHandler<Stdout> {
    /// JSON handler on stdout with default options.
    pub fn stdout() -> Self {
        Self::new(io::stdout(), HandlerOptions::default())
    }
}

impl<W: Write + Send> Handler for JsonHandler<W> {
    fn enabled(&self, level: Level) -> bool {
        level >= self.options.level
    }

    fn handle(&self, record: &Record) -> Result<(), HandlerError> {
        let line = self.encode(record)?;
        self.writer.write_line(&line)
    }
}
