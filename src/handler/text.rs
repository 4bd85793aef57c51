//! Logfmt text handler.

use std::fmt;
use std::fmt::Write as _;
use std::io::{self, Stdout, Write};

use crate::handler::{format_time, Handler, HandlerError, HandlerOptions, LockedWriter};
use crate::record::{Attr, Level, Record, Value};

/// Writes one `key=value` line per record.
///
/// Group members are dot-prefixed (`svc.id=1`). Repeated keys are kept,
/// including attributes named like the record's own fields. Keys and values
/// containing spaces, quotes, `=` or control characters are quoted.
pub struct TextHandler<W> {
    writer: LockedWriter<W>,
    options: HandlerOptions,
}

impl<W> fmt::Debug for TextHandler<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextHandler")
            .field("writer", &self.writer)
            .field("options", &self.options)
            .finish()
    }
}

impl<W: Write + Send> TextHandler<W> {
    pub fn new(writer: W, options: HandlerOptions) -> Self {
        Self {
            writer: LockedWriter::new(writer),
            options,
        }
    }

    /// Encode a record without writing it.
    pub fn encode(&self, record: &Record) -> String {
        let mut line = String::new();
        if self.options.timestamps {
            push_pair(&mut line, "time", &format_time(record));
        }
        push_pair(&mut line, "level", record.level.as_str());
        push_pair(&mut line, "msg", &record.message);
        if let Some(error) = &record.error {
            push_pair(&mut line, "error", error);
        }
        render_attrs(&mut line, "", &record.attrs);
        line.push('\n');
        line
    }
}

impl TextHandler<Stdout> {
    /// Text handler on stdout with default options.
    pub fn stdout() -> Self {
        Self::new(io::stdout(), HandlerOptions::default())
    }
}

impl<W: Write + Send> Handler for TextHandler<W> {
    fn enabled(&self, level: Level) -> bool {
        level >= self.options.level
    }

    fn handle(&self, record: &Record) -> Result<(), HandlerError> {
        let line = self.encode(record);
        self.writer.write_line(line.as_bytes())
    }
}

/// Append attributes as logfmt pairs, flattening groups into dotted keys.
pub(crate) fn render_attrs(out: &mut String, prefix: &str, attrs: &[Attr]) {
    for attr in attrs {
        let key = if prefix.is_empty() {
            attr.key.clone()
        } else {
            format!("{}.{}", prefix, attr.key)
        };
        match &attr.value {
            Value::Group(inner) => render_attrs(out, &key, inner),
            value => push_pair(out, &key, &value.to_string()),
        }
    }
}

pub(crate) fn push_pair(out: &mut String, key: &str, value: &str) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push(' ');
    }
    if needs_quoting(key) {
        let _ = write!(out, "{:?}", key);
    } else {
        out.push_str(key);
    }
    out.push('=');
    if needs_quoting(value) {
        let _ = write!(out, "{:?}", value);
    } else {
        out.push_str(value);
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '"' || c == '=')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SharedBuffer;
    use std::time::Duration;

    fn handler(buf: &SharedBuffer) -> TextHandler<SharedBuffer> {
        TextHandler::new(
            buf.clone(),
            HandlerOptions {
                timestamps: false,
                ..HandlerOptions::default()
            },
        )
    }

    #[test]
    fn test_text_line() {
        let buf = SharedBuffer::default();
        let record = Record::new(
            Level::Info,
            "Application started",
            vec![Attr::new("port", 8080), Attr::new("app", "demo")],
        );
        handler(&buf).handle(&record).unwrap();
        assert_eq!(
            buf.contents(),
            "level=INFO msg=\"Application started\" port=8080 app=demo\n"
        );
    }

    #[test]
    fn test_groups_are_dotted() {
        let buf = SharedBuffer::default();
        let record = Record::new(
            Level::Warn,
            "x",
            vec![Attr::group(
                "svc",
                vec![Attr::new("id", 1), Attr::new("took", Duration::from_millis(5))],
            )],
        )
        .with_error(Some("boom".into()));
        handler(&buf).handle(&record).unwrap();
        assert_eq!(buf.contents(), "level=WARN msg=x error=boom svc.id=1 svc.took=5ms\n");
    }

    #[test]
    fn test_keys_are_quoted() {
        let buf = SharedBuffer::default();
        let record = Record::new(
            Level::Info,
            "x",
            vec![
                Attr::new("a b=c", "v"),
                Attr::group("g x", vec![Attr::new("k", 1)]),
            ],
        );
        handler(&buf).handle(&record).unwrap();
        assert_eq!(
            buf.contents(),
            "level=INFO msg=x \"a b=c\"=v \"g x.k\"=1\n"
        );
    }

    #[test]
    fn test_reserved_names_are_kept_alongside() {
        let buf = SharedBuffer::default();
        let record = Record::new(
            Level::Error,
            "write failed",
            vec![Attr::new("error", "shadow"), Attr::new("level", "DEBUG")],
        )
        .with_error(Some("disk full".into()));
        handler(&buf).handle(&record).unwrap();
        assert_eq!(
            buf.contents(),
            "level=ERROR msg=\"write failed\" error=\"disk full\" error=shadow level=DEBUG\n"
        );
    }

    #[test]
    fn test_quoting() {
        assert!(needs_quoting(""));
        assert!(needs_quoting("a b"));
        assert!(needs_quoting("a=b"));
        assert!(!needs_quoting("/api/users"));
    }
}
