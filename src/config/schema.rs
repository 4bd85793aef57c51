//! Configuration schema definitions.

use std::fs::OpenOptions;
use std::io;

use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;
use crate::handler::{HandlerOptions, JsonHandler, TextHandler, TracingHandler};
use crate::logger::{with_default_attrs, with_group, with_handler, with_level, LoggerOption};
use crate::record::{Attr, Level, Value};

/// Environment variable overriding [`LogConfig::level`].
pub const LEVEL_ENV: &str = "CTXLOG_LEVEL";
/// Environment variable overriding [`LogConfig::format`].
pub const FORMAT_ENV: &str = "CTXLOG_FORMAT";

/// Root logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level.
    pub level: Level,

    /// Output format.
    pub format: LogFormat,

    /// Output target.
    pub output: LogOutput,

    /// Emit the `time` field.
    pub timestamps: bool,

    /// Initial group, applied after the default attributes.
    pub group: Option<String>,

    /// Attributes attached to every record, in file order.
    pub default_attrs: toml::Table,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: LogFormat::default(),
            output: LogOutput::default(),
            timestamps: true,
            group: None,
            default_attrs: toml::Table::new(),
        }
    }
}

/// Record serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines
    #[default]
    Json,
    /// logfmt text
    Text,
    /// Forward to the installed `tracing` subscriber
    Tracing,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            "tracing" => Ok(LogFormat::Tracing),
            other => Err(other.to_string()),
        }
    }
}

/// Output target for the JSON and text formats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    /// Append to a file.
    File { path: String },
}

impl LogConfig {
    /// Apply `CTXLOG_LEVEL` / `CTXLOG_FORMAT` from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(LEVEL_ENV) {
            self.level = value.parse().map_err(|_| ConfigError::Env {
                var: LEVEL_ENV,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(FORMAT_ENV) {
            self.format = value.parse().map_err(|_| ConfigError::Env {
                var: FORMAT_ENV,
                value: value.clone(),
            })?;
        }
        Ok(())
    }

    /// Default attributes as a flat key/value list.
    pub fn default_key_values(&self) -> Vec<Value> {
        self.default_attrs
            .iter()
            .flat_map(|(key, value)| [Value::from(key), toml_to_value(value)])
            .collect()
    }

    /// Construction options: handler, level, default attributes, group.
    pub fn to_options(&self) -> Result<Vec<LoggerOption>, ConfigError> {
        let handler_options = HandlerOptions {
            level: Level::Debug,
            timestamps: self.timestamps,
        };

        let handler = match (self.format, &self.output) {
            (LogFormat::Tracing, _) => with_handler(TracingHandler::new()),
            (LogFormat::Json, LogOutput::Stdout) => {
                with_handler(JsonHandler::new(io::stdout(), handler_options))
            }
            (LogFormat::Json, LogOutput::Stderr) => {
                with_handler(JsonHandler::new(io::stderr(), handler_options))
            }
            (LogFormat::Json, LogOutput::File { path }) => {
                with_handler(JsonHandler::new(open_append(path)?, handler_options))
            }
            (LogFormat::Text, LogOutput::Stdout) => {
                with_handler(TextHandler::new(io::stdout(), handler_options))
            }
            (LogFormat::Text, LogOutput::Stderr) => {
                with_handler(TextHandler::new(io::stderr(), handler_options))
            }
            (LogFormat::Text, LogOutput::File { path }) => {
                with_handler(TextHandler::new(open_append(path)?, handler_options))
            }
        };

        let mut options = vec![
            handler,
            with_level(self.level),
            with_default_attrs(self.default_key_values()),
        ];
        if let Some(group) = &self.group {
            options.push(with_group(group.clone()));
        }
        Ok(options)
    }
}

fn open_append(path: &str) -> Result<std::fs::File, ConfigError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(ConfigError::Io)
}

/// Tables become groups; arrays are rejected by validation and rendered as
/// text here; datetimes become strings.
fn toml_to_value(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::Str(s.clone()),
        toml::Value::Integer(i) => Value::Int(*i),
        toml::Value::Float(f) => Value::Float(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::Str(dt.to_string()),
        toml::Value::Array(_) => Value::Str(value.to_string()),
        toml::Value::Table(table) => Value::Group(
            table
                .iter()
                .map(|(k, v)| Attr::new(k.clone(), toml_to_value(v)))
                .collect(),
        ),
    }
}
