//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Group names must be non-empty and free of `.`, the nesting separator
//! - Attribute keys must be non-empty; arrays are not attribute values
//! - File outputs need a path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LogConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::config::schema::{LogConfig, LogOutput};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyGroup,
    GroupContainsSeparator(String),
    EmptyAttrKey,
    ArrayAttr(String),
    EmptyFilePath,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyGroup => write!(f, "group must not be empty"),
            ValidationError::GroupContainsSeparator(g) => {
                write!(f, "group {:?} must not contain '.'", g)
            }
            ValidationError::EmptyAttrKey => write!(f, "default_attrs keys must not be empty"),
            ValidationError::ArrayAttr(key) => {
                write!(f, "default_attrs.{} is an array, which is not supported", key)
            }
            ValidationError::EmptyFilePath => write!(f, "file output requires a path"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a configuration, collecting every error.
pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.group.as_deref() {
        Some("") => errors.push(ValidationError::EmptyGroup),
        Some(g) if g.contains('.') => errors.push(ValidationError::GroupContainsSeparator(g.to_string())),
        _ => {}
    }

    check_attrs(&config.default_attrs, "", &mut errors);

    if let LogOutput::File { path } = &config.output {
        if path.trim().is_empty() {
            errors.push(ValidationError::EmptyFilePath);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_attrs(table: &toml::Table, prefix: &str, errors: &mut Vec<ValidationError>) {
    for (key, value) in table {
        if key.is_empty() {
            errors.push(ValidationError::EmptyAttrKey);
            continue;
        }
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Array(_) => errors.push(ValidationError::ArrayAttr(path)),
            toml::Value::Table(inner) => check_attrs(inner, &path, errors),
            _ => {}
        }
    }
}
