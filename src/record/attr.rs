//! Attributes and key/value pairing.
//!
//! # Pairing Rule
//! - A string in key position followed by any value yields `key=value`
//! - A trailing string with no value yields `!BADKEY=<that string>`
//! - A non-string in key position yields `!BADKEY=<that value>`, and pairing
//!   resumes at the next element
//!
//! Malformed lists never panic; they degrade to `!BADKEY` attributes so the
//! record still reaches the handler with the offending argument visible.

use crate::error::LogError;
use crate::record::value::Value;

/// Key used for arguments that could not be paired.
pub const BAD_KEY: &str = "!BADKEY";

/// A key/value pair attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// An attribute whose value is a group of attributes.
    pub fn group(name: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            key: name.into(),
            value: Value::Group(attrs),
        }
    }

    /// Insert into a JSON object. Groups merge with an existing object of the
    /// same key, scalars overwrite (later wins), empty groups are dropped.
    pub(crate) fn merge_into(&self, map: &mut serde_json::Map<String, serde_json::Value>) {
        match &self.value {
            Value::Group(attrs) if attrs.is_empty() => {}
            Value::Group(attrs) => {
                let slot = map
                    .entry(self.key.clone())
                    .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
                if !slot.is_object() {
                    *slot = serde_json::Value::Object(serde_json::Map::new());
                }
                if let serde_json::Value::Object(inner) = slot {
                    for attr in attrs {
                        attr.merge_into(inner);
                    }
                }
            }
            value => {
                map.insert(self.key.clone(), value.to_json());
            }
        }
    }
}

/// Pair a flat key/value list, degrading malformed entries to `!BADKEY`.
pub fn pair_key_values(args: impl IntoIterator<Item = Value>) -> Vec<Attr> {
    let mut attrs = Vec::new();
    let mut args = args.into_iter();

    while let Some(first) = args.next() {
        match first {
            Value::Str(key) => match args.next() {
                Some(value) => attrs.push(Attr { key, value }),
                None => attrs.push(Attr::new(BAD_KEY, Value::Str(key))),
            },
            other => attrs.push(Attr::new(BAD_KEY, other)),
        }
    }

    attrs
}

/// Strict pairing: odd lengths and non-string keys are errors.
pub fn try_pair_key_values(args: impl IntoIterator<Item = Value>) -> Result<Vec<Attr>, LogError> {
    let args: Vec<Value> = args.into_iter().collect();
    if args.len() % 2 != 0 {
        return Err(LogError::OddKeyValues { len: args.len() });
    }
    if let Some(index) = args.iter().step_by(2).position(|k| k.as_key().is_none()) {
        return Err(LogError::NonStringKey { index: index * 2 });
    }
    Ok(pair_key_values(args))
}

/// Wrap `attrs` in one group attribute per path segment, outermost first.
pub(crate) fn nest(groups: &[String], attrs: Vec<Attr>) -> Vec<Attr> {
    groups
        .iter()
        .rev()
        .fold(attrs, |inner, name| vec![Attr::group(name.clone(), inner)])
}
