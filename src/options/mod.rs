//! Typed, string-keyed option storage.
//!
//! Every option is declared with a [`OptionKind`], a default and a nullability
//! flag. [`OptionStore::set`] coerces raw values to the declared kind and falls
//! back to the default when coercion fails; it never errors. Names are
//! case-sensitive. Undeclared names are stored verbatim.

mod error;
mod value;

pub use error::ConfigError;
pub use value::OptionValue;

use std::collections::BTreeMap;

use chrono::NaiveDate;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Int,
    Str,
    Array,
    Date,
    /// Undeclared options: stored as given.
    Any,
}

#[derive(Debug, Clone, PartialEq)]
struct OptionEntry {
    kind: OptionKind,
    value: OptionValue,
    default: OptionValue,
    nullable: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionStore {
    entries: BTreeMap<String, OptionEntry>,
}

impl OptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` and resets it to `default`.
    pub fn declare(
        &mut self,
        name: &str,
        kind: OptionKind,
        default: impl Into<OptionValue>,
        nullable: bool,
    ) -> &mut Self {
        let default = default.into();
        self.entries.insert(
            name.to_string(),
            OptionEntry {
                kind,
                value: default.clone(),
                default,
                nullable,
            },
        );
        self
    }

    /// Coerces `raw` to the declared kind of `name`.
    ///
    /// Returns `false` when the value could not be coerced and the declared
    /// default was stored instead.
    pub fn set(&mut self, name: &str, raw: impl Into<OptionValue>) -> bool {
        let raw = raw.into();
        match self.entries.get_mut(name) {
            Some(entry) => match coerce(entry.kind, entry.nullable, &raw) {
                Some(value) => {
                    entry.value = value;
                    true
                }
                None => {
                    debug_event!(option = name, "option value not coercible, default restored");
                    entry.value = entry.default.clone();
                    false
                }
            },
            None => {
                self.entries.insert(
                    name.to_string(),
                    OptionEntry {
                        kind: OptionKind::Any,
                        value: raw,
                        default: OptionValue::None,
                        nullable: true,
                    },
                );
                true
            }
        }
    }

    /// Returns the value of `name`; an option that was never declared nor set
    /// is defined with `fallback` first.
    pub fn get(&mut self, name: &str, fallback: impl Into<OptionValue>) -> &OptionValue {
        &self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| {
                let fallback = fallback.into();
                OptionEntry {
                    kind: OptionKind::Any,
                    value: fallback.clone(),
                    default: fallback,
                    nullable: true,
                }
            })
            .value
    }

    /// Non-materializing read.
    pub fn peek(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name).map(|entry| &entry.value)
    }

    pub fn kind(&self, name: &str) -> Option<OptionKind> {
        self.entries.get(name).map(|entry| entry.kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn flag(&self, name: &str, default: bool) -> bool {
        self.peek(name)
            .and_then(OptionValue::to_bool)
            .unwrap_or(default)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.peek(name).and_then(OptionValue::to_int)
    }

    /// `None` when unset or explicitly null.
    pub fn text(&self, name: &str) -> Option<String> {
        self.peek(name).and_then(OptionValue::to_text)
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.peek(name).and_then(OptionValue::to_date)
    }

    /// String items of an array option; non-string items are stringified.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.peek(name)
            .and_then(OptionValue::to_array)
            .unwrap_or_default()
            .iter()
            .filter_map(OptionValue::to_text)
            .collect()
    }

    /// Applies a JSON object of `name -> value` pairs, returns how many
    /// options were touched.
    #[cfg(feature = "with-serde")]
    pub fn apply_json(&mut self, json: &str) -> Result<usize, ConfigError> {
        let map: serde_json::Map<String, serde_json::Value> =
            match serde_json::from_str(json).map_err(ConfigError::json)? {
                serde_json::Value::Object(map) => map,
                _ => return Err(ConfigError::NotAnObject),
            };
        let mut count = 0;
        for (name, value) in map {
            let value: OptionValue = serde_json::from_value(value).map_err(ConfigError::json)?;
            self.set(&name, value);
            count += 1;
        }
        Ok(count)
    }
}

fn coerce(kind: OptionKind, nullable: bool, raw: &OptionValue) -> Option<OptionValue> {
    if raw.is_none() {
        return nullable.then_some(OptionValue::None);
    }
    match kind {
        OptionKind::Bool => raw.to_bool().map(OptionValue::Bool),
        OptionKind::Int => raw.to_int().map(OptionValue::Int),
        OptionKind::Str => raw.to_text().map(OptionValue::Str),
        OptionKind::Array => raw.to_array().map(OptionValue::Array),
        OptionKind::Date => raw.to_date().map(OptionValue::Date),
        OptionKind::Any => Some(raw.clone()),
    }
}
