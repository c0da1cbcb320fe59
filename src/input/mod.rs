//! Logical input sources and the resolver seam that serves them.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Post,
    Get,
    Cookie,
    Env,
    Server,
    Session,
    /// GET ∪ POST, POST wins on key collisions.
    Request,
    /// The validator's own caller-supplied mapping.
    Custom,
}

impl InputSource {
    pub const ALL: [InputSource; 8] = [
        Self::Post,
        Self::Get,
        Self::Cookie,
        Self::Env,
        Self::Server,
        Self::Session,
        Self::Request,
        Self::Custom,
    ];

    /// Name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Get => "GET",
            Self::Cookie => "COOKIE",
            Self::Env => "ENVIRONMENT",
            Self::Server => "SERVER",
            Self::Session => "SESSION",
            Self::Request => "REQUEST",
            Self::Custom => "CUSTOM",
        }
    }

    /// Numeric source codes as used by web request layers.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Post),
            1 => Some(Self::Get),
            2 => Some(Self::Cookie),
            4 => Some(Self::Env),
            5 => Some(Self::Server),
            6 => Some(Self::Session),
            99 => Some(Self::Request),
            999 => Some(Self::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown input source '{0}'")]
pub struct UnknownSourceName(pub String);

impl FromStr for InputSource {
    type Err = UnknownSourceName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code).ok_or_else(|| UnknownSourceName(trimmed.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "post" => Ok(Self::Post),
            "get" => Ok(Self::Get),
            "cookie" => Ok(Self::Cookie),
            "env" | "environment" => Ok(Self::Env),
            "server" => Ok(Self::Server),
            "session" => Ok(Self::Session),
            "request" => Ok(Self::Request),
            "custom" => Ok(Self::Custom),
            _ => Err(UnknownSourceName(trimmed.to_string())),
        }
    }
}

/// The resolver declines this source altogether.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("input source {0} is not served by this resolver")]
pub struct UnsupportedSource(pub InputSource);

pub trait InputResolver {
    /// `Ok(None)` when the source is served but `key` is absent.
    fn resolve(&self, source: InputSource, key: &str) -> Result<Option<String>, UnsupportedSource>;
}

/// In-memory request data, one map per source.
///
/// Every source but `Custom` is served: a source that was never given a map
/// simply has no keys. `Env` can fall back to the process environment.
/// `Custom` is declined, custom data belongs to the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInputs {
    stores: HashMap<InputSource, HashMap<String, String>>,
    process_env: bool,
}

impl RequestInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Env` keys missing from the explicit map are read from the process
    /// environment at lookup time.
    pub fn from_process_env() -> Self {
        Self {
            process_env: true,
            ..Self::default()
        }
    }

    pub fn with<I, K, V>(mut self, source: InputSource, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = self.stores.entry(source).or_default();
        for (key, value) in pairs {
            store.insert(key.into(), value.into());
        }
        self
    }

    pub fn insert(
        &mut self,
        source: InputSource,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.stores
            .entry(source)
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    fn lookup(&self, source: InputSource, key: &str) -> Option<String> {
        self.stores.get(&source).and_then(|s| s.get(key)).cloned()
    }
}

impl InputResolver for RequestInputs {
    fn resolve(&self, source: InputSource, key: &str) -> Result<Option<String>, UnsupportedSource> {
        let value = match source {
            InputSource::Custom => return Err(UnsupportedSource(source)),
            InputSource::Request => self
                .lookup(InputSource::Post, key)
                .or_else(|| self.lookup(InputSource::Get, key)),
            InputSource::Env => self
                .lookup(InputSource::Env, key)
                .or_else(|| self.process_env.then(|| std::env::var(key).ok()).flatten()),
            other => self.lookup(other, key),
        };
        Ok(value)
    }
}
