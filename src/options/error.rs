use thiserror::Error;

/// Errors raised while configuring a validator from external input.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown mail address standard '{name}' (use basic, rfc5321 or rfc5322)")]
    UnknownStandard { name: String },
    #[error("option file must contain a JSON object of option names")]
    NotAnObject,
    #[cfg(feature = "with-serde")]
    #[error("option file is not valid JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub(crate) fn unknown_standard(name: impl Into<String>) -> Self {
        Self::UnknownStandard { name: name.into() }
    }

    #[cfg(feature = "with-serde")]
    pub(crate) fn json(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}
