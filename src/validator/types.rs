use thiserror::Error;

use crate::input::InputSource;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    UndefinedRequiredField,
    EmptyValueRejected,
    RequiredValueMismatch,
    InvalidFormat,
    DomainResolutionFailed,
    LocalDomainRejected,
    ReservedDomainRejected,
    GeographicTldRejected,
    LocalizedTldRejected,
    MissingTld,
    UnknownTld,
    DynamicDnsRejected,
    BlacklistedTld,
    BlacklistedDomain,
    NoMxRecord,
}

/// Why a value was not accepted. Never fatal: the validator stays usable.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("NO REQUEST: the required {display_name} value \"{key}\" from {input} source is undefined")]
    UndefinedRequiredField {
        display_name: String,
        key: String,
        input: InputSource,
    },
    #[error("the {display_name} field can not use an empty value")]
    EmptyValueRejected { display_name: String },
    #[error(
        "NO REQUEST: the required {display_name} value \"{key}\" from {input} source does not match the required value"
    )]
    RequiredValueMismatch {
        display_name: String,
        key: String,
        input: InputSource,
    },
    #[error("not a valid {display_name} value")]
    InvalidFormat { display_name: String },
    #[error("mail address without a valid domain part ({domain})")]
    DomainResolutionFailed { domain: String },
    #[error("locally reserved mail address domain part ({domain})")]
    LocalDomainRejected { domain: String },
    #[error("reserved mail address domain part ({domain})")]
    ReservedDomainRejected { domain: String },
    #[error("mail address pointing to the geographic TLD '{tld}'")]
    GeographicTldRejected { tld: String },
    #[error("localized unicode mail address domain part ({domain})")]
    LocalizedTldRejected { domain: String },
    #[error("domain part without TLD definition ({domain})")]
    MissingTld { domain: String },
    #[error("domain part with unknown TLD '{tld}'")]
    UnknownTld { tld: String },
    #[error("domain part is a known dynamic DNS service ({domain})")]
    DynamicDnsRejected { domain: String },
    #[error("mail address with forbidden TLD '{tld}'")]
    BlacklistedTld { tld: String },
    #[error("mail address with forbidden domain part ({domain})")]
    BlacklistedDomain { domain: String },
    #[error("mail address with invalid domain part ({domain}): no MX host")]
    NoMxRecord { domain: String },
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::UndefinedRequiredField { .. } => RejectionKind::UndefinedRequiredField,
            Self::EmptyValueRejected { .. } => RejectionKind::EmptyValueRejected,
            Self::RequiredValueMismatch { .. } => RejectionKind::RequiredValueMismatch,
            Self::InvalidFormat { .. } => RejectionKind::InvalidFormat,
            Self::DomainResolutionFailed { .. } => RejectionKind::DomainResolutionFailed,
            Self::LocalDomainRejected { .. } => RejectionKind::LocalDomainRejected,
            Self::ReservedDomainRejected { .. } => RejectionKind::ReservedDomainRejected,
            Self::GeographicTldRejected { .. } => RejectionKind::GeographicTldRejected,
            Self::LocalizedTldRejected { .. } => RejectionKind::LocalizedTldRejected,
            Self::MissingTld { .. } => RejectionKind::MissingTld,
            Self::UnknownTld { .. } => RejectionKind::UnknownTld,
            Self::DynamicDnsRejected { .. } => RejectionKind::DynamicDnsRejected,
            Self::BlacklistedTld { .. } => RejectionKind::BlacklistedTld,
            Self::BlacklistedDomain { .. } => RejectionKind::BlacklistedDomain,
            Self::NoMxRecord { .. } => RejectionKind::NoMxRecord,
        }
    }
}

/// Result of one `validate` call.
///
/// `valid == false && is_request == false` means the field was not supplied
/// (or carried a value other than the required one).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub is_request: bool,
    pub message: String,
    pub sanitized_value: Option<String>,
    pub rejection: Option<Rejection>,
}

impl ValidationOutcome {
    pub(crate) fn accepted(sanitized_value: String) -> Self {
        Self {
            valid: true,
            is_request: true,
            message: String::new(),
            sanitized_value: Some(sanitized_value),
            rejection: None,
        }
    }

    pub(crate) fn rejected(rejection: Rejection, is_request: bool) -> Self {
        Self {
            valid: false,
            is_request,
            message: rejection.to_string(),
            sanitized_value: None,
            rejection: Some(rejection),
        }
    }

    pub fn kind(&self) -> Option<RejectionKind> {
        self.rejection.as_ref().map(Rejection::kind)
    }
}

/// Caller errors. These abort `validate` instead of producing an outcome.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(
        "unknown input source {name}: the configured resolver does not serve it and no default value applies"
    )]
    UnknownInputSource { name: String },
}

impl ValidationError {
    pub(crate) fn unknown_source(source: InputSource) -> Self {
        Self::UnknownInputSource {
            name: source.name().to_string(),
        }
    }
}
