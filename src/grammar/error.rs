use thiserror::Error;

/// Structural mismatch. The lifecycle reports every variant as
/// `InvalidFormat`; the detail is kept for logs and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("expected {expected} at byte {at}")]
    Expected { expected: &'static str, at: usize },
    #[error("domain label at byte {at} is longer than 63 characters")]
    LabelTooLong { at: usize },
    #[error("'{tld}' is not a 2 to 6 letter top level domain")]
    InvalidTld { tld: String },
    #[error("domain name has {count} labels")]
    LabelCount { count: usize },
    #[error("domain name is {length} characters long (max 253)")]
    DomainTooLong { length: usize },
    #[error("'{literal}' is not a valid IPv4 or IPv6 address literal")]
    InvalidLiteral { literal: String },
    #[error("local part is {units} characters long (max 64)")]
    LocalPartTooLong { units: usize },
    #[error("address is {units} characters long (max 254)")]
    AddressTooLong { units: usize },
}

impl GrammarError {
    pub(crate) fn expected(expected: &'static str, at: usize) -> Self {
        Self::Expected { expected, at }
    }
}
