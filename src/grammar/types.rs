use std::fmt;
use std::net::IpAddr;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainPart {
    /// Lower-cased labels joined with '.', comments and whitespace removed.
    Name(String),
    Literal(IpAddr),
}

impl DomainPart {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Literal(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl fmt::Display for DomainPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Literal(IpAddr::V4(addr)) => write!(f, "[{addr}]"),
            Self::Literal(IpAddr::V6(addr)) => write!(f, "[IPv6:{addr}]"),
        }
    }
}

/// A full, anchored structural match.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// Matched local part, case preserved, surrounding CFWS excluded.
    pub local_part: String,
    /// Local part with the CFWS between obsolete words dropped.
    pub normalized_local: String,
    /// Matched domain text, surrounding CFWS excluded.
    pub domain_part: String,
    pub domain: DomainPart,
    pub matched_length: usize,
    pub local_units: usize,
    pub total_units: usize,
}

impl ParseResult {
    /// `local@domain` with the normalized local part and domain.
    pub fn address(&self) -> String {
        format!("{}@{}", self.normalized_local, self.domain)
    }
}
