use thiserror::Error;

/// Failures of an MX lookup. The mail check turns every one of them into a
/// `NoMxRecord` rejection.
#[derive(Debug, Error)]
pub enum MxError {
    #[error("no domain to look up")]
    EmptyDomain,
    #[error("{domain} has no ASCII form")]
    InvalidDomain {
        domain: String,
        #[source]
        source: idna::Errors,
    },
    #[cfg(feature = "with-mx")]
    #[error("cannot set up the DNS resolver")]
    Resolver {
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "with-mx")]
    #[error("MX query for {domain} failed")]
    Query {
        domain: String,
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
    #[error("MX lookup for {domain} timed out")]
    Timeout { domain: String },
}

#[cfg(feature = "with-mx")]
impl MxError {
    pub(crate) fn invalid_domain(domain: &str, source: idna::Errors) -> Self {
        Self::InvalidDomain {
            domain: domain.to_string(),
            source,
        }
    }

    pub(crate) fn resolver(source: std::io::Error) -> Self {
        Self::Resolver { source }
    }

    pub(crate) fn query(domain: &str, source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::Query {
            domain: domain.to_string(),
            source,
        }
    }

    pub(crate) fn timeout(domain: &str) -> Self {
        Self::Timeout {
            domain: domain.to_string(),
        }
    }
}
