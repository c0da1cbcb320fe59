use std::time::Duration;

use trust_dns_resolver::{
    Resolver,
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
};

use super::{DEFAULT_TIMEOUT, MxAnswer, MxError, MxHost, MxLookup};

/// Blocking MX lookups, one attempt per query and a fixed timeout.
pub struct DnsMxLookup {
    resolver: Resolver,
    timeout: Duration,
}

impl DnsMxLookup {
    pub fn from_system_conf(timeout: Duration) -> Result<Self, MxError> {
        let (config, opts) =
            trust_dns_resolver::system_conf::read_system_conf().map_err(MxError::resolver)?;
        Self::with_config(config, opts, timeout)
    }

    pub fn with_config(
        config: ResolverConfig,
        mut opts: ResolverOpts,
        timeout: Duration,
    ) -> Result<Self, MxError> {
        opts.timeout = timeout;
        opts.attempts = 1;
        let resolver = Resolver::new(config, opts).map_err(MxError::resolver)?;
        Ok(Self { resolver, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn lookup(&self, domain: &str) -> Result<MxAnswer, MxError> {
        let ascii = ascii_domain(domain)?;
        answer_from(&self.resolver, &ascii)
    }
}

impl MxLookup for DnsMxLookup {
    fn has_mx(&self, domain: &str) -> Result<bool, MxError> {
        let answer = self.lookup(domain)?;
        debug_event!(domain, hosts = answer.hosts().len(), "MX answer");
        Ok(answer.accepts_mail())
    }
}

/// One-shot lookup with the system resolver and [`DEFAULT_TIMEOUT`].
pub fn check_mx(domain: &str) -> Result<MxAnswer, MxError> {
    DnsMxLookup::from_system_conf(DEFAULT_TIMEOUT)?.lookup(domain)
}

/// Where MX hosts come from. The DNS resolver in production, stubs in tests.
pub(crate) trait MxSource {
    fn query_mx(&self, ascii_domain: &str) -> Result<Vec<MxHost>, ResolveError>;
}

impl MxSource for Resolver {
    fn query_mx(&self, ascii_domain: &str) -> Result<Vec<MxHost>, ResolveError> {
        Ok(self
            .mx_lookup(ascii_domain)?
            .iter()
            .map(|mx| MxHost::new(mx.preference(), host_name(&mx.exchange().to_utf8())))
            .collect())
    }
}

/// NXDOMAIN and empty answers are "no records", not failures.
pub(crate) fn answer_from<S>(source: &S, ascii_domain: &str) -> Result<MxAnswer, MxError>
where
    S: MxSource + ?Sized,
{
    match source.query_mx(ascii_domain) {
        Ok(hosts) => Ok(MxAnswer::new(hosts)),
        Err(err) => match err.kind() {
            ResolveErrorKind::NoRecordsFound { .. } => Ok(MxAnswer::default()),
            ResolveErrorKind::Timeout => Err(MxError::timeout(ascii_domain)),
            _ => Err(MxError::query(ascii_domain, err)),
        },
    }
}

pub(crate) fn ascii_domain(domain: &str) -> Result<String, MxError> {
    let name = domain.trim().trim_end_matches('.');
    if name.is_empty() {
        return Err(MxError::EmptyDomain);
    }
    idna::domain_to_ascii(name).map_err(|err| MxError::invalid_domain(name, err))
}

pub(crate) fn host_name(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}
