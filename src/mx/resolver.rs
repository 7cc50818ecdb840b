use std::time::Duration;

use tracing::{debug, warn};
use trust_dns_resolver::{
    Resolver,
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    system_conf::read_system_conf,
};

use super::{MxError, MxTarget};

pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// DNS capability used by the verification pipeline.
///
/// An empty vector means the domain publishes no MX records.
pub trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxTarget>, MxError>;
}

/// Resolves the preferred mail exchange for `domain`.
///
/// Lookup errors, timeouts, a missing resolver and empty answers all yield
/// `None`; the caller treats that as a domain not configured for mail.
pub fn resolve_mx<L>(resolver: &L, domain: &str) -> Option<MxTarget>
where
    L: LookupMx + ?Sized,
{
    match resolver.lookup_mx(domain) {
        Ok(records) => {
            let selected = select_preferred(records);
            match &selected {
                Some(target) => debug!(
                    domain,
                    exchange = %target.exchange,
                    preference = target.preference,
                    "selected MX"
                ),
                None => debug!(domain, "no usable MX records"),
            }
            selected
        }
        Err(err) => {
            debug!(domain, error = %err, "MX lookup failed");
            None
        }
    }
}

/// Lowest preference wins; among equals the first record in resolver order.
/// A null MX (exchange `.`) never qualifies.
pub(crate) fn select_preferred(records: Vec<MxTarget>) -> Option<MxTarget> {
    records
        .into_iter()
        .map(|record| MxTarget::new(record.preference, normalize_exchange(&record.exchange)))
        .filter(|record| !record.exchange.is_empty())
        .min_by_key(|record| record.preference)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

/// System-configured resolver with a single, bounded attempt per query.
pub struct DnsResolver {
    inner: Result<Resolver, String>,
}

impl DnsResolver {
    /// Builds a resolver from the host configuration, falling back to the
    /// library defaults when it cannot be read. A resolver that fails to
    /// initialise is kept as an unavailable capability: every lookup errors.
    pub fn new(timeout: Duration) -> Self {
        let (config, mut opts) = match read_system_conf() {
            Ok(pair) => pair,
            Err(err) => {
                debug!(error = %err, "system resolver config unreadable, using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        opts.timeout = timeout;
        opts.attempts = 1;

        let inner = Resolver::new(config, opts).map_err(|err| {
            warn!(error = %err, "DNS resolver initialization failed");
            err.to_string()
        });
        Self { inner }
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_ok()
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DNS_TIMEOUT)
    }
}

impl LookupMx for DnsResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxTarget>, MxError> {
        let resolver = self.inner.as_ref().map_err(MxError::unavailable)?;
        let lookup = match resolver.mx_lookup(fully_qualified(domain)) {
            Ok(lookup) => lookup,
            Err(err) if should_treat_as_empty(&err) => return Ok(Vec::new()),
            Err(err) => return Err(MxError::lookup(domain, err)),
        };
        Ok(lookup
            .iter()
            .map(|mx| MxTarget::new(mx.preference(), mx.exchange().to_utf8()))
            .collect())
    }
}

/// Trailing dot so resolv.conf search domains are never appended.
pub(crate) fn fully_qualified(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    }
}

fn should_treat_as_empty(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

#[cfg(test)]
impl LookupMx for crate::mx::tests::StubResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxTarget>, MxError> {
        self.calls.set(self.calls.get() + 1);
        (self.on_lookup)(domain)
    }
}
