use thiserror::Error;

#[derive(Debug, Error)]
pub enum MxError {
    #[error("DNS resolver unavailable: {reason}")]
    Unavailable { reason: String },
    #[error("MX lookup failed for {domain}: {source}")]
    Lookup {
        domain: String,
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl MxError {
    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub(crate) fn lookup(
        domain: impl Into<String>,
        source: trust_dns_resolver::error::ResolveError,
    ) -> Self {
        Self::Lookup {
            domain: domain.into(),
            source,
        }
    }
}
