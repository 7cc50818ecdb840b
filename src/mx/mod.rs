//! MX resolution.
//!
//! DNS access goes through the [`LookupMx`] capability so the pipeline can
//! run against a stub resolver. [`DnsResolver`] is the system-backed
//! implementation.

mod error;
mod resolver;
mod types;

pub use error::MxError;
pub use resolver::{DEFAULT_DNS_TIMEOUT, DnsResolver, LookupMx, resolve_mx};
pub use types::MxTarget;
