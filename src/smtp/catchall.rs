use rand::{Rng, distributions::Alphanumeric};
use tracing::debug;

use super::options::ProbeOptions;
use super::probe::MailboxProber;

const SYNTHETIC_PREFIX: &str = "nonexistent-";
const SYNTHETIC_TOKEN_LEN: usize = 24;

/// Probes a mailbox that should not exist on `domain`. An acceptance means
/// the server takes any recipient and a positive probe proves nothing.
///
/// Fails open: a synthetic probe that errors or times out reports "not
/// catch-all", so the primary acceptance stands. On flaky networks that can
/// let a catch-all domain through as verified.
pub fn is_catch_all<P>(prober: &P, mx_host: &str, domain: &str, options: &ProbeOptions) -> bool
where
    P: MailboxProber + ?Sized,
{
    let local = options
        .catchall_local_part
        .clone()
        .unwrap_or_else(random_local_part);
    let synthetic = format!("{local}@{domain}");
    let outcome = prober.probe(mx_host, &synthetic, options.catchall_timeout());

    if let Some(failure) = &outcome.failure {
        debug!(mx_host, %synthetic, %failure, "catch-all probe failed, keeping primary result");
    }
    outcome.is_accepted()
}

pub(crate) fn random_local_part() -> String {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SYNTHETIC_TOKEN_LEN)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect();
    format!("{SYNTHETIC_PREFIX}{token}")
}
