//! Verification pipeline: syntax → MX → mailbox probe → catch-all check.
//!
//! Each stage short-circuits on the first conclusive answer and nothing is
//! retried. Every path ends in a [`VerificationResult`].

mod types;

pub use types::{Status, VerificationResult};

use tracing::{debug, info};

use crate::mx::{self, DnsResolver, LookupMx, MxTarget};
use crate::smtp::{self, MailboxProber, ProbeOptions, ProbeOutcome, ReplyClass, SmtpProber};
use crate::syntax::EmailAddress;
use types::{
    REASON_CATCH_ALL, REASON_INVALID_SYNTAX, REASON_NO_MAIL_SERVER,
    REASON_TEMPORARILY_UNAVAILABLE, REASON_VERIFIED,
};

/// Runs the pipeline with the system resolver and default probe options.
pub fn verify_email(input: &str) -> VerificationResult {
    Verifier::system(ProbeOptions::default()).verify(input)
}

/// Holds configuration and capabilities only; each [`Verifier::verify`] call
/// is independent.
pub struct Verifier<L = DnsResolver, P = SmtpProber> {
    resolver: L,
    prober: P,
    options: ProbeOptions,
}

impl Verifier<DnsResolver, SmtpProber> {
    pub fn system(options: ProbeOptions) -> Self {
        Self::with_dns_timeout(options, mx::DEFAULT_DNS_TIMEOUT)
    }

    pub fn with_dns_timeout(options: ProbeOptions, dns_timeout: std::time::Duration) -> Self {
        Self::new(
            DnsResolver::new(dns_timeout),
            SmtpProber::new(options.clone()),
            options,
        )
    }
}

impl<L, P> Verifier<L, P>
where
    L: LookupMx,
    P: MailboxProber,
{
    pub fn new(resolver: L, prober: P, options: ProbeOptions) -> Self {
        Self {
            resolver,
            prober,
            options,
        }
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    pub fn resolver(&self) -> &L {
        &self.resolver
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    pub fn verify(&self, input: &str) -> VerificationResult {
        let result = self.classify(input);
        info!(
            email = %input.trim(),
            status = %result.status(),
            reason = result.reason(),
            "verification finished"
        );
        result
    }

    fn classify(&self, input: &str) -> VerificationResult {
        let Some(address) = EmailAddress::parse(input) else {
            return VerificationResult::invalid(REASON_INVALID_SYNTAX);
        };

        let Some(target) = mx::resolve_mx(&self.resolver, address.domain()) else {
            return VerificationResult::invalid(REASON_NO_MAIL_SERVER);
        };

        let outcome = self.prober.probe(
            &target.exchange,
            address.as_str(),
            self.options.probe_timeout(),
        );
        debug!(%address, code = outcome.code, class = ?outcome.class, "mailbox probed");

        if outcome.is_accepted() {
            return self.check_catch_all(&target, &address);
        }
        rejection_result(&outcome)
    }

    fn check_catch_all(&self, target: &MxTarget, address: &EmailAddress) -> VerificationResult {
        if smtp::is_catch_all(
            &self.prober,
            &target.exchange,
            address.domain(),
            &self.options,
        ) {
            VerificationResult::risky(REASON_CATCH_ALL)
        } else {
            VerificationResult::valid(REASON_VERIFIED)
        }
    }
}

fn rejection_result(outcome: &ProbeOutcome) -> VerificationResult {
    if let Some(failure) = &outcome.failure {
        return VerificationResult::risky(failure.reason());
    }
    match outcome.class {
        ReplyClass::PermanentlyRejected => {
            VerificationResult::invalid(format!("mailbox does not exist ({})", outcome.code))
        }
        ReplyClass::TransientlyRejected => {
            VerificationResult::risky(REASON_TEMPORARILY_UNAVAILABLE)
        }
        ReplyClass::Indeterminate | ReplyClass::Accepted => {
            VerificationResult::risky(format!("unknown response ({})", outcome.code))
        }
    }
}
