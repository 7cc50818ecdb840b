use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::error::SessionError;
use super::options::ProbeOptions;
use super::session::SmtpSession;
use super::types::{ProbeOutcome, SmtpReply};

/// Mailbox probing capability used by the verification pipeline.
pub trait MailboxProber {
    /// Tests whether `mx_host` accepts `address` as a recipient. Never fails:
    /// connection problems are reported inside the outcome.
    fn probe(&self, mx_host: &str, address: &str, timeout: Duration) -> ProbeOutcome;
}

/// Plain-TCP prober: `EHLO`, `MAIL FROM`, `RCPT TO`, `QUIT`. No message is
/// ever transmitted.
#[derive(Debug, Clone, Default)]
pub struct SmtpProber {
    options: ProbeOptions,
}

impl SmtpProber {
    pub fn new(options: ProbeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    fn run(
        &self,
        mx_host: &str,
        address: &str,
        deadline: Instant,
    ) -> Result<SmtpReply, SessionError> {
        let mut session = SmtpSession::connect(mx_host, self.options.port, deadline)?;
        let result = self.converse(&mut session, address);
        session.quit();
        result
    }

    fn converse(
        &self,
        session: &mut SmtpSession,
        address: &str,
    ) -> Result<SmtpReply, SessionError> {
        let greeting = session.read_reply()?;
        if greeting.code != 220 {
            return Err(SessionError::protocol(format!(
                "greeting refused with {}",
                greeting.code
            )));
        }

        let ehlo = session.send_command(&format!("EHLO {}", self.options.helo_name()))?;
        expect_positive(&ehlo, "EHLO")?;

        let mail = session.send_command(&format!("MAIL FROM:<{}>", self.options.mail_from))?;
        expect_positive(&mail, "MAIL FROM")?;

        session.send_command(&format!("RCPT TO:<{address}>"))
    }
}

fn expect_positive(reply: &SmtpReply, stage: &str) -> Result<(), SessionError> {
    if reply.is_positive_completion() {
        Ok(())
    } else {
        Err(SessionError::protocol(format!(
            "{stage} rejected with {}",
            reply.code
        )))
    }
}

impl MailboxProber for SmtpProber {
    fn probe(&self, mx_host: &str, address: &str, timeout: Duration) -> ProbeOutcome {
        let deadline = Instant::now() + timeout;
        match self.run(mx_host, address, deadline) {
            Ok(reply) => {
                debug!(mx_host, address, code = reply.code, "RCPT TO answered");
                ProbeOutcome::from_code(reply.code)
            }
            Err(err) => {
                warn!(mx_host, address, error = %err, "SMTP probe failed");
                ProbeOutcome::failed(err.into_failure())
            }
        }
    }
}
