//! SMTP mailbox probing and catch-all detection.
//!
//! [`SmtpProber`] opens one connection per probe, walks `EHLO` / `MAIL FROM` /
//! `RCPT TO` and always closes with `QUIT`; the `RCPT TO` reply code is the
//! verdict. [`is_catch_all`] repeats the probe against a synthetic mailbox.

mod catchall;
mod error;
#[cfg(test)]
pub(crate) mod mock;
mod options;
mod probe;
mod session;
mod types;

pub use catchall::is_catch_all;
pub use options::ProbeOptions;
pub use probe::{MailboxProber, SmtpProber};
pub use types::{ProbeFailure, ProbeOutcome, ReplyClass, SmtpReply};
