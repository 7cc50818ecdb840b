#![forbid(unsafe_code)]
//! mailprobe_lib : vérification de délivrabilité d'adresses e-mail
//! (syntaxe, MX, sonde SMTP, détection catch-all), sans envoi de message.

pub mod mx;
pub mod service;
pub mod smtp;
pub mod syntax;
pub mod verify;

pub use mx::{DnsResolver, LookupMx, MxError, MxTarget, resolve_mx};
pub use service::{Response, handle_request, health};
pub use smtp::{
    MailboxProber, ProbeFailure, ProbeOptions, ProbeOutcome, ReplyClass, SmtpProber, is_catch_all,
};
pub use syntax::{EmailAddress, validate};
pub use verify::{Status, VerificationResult, Verifier, verify_email};
