use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw SMTP reply: status code plus one entry per reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub lines: Vec<String>,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// Coarse reading of the `RCPT TO` reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyClass {
    Accepted,
    PermanentlyRejected,
    TransientlyRejected,
    Indeterminate,
}

impl ReplyClass {
    pub fn from_code(code: u16) -> Self {
        match code {
            250 => Self::Accepted,
            550..=554 => Self::PermanentlyRejected,
            421 | 450 | 451 | 452 => Self::TransientlyRejected,
            _ => Self::Indeterminate,
        }
    }
}

/// Why a probe ended before a `RCPT TO` reply was obtained.
///
/// The payloads carry diagnostics for logs; [`ProbeFailure::reason`] is the
/// user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ProbeFailure {
    /// Refused, unreachable or timed out while connecting; usually outbound
    /// port 25 filtering on the calling network.
    ConnectFailed(String),
    Timeout,
    Protocol(String),
    Io(String),
}

impl ProbeFailure {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::ConnectFailed(_) => "port 25 blocked or unreachable",
            Self::Timeout => "connection timed out",
            Self::Protocol(_) => "SMTP error",
            Self::Io(_) => "connection error",
        }
    }
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectFailed(detail) | Self::Protocol(detail) | Self::Io(detail) => {
                write!(f, "{} ({detail})", self.reason())
            }
            Self::Timeout => f.write_str(self.reason()),
        }
    }
}

/// Result of one mailbox probe.
///
/// `code` is 0 when the session never produced a `RCPT TO` reply, in which
/// case `failure` is set and `class` is [`ReplyClass::Indeterminate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub code: u16,
    pub class: ReplyClass,
    pub failure: Option<ProbeFailure>,
}

impl ProbeOutcome {
    pub fn from_code(code: u16) -> Self {
        Self {
            code,
            class: ReplyClass::from_code(code),
            failure: None,
        }
    }

    pub fn failed(failure: ProbeFailure) -> Self {
        Self {
            code: 0,
            class: ReplyClass::Indeterminate,
            failure: Some(failure),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.class == ReplyClass::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_codes_are_classified_exactly() {
        assert_eq!(ReplyClass::from_code(250), ReplyClass::Accepted);
        for code in [550, 551, 552, 553, 554] {
            assert_eq!(ReplyClass::from_code(code), ReplyClass::PermanentlyRejected);
        }
        for code in [421, 450, 451, 452] {
            assert_eq!(ReplyClass::from_code(code), ReplyClass::TransientlyRejected);
        }
        for code in [0, 251, 252, 422, 453, 500, 503, 555, 521] {
            assert_eq!(ReplyClass::from_code(code), ReplyClass::Indeterminate);
        }
    }

    #[test]
    fn failed_outcome_has_zero_code() {
        let outcome = ProbeOutcome::failed(ProbeFailure::Timeout);
        assert_eq!(outcome.code, 0);
        assert_eq!(outcome.class, ReplyClass::Indeterminate);
        assert!(!outcome.is_accepted());
    }

    #[test]
    fn failure_reasons_are_distinct() {
        let failures = [
            ProbeFailure::ConnectFailed(String::new()),
            ProbeFailure::Timeout,
            ProbeFailure::Protocol(String::new()),
            ProbeFailure::Io(String::new()),
        ];
        let mut reasons: Vec<_> = failures.iter().map(ProbeFailure::reason).collect();
        reasons.sort_unstable();
        reasons.dedup();
        assert_eq!(reasons.len(), failures.len());
    }
}
