use std::fmt;

use serde::{Deserialize, Serialize};

pub(crate) const REASON_INVALID_SYNTAX: &str = "invalid syntax";
pub(crate) const REASON_NO_MAIL_SERVER: &str = "domain has no mail server";
pub(crate) const REASON_TEMPORARILY_UNAVAILABLE: &str = "server temporarily unavailable";
pub(crate) const REASON_CATCH_ALL: &str = "catch-all detected";
pub(crate) const REASON_VERIFIED: &str = "verified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Valid,
    Invalid,
    Risky,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Risky => "risky",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final classification of one address; serialized as
/// `{"status": "...", "reason": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    status: Status,
    reason: String,
}

impl VerificationResult {
    pub fn new(status: Status, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    pub fn valid(reason: impl Into<String>) -> Self {
        Self::new(Status::Valid, reason)
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::new(Status::Invalid, reason)
    }

    pub fn risky(reason: impl Into<String>) -> Self {
        Self::new(Status::Risky, reason)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"status":"{}","reason":""}}"#, self.status)
        })
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.status, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_shape() {
        let json = VerificationResult::invalid(REASON_INVALID_SYNTAX).to_json();
        insta::assert_snapshot!(json, @r#"{"status":"invalid","reason":"invalid syntax"}"#);
    }

    #[test]
    fn deserializes_lowercase_status() {
        let result: VerificationResult =
            serde_json::from_str(r#"{"status":"risky","reason":"catch-all detected"}"#)
                .expect("parse");
        assert_eq!(result.status(), Status::Risky);
        assert_eq!(result.reason(), REASON_CATCH_ALL);
    }

    #[test]
    fn display_is_human_readable() {
        let result = VerificationResult::valid(REASON_VERIFIED);
        assert_eq!(result.to_string(), "valid (verified)");
    }
}
