//! Proxy mode: translation of a remote validation API's answer.
//!
//! The remote service reports one of `VALID`, `INVALID_FORMAT`,
//! `INVALID_DOMAIN`, `INVALID_MX`, `DISPOSABLE`, `PROBABLY_VALID`; anything
//! else is passed through as a risky result.

use serde::Deserialize;
use tracing::debug;

use crate::verify::VerificationResult;

const REASON_REMOTE_ERROR: &str = "verification error";
const UNKNOWN_STATUS: &str = "UNKNOWN";

#[derive(Debug, Deserialize)]
struct RemoteResponse {
    #[serde(default)]
    status: Option<String>,
}

/// Maps a remote status keyword onto the local vocabulary.
pub fn map_status(status: &str) -> VerificationResult {
    match status {
        "VALID" => VerificationResult::valid("valid"),
        "INVALID_FORMAT" => VerificationResult::invalid("invalid format"),
        "INVALID_DOMAIN" => VerificationResult::invalid("domain does not exist"),
        "INVALID_MX" => VerificationResult::invalid("no mail server"),
        "DISPOSABLE" => VerificationResult::invalid("disposable address"),
        "PROBABLY_VALID" => VerificationResult::risky("generic address (admin, info...)"),
        other => VerificationResult::risky(other),
    }
}

/// Translates the remote JSON body. Unparseable bodies become a generic
/// risky result; they are never an error for the caller.
pub fn translate(body: &str) -> VerificationResult {
    match serde_json::from_str::<RemoteResponse>(body) {
        Ok(remote) => map_status(remote.status.as_deref().unwrap_or(UNKNOWN_STATUS)),
        Err(err) => {
            debug!(error = %err, "remote response unreadable");
            VerificationResult::risky(REASON_REMOTE_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::Status;

    #[test]
    fn known_statuses_map_to_fixed_reasons() {
        let cases = [
            ("VALID", Status::Valid, "valid"),
            ("INVALID_FORMAT", Status::Invalid, "invalid format"),
            ("INVALID_DOMAIN", Status::Invalid, "domain does not exist"),
            ("INVALID_MX", Status::Invalid, "no mail server"),
            ("DISPOSABLE", Status::Invalid, "disposable address"),
            ("PROBABLY_VALID", Status::Risky, "generic address (admin, info...)"),
        ];
        for (remote, status, reason) in cases {
            assert_eq!(map_status(remote), VerificationResult::new(status, reason));
        }
    }

    #[test]
    fn unknown_status_is_passed_through() {
        let result = translate(r#"{"status":"ROLE_ACCOUNT","score":40}"#);
        assert_eq!(result, VerificationResult::risky("ROLE_ACCOUNT"));
    }

    #[test]
    fn missing_status_is_unknown() {
        assert_eq!(translate("{}"), VerificationResult::risky("UNKNOWN"));
    }

    #[test]
    fn garbage_is_generic_error() {
        assert_eq!(translate("<html>502</html>"), VerificationResult::risky("verification error"));
        assert_eq!(translate("[1,2]"), VerificationResult::risky("verification error"));
    }
}
