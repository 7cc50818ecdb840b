//! Transport-agnostic request boundary.
//!
//! An HTTP layer only has to pass the raw body to [`handle_request`] and
//! write back [`Response::code`] with [`Response::body`].

pub mod proxy;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::mx::LookupMx;
use crate::smtp::MailboxProber;
use crate::verify::{VerificationResult, Verifier};

pub(crate) const REASON_NO_ADDRESS: &str = "no email address provided";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub code: u16,
    pub result: VerificationResult,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.code == 200
    }

    pub fn body(&self) -> String {
        self.result.to_json()
    }
}

/// Parses `{"email": "..."}` and runs the verifier.
///
/// A body that is not a JSON object with a string `email` is answered with
/// 400 before any network access.
pub fn handle_request<L, P>(body: &[u8], verifier: &Verifier<L, P>) -> Response
where
    L: LookupMx,
    P: MailboxProber,
{
    let Some(email) = requested_email(body) else {
        return bad_request();
    };
    Response {
        code: 200,
        result: verifier.verify(&email),
    }
}

fn requested_email(body: &[u8]) -> Option<String> {
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "malformed request body");
            return None;
        }
    };
    let Value::Object(mut fields) = value else {
        debug!("request body is not a JSON object");
        return None;
    };
    match fields.remove("email") {
        Some(Value::String(email)) => Some(email),
        _ => None,
    }
}

fn bad_request() -> Response {
    Response {
        code: 400,
        result: VerificationResult::invalid(REASON_NO_ADDRESS),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
}

pub fn health() -> Health {
    Health {
        status: "ok",
        message: "verification backend running",
    }
}
