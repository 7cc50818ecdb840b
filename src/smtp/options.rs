use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_HELO_DOMAIN: &str = "verification.com";

/// Configuration knobs for the SMTP prober and the catch-all detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeOptions {
    pub port: u16,
    /// Name announced in `EHLO`.
    pub helo_domain: String,
    /// Envelope sender used in `MAIL FROM`.
    pub mail_from: String,
    /// Deadline for the whole primary session (connect included).
    pub probe_timeout_ms: u64,
    /// Deadline for the synthetic catch-all session.
    pub catchall_timeout_ms: u64,
    /// Fixed local part for the catch-all probe; random when unset.
    pub catchall_local_part: Option<String>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            helo_domain: DEFAULT_HELO_DOMAIN.to_string(),
            mail_from: "verify@verification.com".to_string(),
            probe_timeout_ms: 8_000,
            catchall_timeout_ms: 5_000,
            catchall_local_part: None,
        }
    }
}

impl ProbeOptions {
    /// A zero value is raised to 1 ms: sessions are never unbounded.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms.max(1))
    }

    pub fn catchall_timeout(&self) -> Duration {
        Duration::from_millis(self.catchall_timeout_ms.max(1))
    }

    /// Falls back to the default identity when `helo_domain` is blank.
    pub fn helo_name(&self) -> &str {
        let trimmed = self.helo_domain.trim();
        if trimmed.is_empty() {
            DEFAULT_HELO_DOMAIN
        } else {
            trimmed
        }
    }
}
