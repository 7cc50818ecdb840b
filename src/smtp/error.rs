use std::io;

use thiserror::Error;

use super::types::ProbeFailure;

/// Errors raised while driving a single SMTP session.
#[derive(Debug, Error)]
pub(crate) enum SessionError {
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("session deadline elapsed")]
    Timeout,
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: io::Error,
    },
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl SessionError {
    pub(crate) fn connect(host: impl Into<String>, source: io::Error) -> Self {
        Self::Connect {
            host: host.into(),
            source,
        }
    }

    /// Read/write errors: socket timeouts become [`SessionError::Timeout`].
    pub(crate) fn io(source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Self::Timeout,
            io::ErrorKind::UnexpectedEof => Self::Protocol(source.to_string()),
            _ => Self::Io { source },
        }
    }

    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    pub(crate) fn into_failure(self) -> ProbeFailure {
        match self {
            Self::Connect { .. } => ProbeFailure::ConnectFailed(self.to_string()),
            Self::Timeout => ProbeFailure::Timeout,
            Self::Io { source } => ProbeFailure::Io(source.to_string()),
            Self::Protocol(message) => ProbeFailure::Protocol(message),
        }
    }
}
