use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use tracing::trace;

use super::error::SessionError;
use super::types::SmtpReply;

const MAX_LINE_LEN: usize = 4096;

/// One SMTP connection bounded by a single deadline.
///
/// Every connect, read and write is given only the time left before
/// `deadline`. The socket is closed when the session is dropped.
pub(crate) struct SmtpSession {
    host: String,
    stream: TcpStream,
    buffer: Vec<u8>,
    deadline: Instant,
}

impl SmtpSession {
    pub(crate) fn connect(host: &str, port: u16, deadline: Instant) -> Result<Self, SessionError> {
        let addrs = resolve_socket_addrs(host, port)?;
        let mut last_err = None;
        for addr in &addrs {
            let Some(budget) = remaining(deadline) else {
                break;
            };
            match TcpStream::connect_timeout(addr, budget) {
                Ok(stream) => {
                    trace!(host, %addr, "connected");
                    return Ok(Self {
                        host: host.to_string(),
                        stream,
                        buffer: Vec::new(),
                        deadline,
                    });
                }
                Err(err) => last_err = Some(err),
            }
        }
        let source = last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::TimedOut, "deadline elapsed before connecting")
        });
        Err(SessionError::connect(host, source))
    }

    pub(crate) fn read_reply(&mut self) -> Result<SmtpReply, SessionError> {
        let mut lines = Vec::new();
        let mut code: Option<u16> = None;
        loop {
            let line = self.read_line()?;
            let parsed_code = line
                .get(..3)
                .and_then(|digits| digits.parse::<u16>().ok())
                .ok_or_else(|| SessionError::protocol(format!("invalid reply: {line}")))?;
            match code {
                Some(existing) if existing != parsed_code => {
                    return Err(SessionError::protocol(format!(
                        "inconsistent reply codes: {existing} vs {parsed_code}"
                    )));
                }
                Some(_) => {}
                None => code = Some(parsed_code),
            }
            let is_last = line.as_bytes().get(3) != Some(&b'-');
            lines.push(line.get(4..).unwrap_or_default().to_string());
            if is_last {
                break;
            }
        }
        let reply = SmtpReply {
            code: code.unwrap_or(0),
            lines,
        };
        trace!(host = %self.host, code = reply.code, "S");
        Ok(reply)
    }

    pub(crate) fn send_command(&mut self, command: &str) -> Result<SmtpReply, SessionError> {
        trace!(host = %self.host, command, "C");
        let budget = remaining(self.deadline).ok_or(SessionError::Timeout)?;
        self.stream
            .set_write_timeout(Some(budget))
            .map_err(SessionError::io)?;
        let mut data = command.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        self.stream.write_all(&data).map_err(SessionError::io)?;
        self.stream.flush().map_err(SessionError::io)?;
        self.read_reply()
    }

    /// Best effort: the session is over either way.
    pub(crate) fn quit(&mut self) {
        if let Err(err) = self.send_command("QUIT") {
            trace!(host = %self.host, error = %err, "QUIT not acknowledged");
        }
    }

    fn read_line(&mut self) -> Result<String, SessionError> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|byte| *byte == b'\n') {
                let mut line = self.buffer.drain(..=pos).collect::<Vec<_>>();
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return String::from_utf8(line)
                    .map_err(|err| SessionError::protocol(format!("utf8 error: {err}")));
            }
            if self.buffer.len() > MAX_LINE_LEN {
                return Err(SessionError::protocol("reply line too long"));
            }

            let budget = remaining(self.deadline).ok_or(SessionError::Timeout)?;
            self.stream
                .set_read_timeout(Some(budget))
                .map_err(SessionError::io)?;
            let mut buf = [0u8; 512];
            let read = self.stream.read(&mut buf).map_err(SessionError::io)?;
            if read == 0 {
                return Err(SessionError::protocol("connection closed by server"));
            }
            self.buffer.extend_from_slice(&buf[..read]);
        }
    }
}

fn resolve_socket_addrs(host: &str, port: u16) -> Result<Vec<SocketAddr>, SessionError> {
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|err| SessionError::connect(host, err))?
        .collect();
    if addrs.is_empty() {
        return Err(SessionError::connect(
            host,
            io::Error::new(io::ErrorKind::AddrNotAvailable, "no socket address resolved"),
        ));
    }
    Ok(addrs)
}

/// Time left before `deadline`, or `None` once it has passed.
fn remaining(deadline: Instant) -> Option<Duration> {
    deadline
        .checked_duration_since(Instant::now())
        .filter(|left| !left.is_zero())
}
