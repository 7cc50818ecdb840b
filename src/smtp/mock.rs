//! Loopback SMTP servers for tests.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use super::ProbeFailure;
use super::error::SessionError;

/// `(expected command prefix, raw response)` for each step of a session.
pub(crate) type Script = Vec<(&'static str, &'static str)>;

/// Serves one scripted session per entry of `sessions`, in order, and returns
/// every command line received.
pub(crate) fn spawn_mock_server(
    greeting: &'static str,
    sessions: Vec<Script>,
) -> (u16, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let port = listener.local_addr().expect("addr").port();
    let (ready_tx, ready_rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        ready_tx.send(()).ok();
        let mut received = Vec::new();
        for script in sessions {
            match listener.accept() {
                Ok((mut stream, _)) => {
                    let _ = handle_session(&mut stream, greeting, script, &mut received);
                }
                Err(_) => break,
            }
        }
        received
    });
    ready_rx.recv().expect("server ready");
    (port, handle)
}

fn handle_session(
    stream: &mut TcpStream,
    greeting: &str,
    script: Script,
    received: &mut Vec<String>,
) -> io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    stream.write_all(greeting.as_bytes())?;
    stream.flush()?;
    for (expected, response) in script {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let command = line.trim_end().to_string();
        let matches = command.starts_with(expected);
        received.push(command);
        if !matches {
            stream.write_all(b"500 unexpected command\r\n")?;
            stream.flush()?;
            break;
        }
        stream.write_all(response.as_bytes())?;
        stream.flush()?;
    }
    Ok(())
}

/// Accepts one connection and never writes to it.
pub(crate) fn spawn_silent_server(hold: Duration) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind silent server");
    let port = listener.local_addr().expect("addr").port();
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(hold);
            drop(stream);
        }
    });
    port
}

/// A loopback port with nothing listening on it.
pub(crate) fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    port
}

pub(crate) const GREETING: &str = "220 mock.smtp.test ESMTP\r\n";

/// Happy-path session answering `RCPT TO` with `rcpt_response`.
pub(crate) fn rcpt_script(rcpt_response: &'static str) -> Script {
    vec![
        ("EHLO", "250-mock.smtp.test\r\n250 PIPELINING\r\n"),
        ("MAIL FROM:", "250 2.1.0 Ok\r\n"),
        ("RCPT TO:", rcpt_response),
        ("QUIT", "221 2.0.0 Bye\r\n"),
    ]
}

/// Failure produced by a connect attempt that ran out of time.
pub(crate) fn timed_out_connect_failure(host: &str) -> ProbeFailure {
    SessionError::connect(host, io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))
        .into_failure()
}
