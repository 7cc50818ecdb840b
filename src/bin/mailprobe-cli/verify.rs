use std::io::{self, BufRead, Read};

use anyhow::{Context, Result};
use mailprobe_lib::{Status, VerificationResult, Verifier, handle_request};

use crate::args::ProbeArgs;
use crate::output::print_rows;

/// Returns `true` when at least one address is invalid.
pub fn run_verify(
    emails: Vec<String>,
    read_stdin: bool,
    format: &str,
    probe: &ProbeArgs,
) -> Result<bool> {
    let mut emails = emails;
    if read_stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            if !line.trim().is_empty() {
                emails.push(line);
            }
        }
    }

    let verifier = Verifier::with_dns_timeout(probe.to_options(), probe.dns_timeout());
    let rows: Vec<(String, VerificationResult)> = emails
        .into_iter()
        .map(|email| {
            let result = verifier.verify(&email);
            (email.trim().to_string(), result)
        })
        .collect();

    print_rows(&rows, format)?;
    Ok(rows.iter().any(|(_, r)| r.status() == Status::Invalid))
}

/// Returns the HTTP-style code of the response.
pub fn run_request(probe: &ProbeArgs) -> Result<u16> {
    let mut body = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut body)
        .context("read request body from stdin")?;

    let verifier = Verifier::with_dns_timeout(probe.to_options(), probe.dns_timeout());
    let response = handle_request(&body, &verifier);
    println!("{}", response.body());
    Ok(response.code)
}
