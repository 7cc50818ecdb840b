use anyhow::{Result, bail};
use mailprobe_lib::{Status, VerificationResult};
use serde::Serialize;

#[derive(Serialize)]
pub struct OutputRow<'a> {
    pub email: &'a str,
    #[serde(flatten)]
    pub result: &'a VerificationResult,
}

pub fn print_rows(rows: &[(String, VerificationResult)], format: &str) -> Result<()> {
    let payload: Vec<OutputRow<'_>> = rows
        .iter()
        .map(|(email, result)| OutputRow { email, result })
        .collect();

    match format {
        "human" => {
            for row in &payload {
                println!(
                    "[{}] {} :: {}",
                    tag(row.result.status()),
                    row.email,
                    row.result.reason()
                );
            }
        }
        "json" => println!("{}", serde_json::to_string_pretty(&payload)?),
        "ndjson" => {
            for row in &payload {
                println!("{}", serde_json::to_string(row)?);
            }
        }
        other => bail!("unknown --format '{other}', use: human|json|ndjson"),
    }
    Ok(())
}

fn tag(status: Status) -> &'static str {
    match status {
        Status::Valid => "OK",
        Status::Invalid => "INVALID",
        Status::Risky => "RISKY",
    }
}
