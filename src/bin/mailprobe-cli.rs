#[path = "mailprobe-cli/args.rs"]
mod args;
#[path = "mailprobe-cli/output.rs"]
mod output;
#[path = "mailprobe-cli/verify.rs"]
mod verify;

use std::time::Duration;

use anyhow::Result;
use mailprobe_lib::{DnsResolver, health, resolve_mx, validate};
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = <Cli as clap::Parser>::parse();
    init_tracing(cli.verbose);

    // codes de sortie : 0 OK, 2 invalides / requête refusée, 1 fatal
    match cli.cmd {
        Commands::Verify {
            emails,
            stdin,
            format,
            probe,
        } => {
            if verify::run_verify(emails, stdin, &format, &probe)? {
                std::process::exit(2);
            }
        }
        Commands::Syntax { email } => {
            let normalized = mailprobe_lib::syntax::normalize(&email);
            if validate(&normalized) {
                println!("[OK]    {normalized}");
            } else {
                println!("[INVALID] {normalized}");
                std::process::exit(2);
            }
        }
        Commands::Mx {
            domain,
            dns_timeout_ms,
        } => {
            let resolver = DnsResolver::new(Duration::from_millis(dns_timeout_ms.max(1)));
            match resolve_mx(&resolver, &mailprobe_lib::syntax::normalize(&domain)) {
                Some(target) => println!("{} (preference {})", target.exchange, target.preference),
                None => {
                    println!("no mail server for {domain}");
                    std::process::exit(2);
                }
            }
        }
        Commands::Request { probe } => {
            if verify::run_request(&probe)? != 200 {
                std::process::exit(2);
            }
        }
        Commands::Health => println!("{}", serde_json::to_string(&health())?),
    }
    Ok(())
}
