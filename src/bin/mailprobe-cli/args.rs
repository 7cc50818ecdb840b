use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use mailprobe_lib::ProbeOptions;

#[derive(Parser)]
#[command(name = "mailprobe-cli", version, about = "Vérifie la délivrabilité d'adresses e-mail")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// logs détaillés (équivaut à RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// syntaxe → MX → sonde SMTP → catch-all
    Verify {
        /// adresses à vérifier
        emails: Vec<String>,
        /// lit des adresses depuis stdin (une par ligne)
        #[arg(long)]
        stdin: bool,
        /// format: human|json|ndjson
        #[arg(long, default_value = "human")]
        format: String,
        #[command(flatten)]
        probe: ProbeArgs,
    },
    /// contrôle de syntaxe seul (aucun accès réseau)
    Syntax { email: String },
    /// résout le MX préféré d'un domaine
    Mx {
        domain: String,
        /// timeout DNS (ms)
        #[arg(long = "dns-timeout-ms", default_value_t = 5_000)]
        dns_timeout_ms: u64,
    },
    /// traite un corps JSON {"email": "..."} lu sur stdin
    Request {
        #[command(flatten)]
        probe: ProbeArgs,
    },
    /// payload de santé
    Health,
}

#[derive(Args, Clone)]
pub struct ProbeArgs {
    /// nom utilisé pour EHLO
    #[arg(long)]
    pub helo: Option<String>,
    /// enveloppe MAIL FROM
    #[arg(long = "from")]
    pub mail_from: Option<String>,
    /// port SMTP
    #[arg(long, default_value_t = 25)]
    pub port: u16,
    /// délai global de la sonde principale (ms)
    #[arg(long = "timeout-ms", default_value_t = 8_000)]
    pub timeout_ms: u64,
    /// délai de la sonde catch-all (ms)
    #[arg(long = "catchall-timeout-ms", default_value_t = 5_000)]
    pub catchall_timeout_ms: u64,
    /// partie locale fixe pour la sonde catch-all (aléatoire sinon)
    #[arg(long = "catchall-local")]
    pub catchall_local: Option<String>,
    /// timeout DNS (ms)
    #[arg(long = "dns-timeout-ms", default_value_t = 5_000)]
    pub dns_timeout_ms: u64,
}

impl ProbeArgs {
    pub fn to_options(&self) -> ProbeOptions {
        let mut options = ProbeOptions::default();
        if let Some(helo) = &self.helo {
            options.helo_domain = helo.clone();
        }
        if let Some(from) = &self.mail_from {
            options.mail_from = from.clone();
        }
        options.port = self.port;
        options.probe_timeout_ms = self.timeout_ms;
        options.catchall_timeout_ms = self.catchall_timeout_ms;
        options.catchall_local_part = self.catchall_local.as_ref().map(|l| l.to_lowercase());
        options
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms.max(1))
    }
}
