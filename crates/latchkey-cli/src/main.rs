//! Latchkey CLI - host simulator for the PIN-gated secrets engine
//!
//! Replays an event script against the engine with a simulated clock and
//! prints whatever the dispenser types.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use latchkey_cli::{Profile, Runner};
use latchkey_core::SecretRegistry;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "latchkey")]
#[command(about = "Simulate a PIN-gated secrets keyboard from an event script", long_about = None)]
#[command(version)]
struct Cli {
    /// Profile TOML file (falls back to $LATCHKEY_PROFILE, then a demo profile)
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an event script
    Run {
        /// Script file (reads stdin when omitted)
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// Validate the profile and print a redacted summary
    CheckProfile,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "latchkey=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let profile = Profile::resolve(cli.profile).context("Failed to load profile")?;

    match cli.command {
        Commands::Run { script } => run(&profile, script, cli.json),
        Commands::CheckProfile => check_profile(&profile, cli.json),
    }
}

fn run(profile: &Profile, script: Option<PathBuf>, json: bool) -> Result<()> {
    let source = match &script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {:?}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };

    let secrets = profile.secret_refs();
    let registry = SecretRegistry::try_new(&secrets)?;
    let mut runner = Runner::new(profile.latch_config(), registry, io::stdout().lock())?
        .with_json(json);

    info!(
        secrets = secrets.len(),
        lock_timeout_ms = profile.lock_timeout_ms(),
        "Running script"
    );
    runner.run_script(&source)?;
    Ok(())
}

fn check_profile(profile: &Profile, json: bool) -> Result<()> {
    let summary = profile.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Profile OK");
        println!("{}", summary);
    }
    Ok(())
}
