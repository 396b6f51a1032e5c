//! pathwave: command-line front end for the Pathwave API
//!
//! Usage:
//!   pathwave env-check                         - Validate PATHWAVE_USER_SID
//!   pathwave invoke <TOOL> --args '{"k": "v"}' - Invoke a tool
//!   pathwave payout <EMAIL> <AMOUNT>           - Send a PayPal payout

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pathwave_core::{PathwaveClient, PathwaveConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pathwave", version)]
#[command(about = "Invoke Pathwave tools from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that PATHWAVE_USER_SID is available
    EnvCheck {
        /// Env file to load instead of searching for .env
        #[arg(long)]
        env_file: Option<PathBuf>,
    },
    /// Invoke a tool and print the normalized response
    Invoke {
        /// Tool name, e.g. paypal.payout
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
    /// Send a PayPal payout
    Payout {
        /// Payee email
        email: String,
        /// Amount to send
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// 3-letter currency code (default: CHF)
        #[arg(short, long)]
        currency: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the JSON response only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let ok = match cli.command {
        Commands::EnvCheck { env_file } => commands::env_check(env_file.as_deref())?,
        Commands::Invoke { tool, args } => {
            let client = build_client()?;
            commands::invoke(&client, &tool, &args).await?
        }
        Commands::Payout {
            email,
            amount,
            currency,
        } => {
            let client = build_client()?;
            commands::payout(&client, &email, amount, currency.as_deref()).await?
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Load `.env`, read configuration and build the client
fn build_client() -> anyhow::Result<PathwaveClient> {
    commands::load_env_file(None)?;

    let config = PathwaveConfig::load().context("Config error")?;
    tracing::debug!("Using Pathwave base URL {}", config.base_url);

    PathwaveClient::new(config).context("Failed to create Pathwave client")
}
