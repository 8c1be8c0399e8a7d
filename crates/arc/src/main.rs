//! Arc CLI - OAuth 1.0a request signing.
//!
//! Provides commands for:
//! - `sign`: Sign an HTTP request with configured credentials
//! - `generate-tokens`: Obtain access tokens through the three-legged flow

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GenerateTokensArgs, SignArgs};
use error::CliError;
use output::Output;

/// Log filter when neither `--verbose` nor `RUST_LOG` is given.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Arc - OAuth 1.0a request signing.
#[derive(Parser)]
#[command(name = "arc", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover arc.toml).
    #[arg(short, long, global = true, env = "ARC_CONFIG")]
    config: Option<PathBuf>,

    /// Log signing and token exchange steps.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a request and print the result.
    Sign(SignArgs),
    /// Obtain access tokens from the configured provider.
    GenerateTokens(GenerateTokensArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Sign(args) => args.execute(config_path),
        Commands::GenerateTokens(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute(config_path))),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {}", error_chain(&err)));
        std::process::exit(1);
    }
}

/// Error message followed by its sources.
fn error_chain(err: &CliError) -> String {
    let mut messages = vec![err.to_string()];
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }
    messages.join(": ")
}
