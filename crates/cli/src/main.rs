//! Activity Tracker CLI - evaluate the targets data source from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build configuration and run the targets data source once.
//! - Render the resulting state (JSON, YAML, or table) on stdout.
//!
//! Does NOT handle:
//! - REST calls or filtering (see `crates/client` and `crates/provider`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr so stdout stays machine-readable.
//! - Sensitive attributes are masked unless `--show-sensitive` is given.

mod args;
mod cancellation;
mod commands;
mod error;
mod formatters;

use std::time::Duration;

use anyhow::Result;
use args::{Cli, Commands, LogFormat};
use atracker_config::{Config, ConfigLoader};
use atracker_provider::CancellationToken;
use cancellation::{install_ctrl_c_handler, print_cancelled_message};
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let cancel = CancellationToken::new();
    install_ctrl_c_handler(&cancel);

    let exit_code = match run_command(cli, config, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) => match e.exit_code() {
            ExitCode::Interrupted => {
                print_cancelled_message();
                ExitCode::Interrupted
            }
            code => {
                eprintln!("{:#}", e);
                code
            }
        },
    };

    std::process::exit(exit_code.as_i32());
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

/// Layer CLI flags over the environment. Flags win.
fn build_config(cli: &Cli) -> Result<Config, atracker_config::ConfigError> {
    let mut loader = ConfigLoader::new().from_env()?;

    if let Some(region) = &cli.region {
        loader = loader.with_region(region.clone());
    }
    if let Some(url) = &cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(url) = &cli.iam_url {
        loader = loader.with_iam_url(url.clone());
    }
    if let Some(key) = &cli.api_key {
        loader = loader.with_api_key(key.clone());
    }
    if let Some(token) = &cli.iam_token {
        loader = loader.with_iam_token(token.clone());
    }
    if let Some(secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }

    loader.build()
}

async fn run_command(cli: Cli, config: Config, cancel: &CancellationToken) -> Result<()> {
    match cli.command {
        Commands::Targets { name } => {
            let d = commands::targets::run(config, name, cancel).await?;
            let state = if cli.show_sensitive {
                d.state()
            } else {
                d.redacted_state()
            };
            let output = formatters::format_state(&state, cli.output)?;
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
