//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).
//! - Does not validate configuration (see `atracker_config::ConfigLoader::build`).

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "atracker-cli")]
#[command(about = "Read IBM Cloud Activity Tracker targets from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  atracker-cli targets\n  atracker-cli targets --name my-cos-target\n  atracker-cli --region eu-de -o yaml targets\n  atracker-cli -o table targets\n"
)]
pub struct Cli {
    /// IBM Cloud region used to derive the Activity Tracker endpoint
    #[arg(short, long, global = true, env = "IBMCLOUD_REGION")]
    pub region: Option<String>,

    /// Activity Tracker endpoint (overrides the region-derived one)
    #[arg(short, long, global = true, env = "IBMCLOUD_ATRACKER_API_ENDPOINT")]
    pub base_url: Option<String>,

    /// IAM endpoint used for API key exchange
    #[arg(long, global = true, env = "IBMCLOUD_IAM_API_ENDPOINT")]
    pub iam_url: Option<String>,

    /// IBM Cloud API key, exchanged for an IAM token on first use.
    ///
    /// Replaces any token from IBMCLOUD_IAM_TOKEN. Falls back to IBMCLOUD_API_KEY.
    #[arg(short = 'k', long, global = true)]
    pub api_key: Option<String>,

    /// Pre-issued IAM bearer token.
    ///
    /// Replaces any key from IBMCLOUD_API_KEY. Falls back to IBMCLOUD_IAM_TOKEN.
    #[arg(short = 't', long, global = true)]
    pub iam_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "IBMCLOUD_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for rate-limited requests
    #[arg(long, global = true, env = "IBMCLOUD_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification
    #[arg(long, global = true, env = "IBMCLOUD_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Print sensitive attributes instead of masking them
    #[arg(long, global = true)]
    pub show_sensitive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List Activity Tracker targets
    Targets {
        /// Only keep targets with exactly this name
        #[arg(short, long)]
        name: Option<String>,
    },
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_targets_with_name() {
        let cli = Cli::try_parse_from(["atracker-cli", "targets", "--name", "t1"]).unwrap();
        let Commands::Targets { name } = cli.command;
        assert_eq!(name.as_deref(), Some("t1"));
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(!cli.show_sensitive);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["atracker-cli", "targets", "-o", "yaml", "--show-sensitive"])
            .unwrap();
        assert_eq!(cli.output, OutputFormat::Yaml);
        assert!(cli.show_sensitive);
    }

    #[test]
    fn test_credentials_are_not_read_from_env_by_clap() {
        let cli = Cli::try_parse_from(["atracker-cli", "targets"]).unwrap();
        assert!(cli.api_key.is_none());
        assert!(cli.iam_token.is_none());
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        assert!(Cli::try_parse_from(["atracker-cli", "-o", "csv", "targets"]).is_err());
    }
}
