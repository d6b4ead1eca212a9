//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// teams-webhook: post a message to an incoming webhook
///
/// Builds a JSON message from the given fields and posts it once to the
/// webhook URL.
#[derive(Debug, Parser)]
#[command(name = "teams-webhook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Incoming webhook URL
    #[arg(long)]
    pub url: Option<String>,

    /// Message text
    #[arg(long)]
    pub text: Option<String>,

    /// Message title
    #[arg(long)]
    pub title: Option<String>,

    /// Extra payload field in 'Key=Value' format (can be specified multiple times)
    #[arg(long = "field", value_name = "K=V")]
    pub fields: Vec<String>,

    /// Payload field sent as JSON null (can be specified multiple times)
    #[arg(long = "null-field", value_name = "NAME")]
    pub null_fields: Vec<String>,

    /// Verify the webhook's TLS certificate (disabled by default)
    #[arg(long = "verify-certificates")]
    pub verify_certificates: bool,

    /// Request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Print the JSON payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for teams-webhook
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
