//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shardcast - shard statistics broadcaster
#[derive(Parser, Debug)]
#[command(
    name = "shardcast",
    author,
    version,
    about = "Aggregate shard statistics and broadcast them to listing services",
    long_about = "Collects per-shard guild counts from the shared store, reduces them\n\
                  into a single aggregate, and republishes the aggregate to every\n\
                  configured statistics-listing endpoint concurrently."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SHARDCAST_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SHARDCAST_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one aggregate-then-broadcast pass
    Run(RunArgs),

    /// Validate configuration file without dispatching
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (YAML, TOML or JSON)
    #[arg(short, long, default_value = "config.yaml", env = "SHARDCAST_CONFIG")]
    pub config: PathBuf,

    /// Override store host from configuration
    #[arg(long, env = "SHARDCAST_STORE_HOST")]
    pub store_host: Option<String>,

    /// Override store port from configuration
    #[arg(long, env = "SHARDCAST_STORE_PORT")]
    pub store_port: Option<u16>,

    /// Per-request timeout in seconds (0 = no timeout)
    #[arg(long, default_value = "0", env = "SHARDCAST_REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    /// Skip dispatch when the aggregate reports zero shards
    #[arg(long, env = "SHARDCAST_SKIP_EMPTY")]
    pub skip_empty: bool,

    /// Validate configuration and exit without collecting or dispatching
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "SHARDCAST_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show detailed destination information
    #[arg(long)]
    pub destinations: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
