//! Configuration management for the NOMA language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Toolchain invocation prefix

use anyhow::Result;
use clap::Parser;

use crate::toolchain::DEFAULT_TOOLCHAIN;

/// Command-line arguments for the NOMA language server
#[derive(Debug, Parser)]
#[command(name = "noma-language-server")]
#[command(about = "Language server for NOMA files")]
#[command(version)]
pub struct Args {
    /// Override the toolchain invocation prefix
    #[arg(
        long,
        help = "Command prefix used to invoke the NOMA toolchain (default: 'cargo run --')"
    )]
    pub toolchain: Option<String>,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Invocation prefix the command lines are built from
    pub toolchain: String,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        Ok(Config {
            toolchain: args
                .toolchain
                .unwrap_or_else(|| DEFAULT_TOOLCHAIN.to_string()),
            log_level: args.log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            toolchain: DEFAULT_TOOLCHAIN.to_string(),
            log_level: "info".to_string(),
        }
    }
}
