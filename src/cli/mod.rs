//! CLI argument parsing for joblock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Joblock: minimal in-memory advisory lock service.
///
/// Clients claim a named job for a bounded time, renew it while working,
/// and release it when done. Expired claims get a short grace period during
/// which only the holder may renew.
#[derive(Parser, Debug)]
#[command(name = "joblock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for joblock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP lock service.
    ///
    /// Serves `/lock` (POST acquire, DELETE release, GET status) and
    /// `/health` until interrupted.
    Serve(ServeArgs),

    /// Print the effective configuration.
    ///
    /// Loads and validates the config file (if any) and prints the
    /// resulting settings as YAML.
    Config(ConfigArgs),
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Path to a YAML config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Socket address to listen on (overrides config).
    #[arg(long)]
    pub listen: Option<String>,

    /// Default lock TTL, e.g. 30s or 1m30s (overrides config).
    #[arg(long)]
    pub ttl: Option<String>,

    /// Grace period after expiry, e.g. 5s (overrides config).
    #[arg(long)]
    pub grace: Option<String>,
}

/// Arguments for the `config` command.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Path to a YAML config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
