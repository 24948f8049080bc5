//! Command implementations for joblock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod serve;

use crate::cli::{Command, ConfigArgs};
use joblock::config::Config;
use joblock::error::Result;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Serve(args) => serve::cmd_serve(args),
        Command::Config(args) => cmd_config(args),
    }
}

/// Load the config file when one is given, otherwise use defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn cmd_config(args: ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_yaml()?);
    Ok(())
}
