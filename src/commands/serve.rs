//! Implementation of the `joblock serve` command.

use super::load_config;
use crate::cli::ServeArgs;
use chrono::Duration;
use joblock::config::Config;
use joblock::duration::{format_duration, parse_duration};
use joblock::error::{JoblockError, Result};
use joblock::http::{AppState, router};
use joblock::locks::LockManager;
use joblock::telemetry;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Run the lock service until Ctrl-C.
pub fn cmd_serve(args: ServeArgs) -> Result<()> {
    let config = apply_overrides(load_config(args.config.as_deref())?, &args)?;
    config.validate()?;

    telemetry::init(&config.log_level);

    let addr = config.listen_addr()?;
    let lock_config = config.lock_config()?;
    let state = AppState::new(LockManager::with_config(lock_config));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| JoblockError::ServerError(format!("failed to start runtime: {}", e)))?;

    runtime.block_on(run(addr, state))
}

/// Apply command-line overrides on top of the loaded config.
///
/// Bad flag values are user errors, unlike bad values from the config file.
fn apply_overrides(mut config: Config, args: &ServeArgs) -> Result<Config> {
    if let Some(listen) = &args.listen {
        listen.parse::<SocketAddr>().map_err(|_| {
            JoblockError::UserError(format!(
                "invalid --listen value '{}' (expected host:port)",
                listen
            ))
        })?;
        config.listen = listen.clone();
    }
    if let Some(ttl) = &args.ttl {
        if check_flag_duration("--ttl", ttl)? <= Duration::zero() {
            return Err(JoblockError::UserError(format!(
                "invalid --ttl value '{}' (must be greater than 0)",
                ttl
            )));
        }
        config.default_ttl = ttl.clone();
    }
    if let Some(grace) = &args.grace {
        check_flag_duration("--grace", grace)?;
        config.grace_period = grace.clone();
    }
    Ok(config)
}

fn check_flag_duration(flag: &str, value: &str) -> Result<Duration> {
    parse_duration(value).ok_or_else(|| {
        JoblockError::UserError(format!(
            "invalid {} value '{}' (expected a duration such as 30s or 1m30s)",
            flag, value
        ))
    })
}

async fn run(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| JoblockError::ServerError(format!("failed to bind {}: {}", addr, e)))?;

    info!(
        %addr,
        default_ttl = %format_duration(state.manager.default_ttl()),
        grace_period = %format_duration(state.manager.grace_period()),
        "starting lock service"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| JoblockError::ServerError(e.to_string()))?;

    info!("lock service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
