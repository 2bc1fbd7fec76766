// src/logging.rs

//! Stderr logging for the `exechook` binary.
//!
//! Levels as used across the crate:
//! - `debug`: each pipeline step (delay, substituted line, tokenized parts,
//!   expanded executable, URL response body).
//! - `info`: dispatch of an event, script launch, URL fetch, handler
//!   registration and command store changes.
//! - `warn`: a launched script exited non-zero; its stdout and stderr follow
//!   as separate warnings.
//! - `error`: item lookup aborts, missing or non-executable scripts, spawn and
//!   transport failures, URL status >= 400, failed store writes.
//!
//! `--log-level` wins. Otherwise `EXECHOOK_LOG` is read as an `EnvFilter`
//! directive, so `EXECHOOK_LOG=info,exechook::exec=debug` narrows the noisy
//! pipeline steps to one module. Anything else falls back to `info`.
//! Stdout stays free for command ids and the `list` table.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "EXECHOOK_LOG";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = build_filter(cli_level, std::env::var(LOG_ENV).ok().as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("installing tracing subscriber")
}

/// Filter from the CLI level, else the env directives, else `info`.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level_name(level));
    }
    env.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn level_name(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
