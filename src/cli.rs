// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::{CommandType, EventKind};

/// Command-line arguments for `exechook`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "exechook",
    version,
    about = "Run scripts or call URLs when items are added, complete, are copied or removed.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the command store (TOML).
    ///
    /// Default: `EXECHOOK_CONFIG`, else `execute.toml` in the current
    /// working directory.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `EXECHOOK_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Store a new command and print its id.
    Add {
        #[arg(long)]
        event: EventKind,
        /// Command line or URL; may contain <id>, <na>, <dl>, <lb>.
        #[arg(long)]
        command: String,
        #[arg(long = "type", default_value = "script")]
        command_type: CommandType,
        #[arg(long, default_value = "")]
        label: String,
        /// Seconds to wait before running; non-numeric means no delay.
        #[arg(long, default_value = "0")]
        delay: String,
    },
    /// Print every stored command.
    List,
    /// Remove a command by id.
    Remove { id: String },
    /// Change the event and command line of a stored command.
    Save {
        id: String,
        #[arg(long)]
        event: EventKind,
        #[arg(long)]
        command: String,
    },
    /// Fire an item event against the stored commands.
    Fire(FireArgs),
}

/// Item described on the command line for `fire`.
#[derive(Debug, Clone, Args)]
pub struct FireArgs {
    #[arg(long)]
    pub event: EventKind,
    #[arg(long, value_name = "ID")]
    pub item_id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long, value_name = "PATH")]
    pub save_path: String,
    /// When given, the item counts as moved on completion to this path.
    #[arg(long, value_name = "PATH")]
    pub move_on_completed_path: Option<String>,
    #[arg(long, default_value = "")]
    pub label: String,
    /// Extra notification arguments (repeatable).
    #[arg(long = "arg", value_name = "VALUE")]
    pub extra: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
