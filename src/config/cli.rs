use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments parsed from command line.
#[derive(Debug, Default, Parser)]
#[command(
    name = "launcher",
    version,
    about = "Run activity scripts and watch their output"
)]
pub struct CliArgs {
    /// Subcommand to execute (defaults to the interactive UI).
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (default: launcher.toml if present).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Interpreter each script is passed to.
    #[arg(long, value_name = "PROGRAM")]
    pub runtime: Option<String>,

    /// Directory the activity script paths are relative to.
    #[arg(long, value_name = "DIR")]
    pub scripts_dir: Option<PathBuf>,

    /// How often the UI drains queued output.
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Write diagnostics to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Launcher subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the interactive launcher (default).
    Ui,
    /// List the available activities.
    List,
    /// Run one activity and print its output.
    Run {
        /// 1-based index or name of the activity.
        activity: String,
    },
    /// Print a starter launcher.toml.
    InitConfig,
}

/// Parse CLI arguments from an iterator. The first item is the program name.
pub fn parse_args<I, T>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    CliArgs::try_parse_from(args)
}
