//! Configuration loading for the launcher.
//!
//! Supports launcher.toml, CLI flags, and environment variables.
//! Precedence (highest to lowest): CLI flags > env vars > config file > defaults.

mod cli;
mod env;
mod file;
mod types;

pub use cli::{parse_args, CliArgs, Command};
pub use types::{Config, ConfigError, DEFAULT_CONFIG_FILE, DEFAULT_POLL_INTERVAL_MS};
