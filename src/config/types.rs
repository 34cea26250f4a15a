use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use super::cli::CliArgs;
use super::{env, file};

/// Default period between relay drains in the UI.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "launcher.toml";

#[cfg(windows)]
const DEFAULT_RUNTIME: &str = "python";
#[cfg(not(windows))]
const DEFAULT_RUNTIME: &str = "python3";

/// Launcher configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interpreter each activity script is passed to.
    pub runtime: String,
    /// Directory the built-in activity paths are resolved against.
    pub scripts_dir: PathBuf,
    /// Relay drain period in milliseconds.
    pub poll_interval_ms: u64,
    /// Diagnostics log file. None disables file logging.
    pub log_file: Option<PathBuf>,
    /// Default tracing filter when RUST_LOG is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime: DEFAULT_RUNTIME.to_string(),
            scripts_dir: PathBuf::from("."),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Precedence: CLI args > env vars > config file > defaults.
    ///
    /// A file named with `--config` must load; the implicit launcher.toml is
    /// only read when it exists.
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ref path) = cli_args.config {
            config.merge_file(path)?;
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            config.merge_file(Path::new(DEFAULT_CONFIG_FILE))?;
        }

        env::apply_env(&mut config);
        config.apply_cli(cli_args);

        Ok(config)
    }

    /// Overlay the keys set in a TOML file.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let parsed = file::load_from_file(path)?;
        file::apply_file(self, parsed);
        Ok(())
    }

    /// Apply CLI arguments.
    pub(super) fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(ref runtime) = args.runtime {
            self.runtime = runtime.clone();
        }
        if let Some(ref dir) = args.scripts_dir {
            self.scripts_dir = dir.clone();
        }
        if let Some(ms) = args.poll_interval_ms {
            self.poll_interval_ms = ms;
        }
        if let Some(ref path) = args.log_file {
            self.log_file = Some(path.clone());
        }
    }

    /// Relay drain period, never zero.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Generate default launcher.toml content.
    pub fn default_toml() -> String {
        format!(
            r#"# Launcher configuration

[runner]
runtime = "{}"
scripts_dir = "."

[ui]
poll_interval_ms = {}

[log]
# file = "launcher.log"
level = "info"
"#,
            DEFAULT_RUNTIME, DEFAULT_POLL_INTERVAL_MS
        )
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading config file.
    #[error("config I/O error ({}): {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    /// Parse error in config file.
    #[error("config parse error ({}): {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
