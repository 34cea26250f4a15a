use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::types::{Config, ConfigError};

/// On-disk layout of launcher.toml. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct FileConfig {
    pub runner: RunnerSection,
    pub ui: UiSection,
    pub log: LogSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct RunnerSection {
    pub runtime: Option<String>,
    pub scripts_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct UiSection {
    pub poll_interval_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct LogSection {
    pub file: Option<PathBuf>,
    pub level: Option<String>,
}

pub(super) fn load_from_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn parse_toml(content: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Overlay the keys present in the file onto `config`.
pub(super) fn apply_file(config: &mut Config, file: FileConfig) {
    if let Some(runtime) = file.runner.runtime {
        config.runtime = runtime;
    }
    if let Some(dir) = file.runner.scripts_dir {
        config.scripts_dir = dir;
    }
    if let Some(ms) = file.ui.poll_interval_ms {
        config.poll_interval_ms = ms;
    }
    if let Some(path) = file.log.file {
        config.log_file = Some(path);
    }
    if let Some(level) = file.log.level {
        config.log_level = level;
    }
}
