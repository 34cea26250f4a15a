use std::env;

use super::types::Config;

pub(super) fn apply_env(config: &mut Config) {
    apply_env_from(config, |key| env::var(key).ok());
}

pub(super) fn apply_env_from<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("LAUNCHER_RUNTIME") {
        if !val.trim().is_empty() {
            config.runtime = val;
        }
    }
    if let Some(val) = lookup("LAUNCHER_SCRIPTS_DIR") {
        config.scripts_dir = val.into();
    }
    if let Some(val) = lookup("LAUNCHER_POLL_INTERVAL_MS") {
        if let Ok(n) = val.parse() {
            config.poll_interval_ms = n;
        }
    }
    if let Some(val) = lookup("LAUNCHER_LOG_FILE") {
        config.log_file = Some(val.into());
    }
    if let Some(val) = lookup("LAUNCHER_LOG_LEVEL") {
        config.log_level = val;
    }
}
