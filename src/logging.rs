//! Diagnostics logging built on `tracing`.
//!
//! The full-screen UI owns the terminal, so diagnostics either go to a file
//! through a non-blocking appender or are discarded. Headless commands may
//! log to stderr instead.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Keeps the appender worker alive so buffered lines are flushed.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Where diagnostics should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink<'a> {
    /// Append to the given file.
    File(&'a Path),
    /// Write to stderr.
    Stderr,
    /// Discard everything.
    Off,
}

/// Build the filter: `RUST_LOG` wins, otherwise `default_level`.
pub fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Calling it twice is harmless; the first
/// subscriber stays.
pub fn init(sink: Sink<'_>, default_level: &str) -> io::Result<()> {
    match sink {
        Sink::Off => Ok(()),
        Sink::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter(default_level))
                .with_writer(io::stderr)
                .with_target(false)
                .try_init();
            Ok(())
        }
        Sink::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);

            let installed = tracing_subscriber::fmt()
                .with_env_filter(filter(default_level))
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .is_ok();

            if installed {
                let mut slot = LOG_WORKER_GUARD.lock().unwrap_or_else(|e| e.into_inner());
                *slot = Some(guard);
            }
            Ok(())
        }
    }
}

/// Flush and drop the file writer. Call before the process exits.
pub fn shutdown() {
    let mut slot = LOG_WORKER_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    slot.take();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_level_names() {
        let f = filter("debug");
        assert!(f.to_string().contains("debug") || std::env::var("RUST_LOG").is_ok());
    }

    #[test]
    fn test_off_sink_installs_nothing() {
        init(Sink::Off, "info").expect("off never fails");
    }

    #[test]
    fn test_file_sink_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("launcher.log");
        init(Sink::File(&path), "info").expect("init file logging");
        assert!(path.exists());
        shutdown();
    }
}
