use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can end a run before the child reports an exit status.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("activity has no script path")]
    EmptyPath,

    #[error("script not found: {}", .0.display())]
    ScriptNotFound(PathBuf),

    #[error("failed to start {program}: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("child {0} was not captured")]
    MissingPipe(&'static str),

    #[error("failed to read child {stream}: {source}")]
    Read {
        stream: &'static str,
        source: io::Error,
    },

    #[error("failed waiting for child: {0}")]
    Wait(#[source] io::Error),

    #[error("run task aborted: {0}")]
    Aborted(String),
}
