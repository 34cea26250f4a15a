//! Output relay between the background runtime and the UI thread.
//!
//! A thin wrapper over an unbounded `std::sync::mpsc` channel. Producers on
//! any thread push entries without blocking; the UI drains everything that
//! is currently queued on each tick.

use std::sync::mpsc::{self, Receiver, Sender};

/// Severity tag attached to every log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Status information (run started).
    Info,
    /// Run finished with exit code zero.
    Success,
    /// Standard error output, failed runs and launcher errors.
    Error,
    /// Untagged standard output.
    Plain,
}

/// One line of text headed for the log pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub tag: Tag,
}

impl LogEntry {
    pub fn new(text: impl Into<String>, tag: Tag) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Tag::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Tag::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Tag::Error)
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tag::Plain)
    }
}

/// Create a connected sender/receiver pair.
pub fn relay() -> (RelaySender, Relay) {
    let (tx, rx) = mpsc::channel();
    (RelaySender { tx }, Relay { rx })
}

/// Producer half. Cheap to clone and safe to move across threads.
#[derive(Clone)]
pub struct RelaySender {
    tx: Sender<LogEntry>,
}

impl RelaySender {
    /// Queue an entry. Never blocks; entries are dropped silently once the
    /// consuming side has gone away.
    pub fn push(&self, entry: LogEntry) {
        let _ = self.tx.send(entry);
    }
}

/// Consumer half, owned by the UI thread.
pub struct Relay {
    rx: Receiver<LogEntry>,
}

impl Relay {
    /// Take every entry currently queued, oldest first.
    pub fn drain_all(&self) -> Vec<LogEntry> {
        self.rx.try_iter().collect()
    }
}
