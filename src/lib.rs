//! Activity launcher: run a fixed set of scripts and watch their output.
//!
//! A background tokio runtime spawns each script, splits its stdout and
//! stderr into tagged lines, and pushes them onto a relay that the
//! terminal UI drains on a fixed period.
//!
//! - [`activity`] - the compiled-in activity registry
//! - [`runner`] - process supervision on the background runtime
//! - [`relay`] - the cross-thread queue of log entries
//! - [`tui`] - the launcher window

pub mod activity;
pub mod color;
pub mod config;
pub mod logging;
pub mod process_group;
pub mod relay;
pub mod runner;
pub mod shutdown;
pub mod tui;
