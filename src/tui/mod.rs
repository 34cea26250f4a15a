//! Full-screen launcher window using ratatui.
//!
//! Shows the activity table, a scrollable log pane fed from the relay, and
//! the Run Selected / Clear Terminal / Exit controls.

mod ansi;
mod app;
mod log_pane;
mod render;
mod run;

pub use app::LauncherApp;
pub use log_pane::LogPane;
pub use run::run_ui;
