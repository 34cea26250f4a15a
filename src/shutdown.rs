//! Signal handling for the launcher.
//!
//! In raw mode the terminal delivers Ctrl+C as a key event, but SIGINT and
//! SIGTERM can still arrive from outside (`kill`, a closing terminal). The
//! handler only raises a flag; the UI loop polls it and exits through the
//! normal path so the terminal is restored.
//!
//! # Example
//!
//! ```ignore
//! use launcher::shutdown;
//!
//! shutdown::register_handler()?;
//! if shutdown::requested() {
//!     // leave the event loop
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag indicating shutdown has been requested.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Register the SIGINT/SIGTERM handler.
///
/// Should be called once at program startup.
pub fn register_handler() -> Result<(), String> {
    ctrlc::set_handler(move || {
        SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
    })
    .map_err(|e| format!("failed to register signal handler: {}", e))
}

/// Check if shutdown has been requested.
pub fn requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}

/// Programmatically request shutdown.
pub fn request() {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

/// Reset the shutdown state.
///
/// Primarily for testing.
pub fn reset() {
    SHUTDOWN_REQUESTED.store(false, Ordering::SeqCst);
}
