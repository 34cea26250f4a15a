use std::io;
use std::thread;

use tokio::runtime::{Builder, Handle};
use tokio::sync::oneshot;

/// A dedicated OS thread driving a current-thread tokio runtime.
///
/// The runtime lives until the `Executor` is dropped. Dropping does not
/// join the thread, and child processes are not killed when their tasks are
/// torn down.
pub struct Executor {
    handle: Handle,
    _stop: oneshot::Sender<()>,
}

impl Executor {
    pub fn start() -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let handle = runtime.handle().clone();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        thread::Builder::new()
            .name("launcher-io".to_string())
            .spawn(move || {
                tracing::debug!("background runtime started");
                // Resolves when the sender half is dropped.
                let _ = runtime.block_on(stop_rx);
                tracing::debug!("background runtime stopping");
            })?;

        Ok(Self {
            handle,
            _stop: stop_tx,
        })
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}
