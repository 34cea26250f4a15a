//! Process runner.
//!
//! Each run spawns `<program> <script>` on the background runtime, drains
//! stdout and stderr concurrently into the relay, and finishes with exactly
//! one status entry once both streams have closed and the child has exited.

mod error;
mod executor;
mod lines;

pub use error::RunError;
pub use executor::Executor;
pub use lines::LineSplitter;

use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use chrono::Local;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::activity::Activity;
use crate::color::emoji;
use crate::process_group::spawn_in_new_process_group;
use crate::relay::{LogEntry, RelaySender, Tag};

/// Bytes requested per read from a child pipe.
pub const READ_CHUNK: usize = 8192;

/// Something that can start an activity without blocking the caller.
pub trait Launch {
    fn launch(&self, activity: &Activity);

    /// Runs started but not yet finished.
    fn active_runs(&self) -> usize {
        0
    }
}

/// Starts activities on a background runtime and reports through a relay.
pub struct Runner {
    handle: Handle,
    program: String,
    relay: RelaySender,
    active: Arc<AtomicUsize>,
}

impl Runner {
    /// `program` is the interpreter each script is passed to.
    pub fn new(handle: Handle, program: impl Into<String>, relay: RelaySender) -> Self {
        Self {
            handle,
            program: program.into(),
            relay,
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Start a run. The start entry is queued before this returns; the rest
    /// of the run happens on the background runtime.
    pub fn run(&self, activity: &Activity) -> RunHandle {
        self.relay.push(LogEntry::info(format!(
            "[{}] {} Starting {}...",
            timestamp(),
            emoji::ZAP,
            activity.name
        )));
        tracing::info!(activity = %activity.name, path = %activity.path.display(), "run requested");

        let (done_tx, done_rx) = mpsc::channel();
        let guard = ActiveGuard::enter(&self.active);

        let program = self.program.clone();
        let owned = activity.clone();
        let relay = self.relay.clone();
        let task = self
            .handle
            .spawn(async move { execute(&program, &owned, &relay).await });

        self.handle.spawn(supervise(
            task,
            activity.name.clone(),
            self.relay.clone(),
            guard,
            done_tx,
        ));

        RunHandle { done: done_rx }
    }
}

impl Launch for Runner {
    fn launch(&self, activity: &Activity) {
        self.run(activity);
    }

    fn active_runs(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Completion signal for one run. Dropping it does not affect the run.
pub struct RunHandle {
    done: mpsc::Receiver<()>,
}

impl RunHandle {
    /// Block until the final status entry has been queued or `timeout`
    /// elapses. Returns `false` on timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.done.recv_timeout(timeout) {
            Ok(()) => true,
            Err(mpsc::RecvTimeoutError::Disconnected) => true,
            Err(mpsc::RecvTimeoutError::Timeout) => false,
        }
    }
}

struct ActiveGuard(Arc<AtomicUsize>);

impl ActiveGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Await a run task and queue its single final entry. A panicked or
/// cancelled task still ends the run with an error line.
async fn supervise(
    task: JoinHandle<Result<ExitStatus, RunError>>,
    name: String,
    relay: RelaySender,
    guard: ActiveGuard,
    done_tx: mpsc::Sender<()>,
) {
    let result = match task.await {
        Ok(result) => result,
        Err(e) => Err(RunError::Aborted(e.to_string())),
    };
    relay.push(finish_entry(&name, result));
    drop(guard);
    let _ = done_tx.send(());
}

async fn execute(
    program: &str,
    activity: &Activity,
    relay: &RelaySender,
) -> Result<ExitStatus, RunError> {
    if activity.path.as_os_str().is_empty() {
        return Err(RunError::EmptyPath);
    }
    if !activity.path.exists() {
        return Err(RunError::ScriptNotFound(activity.path.clone()));
    }

    let mut cmd = Command::new(program);
    cmd.arg(&activity.path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = spawn_in_new_process_group(&mut cmd).map_err(|source| RunError::Spawn {
        program: program.to_string(),
        source,
    })?;
    tracing::debug!(activity = %activity.name, pid = ?child.id(), "child spawned");

    let stdout = child.stdout.take().ok_or(RunError::MissingPipe("stdout"))?;
    let stderr = child.stderr.take().ok_or(RunError::MissingPipe("stderr"))?;

    let (out, err) = tokio::join!(
        pump(stdout, Tag::Plain, relay),
        pump(stderr, Tag::Error, relay)
    );
    out.map_err(|source| RunError::Read {
        stream: "stdout",
        source,
    })?;
    err.map_err(|source| RunError::Read {
        stream: "stderr",
        source,
    })?;

    child.wait().await.map_err(RunError::Wait)
}

/// Forward every line read from `reader` to the relay with `tag`.
async fn pump<R>(mut reader: R, tag: Tag, relay: &RelaySender) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut splitter = LineSplitter::new();
    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        for line in splitter.push(&chunk[..n]) {
            relay.push(LogEntry::new(line, tag));
        }
    }
    if let Some(rest) = splitter.finish() {
        relay.push(LogEntry::new(rest, tag));
    }
    Ok(())
}

/// Turn the outcome of a run into its final log entry.
fn finish_entry(name: &str, result: Result<ExitStatus, RunError>) -> LogEntry {
    let ts = timestamp();
    match result {
        Ok(status) if status.success() => {
            tracing::info!(activity = %name, "run completed");
            LogEntry::success(format!(
                "[{}] {} {} completed successfully!",
                ts,
                emoji::CHECK,
                name
            ))
        }
        Ok(status) => match status.code() {
            Some(code) => {
                tracing::warn!(activity = %name, code, "run failed");
                LogEntry::error(format!(
                    "[{}] {} {} failed with return code {}",
                    ts,
                    emoji::CROSS,
                    name,
                    code
                ))
            }
            None => {
                let signal = termination_signal(&status);
                tracing::warn!(activity = %name, signal = ?signal, "run terminated by signal");
                LogEntry::error(format!(
                    "[{}] {} {} was terminated by signal {}",
                    ts,
                    emoji::CROSS,
                    name,
                    signal.map_or_else(|| "unknown".to_string(), |s| s.to_string())
                ))
            }
        },
        Err(e) => {
            tracing::error!(activity = %name, error = %e, "run error");
            LogEntry::error(format!(
                "[{}] {} Error running {}: {}",
                ts,
                emoji::CROSS,
                name,
                e
            ))
        }
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
