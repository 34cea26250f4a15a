use std::io;

use tokio::process::{Child, Command};

/// Spawn a command in its own process group when supported.
///
/// Keeps terminal-generated signals (Ctrl+C, Ctrl+Z) aimed at the launcher
/// away from the child.
#[cfg(unix)]
pub fn spawn_in_new_process_group(cmd: &mut Command) -> io::Result<Child> {
    unsafe {
        cmd.pre_exec(|| {
            libc::setpgid(0, 0);
            Ok(())
        });
    }

    cmd.spawn()
}

/// Spawn a command on Windows (process groups are handled differently).
#[cfg(windows)]
pub fn spawn_in_new_process_group(cmd: &mut Command) -> io::Result<Child> {
    cmd.spawn()
}
