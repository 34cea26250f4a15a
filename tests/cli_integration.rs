#![cfg(unix)]

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_launcher");

/// Strip ANSI escape codes from a string.
fn strip_ansi(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until we hit a letter (which ends the escape sequence)
            while let Some(&next) = chars.peek() {
                chars.next();
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Lay out the built-in activity paths under `root` as shell scripts.
fn install_scripts(root: &Path, gather_body: &str) {
    let dir = root.join("unique_face_base_emotional");
    fs::create_dir_all(&dir).expect("create script dir");
    fs::write(dir.join("gather_data.py"), gather_body).expect("write gather");
    fs::write(dir.join("Train_model.py"), "echo training\nexit 3\n").expect("write train");
}

fn launcher(cwd: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .current_dir(cwd)
        .env_remove("LAUNCHER_RUNTIME")
        .env_remove("LAUNCHER_SCRIPTS_DIR")
        .env_remove("LAUNCHER_LOG_FILE")
        .env_remove("LAUNCHER_POLL_INTERVAL_MS")
        .args(args)
        .output()
        .expect("failed to run launcher")
}

fn stdout_of(output: &Output) -> String {
    strip_ansi(&String::from_utf8_lossy(&output.stdout))
}

#[test]
fn test_list_prints_registry() {
    let temp = TempDir::new().expect("temp dir");
    let output = launcher(temp.path(), &["--scripts-dir", "/srv/face", "list"]);
    assert!(output.status.success());

    let out = stdout_of(&output);
    assert!(out.contains(" 1. Gather Training Data  Source for training"));
    assert!(out.contains(" 4. Face Recognition"));
    assert!(out.contains("/srv/face/unique_face_base_emotional/Face_Recognizer_Emotion.py"));
}

#[test]
fn test_run_streams_output_and_exits_zero() {
    let temp = TempDir::new().expect("temp dir");
    install_scripts(temp.path(), "echo gathering\necho 'warn: low light' >&2\nprintf tail\n");

    let output = launcher(
        temp.path(),
        &["--runtime", "sh", "--scripts-dir", ".", "run", "gather training data"],
    );
    assert!(output.status.success());

    let out = stdout_of(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].contains("Starting Gather Training Data..."), "{}", out);
    assert!(lines.contains(&"gathering"));
    assert!(lines.contains(&"warn: low light"));
    assert!(lines.contains(&"tail"));
    assert!(lines
        .last()
        .unwrap()
        .contains("Gather Training Data completed successfully!"));
}

#[test]
fn test_child_exit_code_is_not_propagated() {
    let temp = TempDir::new().expect("temp dir");
    install_scripts(temp.path(), "true\n");

    let output = launcher(temp.path(), &["--runtime", "sh", "run", "3"]);
    assert!(output.status.success(), "host exit code stays 0");

    let out = stdout_of(&output);
    assert!(out
        .lines()
        .last()
        .unwrap()
        .contains("Train Model failed with return code 3"));
}

#[test]
fn test_missing_script_is_reported_in_log() {
    let temp = TempDir::new().expect("temp dir");

    let output = launcher(temp.path(), &["--runtime", "sh", "run", "2"]);
    assert!(output.status.success());
    let out = stdout_of(&output);
    assert!(out.contains("Error running Extract Embeddings: script not found"));
}

#[test]
fn test_unknown_activity_is_an_error() {
    let temp = TempDir::new().expect("temp dir");
    let output = launcher(temp.path(), &["run", "9"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown activity '9'"));
}

#[test]
fn test_config_file_supplies_runtime() {
    let temp = TempDir::new().expect("temp dir");
    install_scripts(temp.path(), "echo via config\n");
    fs::write(
        temp.path().join("launcher.toml"),
        "[runner]\nruntime = \"sh\"\nscripts_dir = \".\"\n",
    )
    .expect("write config");

    let output = launcher(temp.path(), &["run", "1"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("via config"));
}

#[test]
fn test_init_config_prints_starter_file() {
    let temp = TempDir::new().expect("temp dir");
    let output = launcher(temp.path(), &["init-config"]);
    assert!(output.status.success());
    let out = stdout_of(&output);
    assert!(out.contains("[runner]"));
    assert!(out.contains("poll_interval_ms = 100"));
}

#[test]
fn test_interrupted_run_detaches_child() {
    let temp = TempDir::new().expect("temp dir");
    install_scripts(temp.path(), "echo hello\nsleep 5\n");

    let mut child = Command::new(BIN)
        .current_dir(temp.path())
        .args(["--runtime", "sh", "--scripts-dir", ".", "run", "1"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn launcher");

    let mut stdout = BufReader::new(child.stdout.take().expect("stdout"));
    let mut line = String::new();
    loop {
        line.clear();
        let n = stdout.read_line(&mut line).expect("read stdout");
        assert!(n > 0, "launcher exited before the script printed");
        if strip_ansi(&line).trim() == "hello" {
            break;
        }
    }

    unsafe {
        libc::kill(child.id() as i32, libc::SIGINT);
    }
    let output = child.wait_with_output().expect("wait launcher");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("interrupted; Gather Training Data is left running with its output detached"),
        "stderr: {}",
        stderr
    );
}
