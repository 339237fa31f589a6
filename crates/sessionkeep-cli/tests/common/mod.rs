use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Isolated session file for one test.
pub struct TestHome {
    _dir: TempDir,
    pub session_file: PathBuf,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let session_file = dir.path().join("session.json");
        Self {
            _dir: dir,
            session_file,
        }
    }

    /// Read the raw session file as JSON, if it exists.
    pub fn stored(&self) -> Option<serde_json::Value> {
        let content = std::fs::read_to_string(&self.session_file).ok()?;
        serde_json::from_str(&content).ok()
    }
}

/// Run the CLI binary against `service` using `session_file` for storage.
pub fn run_cli(args: &[&str], session_file: &Path, service: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sessionkeep"));
    cmd.args(args);
    cmd.arg("--service").arg(service);
    cmd.arg("--session-file").arg(session_file);
    cmd.arg("--timeout-secs").arg("2");
    cmd.env_remove("SESSIONKEEP_SERVICE");
    cmd.env_remove("SESSIONKEEP_SESSION_FILE");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], session_file: &Path, service: &str) -> String {
    let output = run_cli(args, session_file, service);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str], session_file: &Path, service: &str) -> String {
    let output = run_cli(args, session_file, service);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
