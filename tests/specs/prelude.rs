//! Helpers for driving the built binary.

use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub use tempfile::TempDir;

/// `imgqa` with colors off and no user config.
pub fn cli() -> Cli {
    let mut cmd = Command::cargo_bin("imgqa").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("IMGQA_CONFIG", "/nonexistent/imgqa/config.toml")
        .env_remove("IMGQA_LOG")
        .env_remove("IMGQA_OPENQA_KEY")
        .env_remove("IMGQA_OPENQA_SECRET");
    Cli { cmd }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn arg_path(mut self, path: &Path) -> Self {
        self.cmd.arg(path);
        self
    }

    pub fn passes(mut self) -> Output {
        Output::from(self.cmd.assert().success().get_output())
    }

    pub fn exits_with(mut self, code: i32) -> Output {
        Output::from(self.cmd.assert().code(code).get_output())
    }
}

pub struct Output {
    pub stdout: String,
    pub stderr: String,
}

impl From<&std::process::Output> for Output {
    fn from(output: &std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout lacks {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr lacks {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}

/// Temporary directory holding one file.
pub fn file_in_temp(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
