//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a bare qat command
pub fn qat() -> Command {
    Command::new(cargo::cargo_bin!("qat"))
}

/// Isolated config and draft locations for one test
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.yaml")
    }

    pub fn draft_path(&self) -> PathBuf {
        self.dir.path().join("draft.json")
    }

    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.config_path(), yaml).unwrap();
    }

    /// A qat command that reads config and drafts only from the sandbox
    pub fn cmd(&self) -> Command {
        let mut cmd = qat();
        cmd.current_dir(self.dir.path())
            .env("QAT_CONFIG", self.config_path())
            .env("QAT_DRAFT", self.draft_path())
            .env("QAT_USER", "Test User")
            .env_remove("QAT_LOG");
        cmd
    }

    /// Run a command and return its stdout
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "qat {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        serde_json::from_str(&self.stdout(args)).unwrap()
    }
}
