//! Shared testing utilities for hostup CLI tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Absolute path to the isolated root directory.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write a config file rooted inside the isolated directory and return
    /// its path. All target paths stay inside the sandbox.
    pub fn write_config(&self, domain: &str) -> PathBuf {
        let config_path = self.path().join("hostup.toml");
        let content = format!(
            r#"domain = "{domain}"
acme_email = "ops@{domain}"
data_dir = "{data_dir}"
unit_path = "{unit_path}"
"#,
            data_dir = self.path().join("n8n").display(),
            unit_path = self.path().join("n8n-stack.service").display(),
        );
        fs::write(&config_path, content).expect("Failed to write test config");
        config_path
    }

    /// Build a command for invoking the compiled `hostup` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("hostup").expect("Failed to locate hostup binary");
        cmd.current_dir(self.path());
        cmd
    }
}
