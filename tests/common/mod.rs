//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file or directory exists in the test project
    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the embra binary in the project directory
#[allow(dead_code)]
pub fn run_embra(project: &TestProject, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_embra"));
    cmd.current_dir(project.path());
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute embra")
}

/// Stderr of a finished invocation as a string
#[allow(dead_code)]
pub fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Sample manifest with one AVR and one native target
#[allow(dead_code)]
pub const SAMPLE_MANIFEST: &str = r#"
[project]
name = "blink"

[options]
default_target = "main"

[targets.main]
platform = "avr"
framework = "cosa@1.1.0"
board = "uno"
compile_flags = ["-Os"]

[targets.host]
platform = "native"
"#;

/// Sample manifest without a default target
#[allow(dead_code)]
pub const NO_DEFAULT_MANIFEST: &str = r#"
[project]
name = "blink"

[targets.host]
platform = "native"
"#;

/// Sample manifest whose default target is not declared
#[allow(dead_code)]
pub const BAD_DEFAULT_MANIFEST: &str = r#"
[project]
name = "blink"

[options]
default_target = "ghost"

[targets.host]
platform = "native"
"#;

/// Sample header-only manifest with a single native target
#[allow(dead_code)]
pub const HEADER_ONLY_MANIFEST: &str = r#"
[project]
name = "hdr"

[options]
default_target = "host"
header_only = true

[targets.host]
platform = "native"
"#;
