//! External process invocation
//!
//! The orchestrator drives the external build tool through the
//! [`CommandRunner`] capability so tests can substitute a fake that never
//! spawns real processes. The system implementation inherits the parent's
//! standard streams and reports the exit code as the sole success signal.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ExecutionError;

/// Exit code reported when a process was terminated by a signal
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Capability interface for running external tools in a working directory
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` inside `dir` and return its exit code
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> io::Result<i32>;
}

/// Runner backed by real subprocesses
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> io::Result<i32> {
        tracing::debug!("Running {} {:?} in {}", program, args, dir.display());
        let status = Command::new(program)
            .args(args)
            .current_dir(dir)
            .status()?;
        Ok(status.code().unwrap_or(SIGNAL_EXIT_CODE))
    }
}

/// CMake generator matching the host platform's make flavor
pub fn cmake_generator() -> &'static str {
    if cfg!(target_os = "windows") {
        "MinGW Makefiles"
    } else {
        "Unix Makefiles"
    }
}

/// Name of the make-style build tool for the host platform
pub fn build_tool() -> &'static str {
    if cfg!(target_os = "windows") {
        "mingw32-make"
    } else {
        "make"
    }
}

/// Locate a required tool in PATH
pub fn find_tool(name: &str) -> Result<PathBuf, ExecutionError> {
    which::which(name).map_err(|_| ExecutionError::ToolNotFound {
        tool: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_matches_build_tool() {
        // Both follow the same host flavor
        let generator = cmake_generator();
        let tool = build_tool();
        if tool == "make" {
            assert_eq!(generator, "Unix Makefiles");
        } else {
            assert_eq!(generator, "MinGW Makefiles");
        }
    }

    #[test]
    fn test_system_runner_reports_exit_code() {
        let runner = SystemRunner;
        let dir = std::env::temp_dir();
        let code = runner
            .run(&dir, "sh", &["-c".to_string(), "exit 3".to_string()])
            .unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    fn test_find_tool_missing() {
        let err = find_tool("definitely-not-a-real-tool-xyz").unwrap_err();
        assert!(matches!(err, ExecutionError::ToolNotFound { .. }));
    }
}
