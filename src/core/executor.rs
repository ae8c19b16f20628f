//! Concurrent execution of per-target actions
//!
//! Each selected target becomes one independent unit of work driving the
//! external build tool in its own working directory. Units share nothing
//! mutable; the only synchronization point is the aggregation step, which
//! drains unit results strictly in submission order and reports the
//! earliest-indexed failure once every unit has finished. Units are never
//! cancelled; a failure does not stop siblings.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::defaults;
use crate::error::ExecutionError;
use crate::infra::filesystem;
use crate::infra::process::{build_tool, cmake_generator, CommandRunner};

/// One target's unit of work: its name and exclusively owned working
/// directory
#[derive(Debug, Clone)]
pub struct TargetUnit {
    /// Target name, for error attribution
    pub name: String,
    /// Working directory under the project build root
    pub work_dir: PathBuf,
}

/// Drives build/clean/run actions across target units
#[derive(Clone)]
pub struct Executor {
    runner: Arc<dyn CommandRunner>,
    jobs: usize,
}

impl Executor {
    /// Create an executor sized for the host CPU count
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self::with_jobs(runner, defaults::build_jobs())
    }

    /// Create an executor with an explicit job count
    pub fn with_jobs(runner: Arc<dyn CommandRunner>, jobs: usize) -> Self {
        Self { runner, jobs }
    }

    /// Number of parallel jobs passed to the external tool
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Build every unit concurrently
    pub async fn build(&self, units: Vec<TargetUnit>) -> Result<(), ExecutionError> {
        tracing::info!("Building {} targets with JOBS={}", units.len(), self.jobs);
        let runner = Arc::clone(&self.runner);
        let jobs = self.jobs;
        self.execute_all(units, move |unit| build_unit(runner.as_ref(), jobs, &unit))
            .await
    }

    /// Clean every unit concurrently.
    ///
    /// A soft clean delegates to the external tool when the unit's build
    /// area exists and succeeds trivially otherwise; a hard clean removes
    /// the whole working directory tree unconditionally.
    pub async fn clean(&self, units: Vec<TargetUnit>, hard: bool) -> Result<(), ExecutionError> {
        tracing::info!("Cleaning {} targets (hard: {hard})", units.len());
        let runner = Arc::clone(&self.runner);
        self.execute_all(units, move |unit| {
            if hard {
                hard_clean_unit(&unit)
            } else {
                soft_clean_unit(runner.as_ref(), &unit)
            }
        })
        .await
    }

    /// Build a single target if its binary is absent, then execute the
    /// binary with the given arguments
    pub async fn run(
        &self,
        unit: TargetUnit,
        binary: PathBuf,
        args: Vec<String>,
    ) -> Result<(), ExecutionError> {
        if !binary.exists() {
            self.build(vec![unit.clone()]).await?;
        }

        let runner = Arc::clone(&self.runner);
        let name = unit.name.clone();
        let bin_dir = unit.work_dir.join(defaults::BIN_DIR);
        let program = binary.display().to_string();
        let handle = tokio::task::spawn_blocking(move || {
            invoke(runner.as_ref(), &name, &bin_dir, &program, &args)
        });
        handle.await.map_err(|e| ExecutionError::Join {
            target: unit.name,
            error: e.to_string(),
        })?
    }

    /// Fan units out as independent blocking tasks and fan results back in.
    ///
    /// Handles are awaited in the order units were submitted, never in
    /// completion order. Every handle is awaited before the first error
    /// is returned, so a failing invocation still costs the wall clock
    /// of its slowest sibling.
    async fn execute_all<F>(&self, units: Vec<TargetUnit>, op: F) -> Result<(), ExecutionError>
    where
        F: Fn(TargetUnit) -> Result<(), ExecutionError> + Send + Sync + Clone + 'static,
    {
        let mut handles = Vec::with_capacity(units.len());
        for unit in units {
            let op = op.clone();
            let name = unit.name.clone();
            handles.push((name, tokio::task::spawn_blocking(move || op(unit))));
        }

        let mut first_error: Option<ExecutionError> = None;
        for (name, handle) in handles {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(e) => Err(ExecutionError::Join {
                    target: name.clone(),
                    error: e.to_string(),
                }),
            };
            match (outcome, &first_error) {
                (Err(e), None) => first_error = Some(e),
                (Err(e), Some(_)) => {
                    // Only the earliest-indexed failure reaches the caller
                    tracing::debug!("Additional failure in target '{name}': {e}");
                }
                (Ok(()), _) => {}
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Configure-and-compile sequence for one target
fn build_unit(
    runner: &dyn CommandRunner,
    jobs: usize,
    unit: &TargetUnit,
) -> Result<(), ExecutionError> {
    tracing::debug!("Building directory: {}", unit.work_dir.display());
    let bin_dir = unit.work_dir.join(defaults::BIN_DIR);
    filesystem::create_dir_all(&bin_dir)?;

    invoke(
        runner,
        &unit.name,
        &bin_dir,
        "cmake",
        &[
            "..".to_string(),
            "-G".to_string(),
            cmake_generator().to_string(),
        ],
    )?;
    invoke(
        runner,
        &unit.name,
        &bin_dir,
        build_tool(),
        &[format!("-j{jobs}")],
    )
}

/// Tool-driven clean, skipped when there is nothing to clean
fn soft_clean_unit(runner: &dyn CommandRunner, unit: &TargetUnit) -> Result<(), ExecutionError> {
    let bin_dir = unit.work_dir.join(defaults::BIN_DIR);
    if !bin_dir.exists() {
        tracing::debug!("Nothing to clean in {}", unit.work_dir.display());
        return Ok(());
    }
    invoke(
        runner,
        &unit.name,
        &bin_dir,
        build_tool(),
        &["clean".to_string()],
    )
}

/// Unconditional removal of the whole working directory tree
fn hard_clean_unit(unit: &TargetUnit) -> Result<(), ExecutionError> {
    tracing::debug!("Removing directory: {}", unit.work_dir.display());
    filesystem::remove_dir_all(&unit.work_dir)?;
    Ok(())
}

/// Run one external command, mapping a nonzero exit onto the target
fn invoke(
    runner: &dyn CommandRunner,
    target: &str,
    dir: &Path,
    program: &str,
    args: &[String],
) -> Result<(), ExecutionError> {
    let code = runner
        .run(dir, program, args)
        .map_err(|e| ExecutionError::Spawn {
            target: target.to_string(),
            program: program.to_string(),
            error: e.to_string(),
        })?;
    if code != 0 {
        return Err(ExecutionError::BuildTool {
            target: target.to_string(),
            code,
        });
    }
    Ok(())
}
