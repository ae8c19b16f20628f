//! Clean command implementation
//!
//! Implements `embra clean`: a soft clean delegates to the external
//! tool's clean step per target, `--hard` removes each target's working
//! directory tree.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::output;
use crate::core::executor::{Executor, TargetUnit};
use crate::core::paths;
use crate::core::selector::select_targets;
use crate::infra::process::SystemRunner;

use super::build::load_manifest;

/// Clean options
#[derive(Debug, Default)]
pub struct CleanOptions {
    /// Target names; empty means the project default
    pub targets: Vec<String>,
    /// Clean every declared target
    pub all: bool,
    /// Remove working directories instead of a tool-driven clean
    pub hard: bool,
}

/// Execute the clean command
pub async fn execute(project_dir: &Path, options: CleanOptions) -> Result<()> {
    let manifest = load_manifest(project_dir)?;

    output::phase("Reading targets");
    let targets = select_targets(&manifest, &options.targets, options.all)?;

    let units: Vec<TargetUnit> = targets
        .iter()
        .map(|target| TargetUnit {
            name: target.name.clone(),
            work_dir: paths::target_dir(project_dir, &target.name),
        })
        .collect();

    output::phase("Cleaning targets");
    let executor = Executor::new(Arc::new(SystemRunner));
    executor.clean(units, options.hard).await?;

    output::success("Done!");
    Ok(())
}
