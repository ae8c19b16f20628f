//! Run command implementation
//!
//! Implements `embra run`: acts on exactly one target (the first of the
//! selection), builds it when its binary is absent, then executes the
//! binary with the user-supplied argument string.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::cli::output;
use crate::core::executor::Executor;
use crate::core::paths;
use crate::core::selector::select_targets;
use crate::infra::process::SystemRunner;

use super::build::{load_manifest, prepare_targets};

/// Run options
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Target name; the project default when omitted
    pub target: Option<String>,
    /// Argument string passed to the binary, split on whitespace
    pub args: Option<String>,
}

/// Execute the run command
pub async fn execute(project_dir: &Path, options: RunOptions) -> Result<()> {
    let manifest = load_manifest(project_dir)?;

    output::phase("Reading targets");
    let names: Vec<String> = options.target.into_iter().collect();
    let mut targets = select_targets(&manifest, &names, false)?;
    let target = targets.drain(..).next().ok_or_else(|| anyhow!("no target selected"))?;
    println!("Target: {}", target.name);

    let units = prepare_targets(project_dir, &manifest, vec![target.clone()]).await?;
    let unit = units
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("no unit prepared for target '{}'", target.name))?;

    let binary = paths::binary_path(project_dir, &target.name, &target.platform);
    let args: Vec<String> = options
        .args
        .map(|s| s.split_whitespace().map(String::from).collect())
        .unwrap_or_default();

    let executor = Executor::new(Arc::new(SystemRunner));
    executor.run(unit, binary, args).await?;

    output::success("Done!");
    Ok(())
}
