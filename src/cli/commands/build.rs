//! Build command implementation
//!
//! Implements `embra build`: select targets, provision frameworks,
//! generate build directives, and drive the external tool concurrently
//! across all selected targets.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::cli::output;
use crate::config::defaults;
use crate::core::directives::{resolve_target, write_directives};
use crate::core::executor::{Executor, TargetUnit};
use crate::core::framework::provision_framework;
use crate::core::manifest::{validate_manifest, Manifest};
use crate::core::project::{ProvisionedFramework, Target};
use crate::core::resolver::{merge_project_libraries, scan_local_libraries};
use crate::core::selector::select_targets;
use crate::infra::dirs::EmbraDirs;
use crate::infra::process::{find_tool, SystemRunner};
use crate::registry::{FrameworkStore, RegistryClient};

/// Build options
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Target names; empty means the project default
    pub targets: Vec<String>,
    /// Build every declared target
    pub all: bool,
}

/// Execute the build command
pub async fn execute(project_dir: &Path, options: BuildOptions) -> Result<()> {
    let manifest = load_manifest(project_dir)?;

    output::phase("Reading targets");
    let targets = select_targets(&manifest, &options.targets, options.all)?;
    tracing::info!("Selected {} targets", targets.len());

    let units = prepare_targets(project_dir, &manifest, targets).await?;

    find_tool("cmake").context("cmake is required to build")?;

    output::phase("Building targets");
    let executor = Executor::new(Arc::new(SystemRunner));
    println!("Running with JOBS={}", executor.jobs());
    executor.build(units).await?;

    output::success("Done!");
    Ok(())
}

/// Load and structurally validate the project manifest
pub(crate) fn load_manifest(project_dir: &Path) -> Result<Manifest> {
    let manifest = Manifest::load(project_dir)?;
    if let Err(errors) = validate_manifest(&manifest) {
        bail!("Invalid manifest:\n  {}", errors.join("\n  "));
    }
    Ok(manifest)
}

/// The sequential pre-phase: provision frameworks, resolve libraries, and
/// write per-target directives. Runs strictly before any concurrent unit
/// starts, so every configuration-class error aborts the invocation with
/// no targets attempted.
pub(crate) async fn prepare_targets(
    project_dir: &Path,
    manifest: &Manifest,
    targets: Vec<Target>,
) -> Result<Vec<TargetUnit>> {
    let dirs = EmbraDirs::new();
    let store = FrameworkStore::from_dirs(&dirs);
    let client = RegistryClient::new();
    let downloads_dir = dirs.downloads_dir();

    let spinner = output::create_spinner("Provisioning frameworks");
    let mut frameworks: Vec<Option<ProvisionedFramework>> = Vec::with_capacity(targets.len());
    for target in &targets {
        spinner.set_message(format!("Provisioning frameworks: {}", target.name));
        let provisioned = provision_framework(target, &store, &client, &downloads_dir).await;
        match provisioned {
            Ok(framework) => frameworks.push(framework),
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e.into());
            }
        }
    }
    spinner.finish_and_clear();

    output::phase("Generating files");
    let local = scan_local_libraries(&project_dir.join(defaults::LIB_DIR));
    let merged = merge_project_libraries(&manifest.libraries, &local)?;

    let mut units = Vec::with_capacity(targets.len());
    for (target, framework) in targets.into_iter().zip(frameworks) {
        let resolved = resolve_target(project_dir, &merged, target, framework)?;
        write_directives(&resolved, manifest)?;
        units.push(TargetUnit {
            name: resolved.target.name.clone(),
            work_dir: resolved.work_dir.clone(),
        });
    }
    Ok(units)
}
