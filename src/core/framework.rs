//! Framework provisioning
//!
//! Ensures the platform framework a target references is present in the
//! local store before build directives are generated. Only AVR targets
//! need a framework; all other platforms skip provisioning entirely.
//!
//! Provisioning runs in the strictly sequential phase ahead of concurrent
//! execution, so the store sees no concurrent writes.

use std::path::Path;

use crate::core::project::{ProvisionedFramework, Target};
use crate::core::resolver::parse_library_spec;
use crate::error::FrameworkError;
use crate::infra::download::DownloadManager;
use crate::registry::client::RegistryClient;
use crate::registry::store::FrameworkStore;

/// Provision the framework a target needs, fetching it when absent.
///
/// Returns `Ok(None)` for platforms that need no framework. For AVR the
/// framework field is parsed as `name@version`; without a version the
/// registry's latest is used.
pub async fn provision_framework(
    target: &Target,
    store: &FrameworkStore,
    client: &RegistryClient,
    downloads_dir: &Path,
) -> Result<Option<ProvisionedFramework>, FrameworkError> {
    if !target.platform.requires_framework() {
        return Ok(None);
    }

    let spec = target
        .framework_spec()
        .ok_or_else(|| FrameworkError::NotSpecified {
            target: target.name.clone(),
        })?;
    let (name, requested) = parse_library_spec(spec);
    let platform = target.platform.as_str();

    // An exact, already installed version needs no registry round-trip
    if let Some(version) = requested {
        if store.is_installed(platform, name, version) {
            tracing::debug!("Framework {name}@{version} already installed");
            return Ok(Some(ProvisionedFramework {
                name: name.to_string(),
                version: version.to_string(),
                path: store.install_path(platform, name, version),
            }));
        }
    }

    let index = client.fetch_index().await?;
    let asset = index.resolve(platform, name, requested)?;

    if store.is_installed(platform, name, &asset.version) {
        return Ok(Some(ProvisionedFramework {
            name: name.to_string(),
            version: asset.version.clone(),
            path: store.install_path(platform, name, &asset.version),
        }));
    }

    tracing::info!("Fetching framework {name}@{} for {platform}", asset.version);
    let archive = downloads_dir.join(format!("{platform}-{name}-{}.tar.gz", asset.version));
    let manager = DownloadManager::new();
    manager
        .download_verified(&asset.url, &archive, &asset.sha256)
        .await?;

    let path = store.install_archive(&archive, platform, name, &asset.version)?;

    Ok(Some(ProvisionedFramework {
        name: name.to_string(),
        version: asset.version.clone(),
        path,
    }))
}
