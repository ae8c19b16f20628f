//! Local framework store
//!
//! Installed frameworks live under the data directory as
//! `frameworks/<platform>/<name>/<version>/`. The store is written only
//! during the sequential pre-phase of an invocation; concurrent build
//! units read from it without coordination.

use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::FrameworkError;
use crate::infra::dirs::EmbraDirs;
use crate::infra::filesystem;

/// Store of unpacked framework trees
#[derive(Debug, Clone)]
pub struct FrameworkStore {
    root: PathBuf,
}

impl FrameworkStore {
    /// Create a store rooted at an explicit directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the store at the platform-default location
    pub fn from_dirs(dirs: &EmbraDirs) -> Self {
        Self::new(dirs.frameworks_dir())
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a framework version is (or would be) installed at
    pub fn install_path(&self, platform: &str, name: &str, version: &str) -> PathBuf {
        self.root.join(platform).join(name).join(version)
    }

    /// Whether a framework version is already installed
    pub fn is_installed(&self, platform: &str, name: &str, version: &str) -> bool {
        self.install_path(platform, name, version).is_dir()
    }

    /// Unpack a downloaded .tar.gz archive into the store.
    ///
    /// A partially written tree from a failed earlier attempt is replaced.
    pub fn install_archive(
        &self,
        archive: &Path,
        platform: &str,
        name: &str,
        version: &str,
    ) -> Result<PathBuf, FrameworkError> {
        let dest = self.install_path(platform, name, version);

        filesystem::remove_dir_all(&dest).map_err(|e| FrameworkError::Install {
            path: dest.clone(),
            error: e.to_string(),
        })?;
        filesystem::create_dir_all(&dest).map_err(|e| FrameworkError::Install {
            path: dest.clone(),
            error: e.to_string(),
        })?;

        let file = std::fs::File::open(archive).map_err(|e| FrameworkError::Install {
            path: archive.to_path_buf(),
            error: e.to_string(),
        })?;
        let mut tarball = Archive::new(GzDecoder::new(file));
        if let Err(e) = tarball.unpack(&dest) {
            // Do not leave a half-unpacked tree looking installed
            let _ = filesystem::remove_dir_all(&dest);
            return Err(FrameworkError::Install {
                path: archive.to_path_buf(),
                error: e.to_string(),
            });
        }

        Ok(dest)
    }
}
