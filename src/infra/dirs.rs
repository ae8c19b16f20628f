//! Platform-specific directory management
//!
//! Provides platform-specific paths for the framework store, downloads,
//! and the environment file. Follows the XDG Base Directory Specification
//! on Linux and standard locations on macOS.
//!
//! Environment variables can override default directories:
//! - `EMBRA_CACHE_DIR` - Override cache directory
//! - `EMBRA_CONFIG_DIR` - Override config directory
//! - `EMBRA_DATA_DIR` - Override data directory

use std::env;
use std::path::PathBuf;

use crate::config::defaults;

/// Environment variable names for directory overrides
pub const ENV_CACHE_DIR: &str = "EMBRA_CACHE_DIR";
pub const ENV_CONFIG_DIR: &str = "EMBRA_CONFIG_DIR";
pub const ENV_DATA_DIR: &str = "EMBRA_DATA_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "embra";

/// Subdirectory of the data directory holding installed frameworks
const FRAMEWORKS_SUBDIR: &str = "frameworks";

/// Subdirectory of the cache directory holding downloaded archives
const DOWNLOADS_SUBDIR: &str = "downloads";

/// Platform-specific directory provider for embra
#[derive(Debug, Clone)]
pub struct EmbraDirs {
    cache_dir: PathBuf,
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl EmbraDirs {
    /// Create a new `EmbraDirs` instance
    ///
    /// Checks environment variables first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache_dir: Self::resolve(ENV_CACHE_DIR, Self::platform_cache_dir),
            config_dir: Self::resolve(ENV_CONFIG_DIR, Self::platform_config_dir),
            data_dir: Self::resolve(ENV_DATA_DIR, Self::platform_data_dir),
        }
    }

    /// Get the cache directory path
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone()
    }

    /// Get the config directory path
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the data directory path
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    /// Root of the local framework store
    #[must_use]
    pub fn frameworks_dir(&self) -> PathBuf {
        self.data_dir.join(FRAMEWORKS_SUBDIR)
    }

    /// Directory holding downloaded framework archives
    #[must_use]
    pub fn downloads_dir(&self) -> PathBuf {
        self.cache_dir.join(DOWNLOADS_SUBDIR)
    }

    /// Path of the environment file
    #[must_use]
    pub fn env_file_path(&self) -> PathBuf {
        self.config_dir.join(defaults::ENV_FILE)
    }

    fn resolve(var: &str, fallback: fn() -> PathBuf) -> PathBuf {
        if let Ok(path) = env::var(var) {
            return PathBuf::from(path);
        }
        fallback()
    }

    fn platform_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".cache").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".cache").join(APP_NAME))
            })
    }

    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }

    fn platform_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".local").join("share").join(APP_NAME))
                    .unwrap_or_else(|| {
                        PathBuf::from(".")
                            .join(".local")
                            .join("share")
                            .join(APP_NAME)
                    })
            })
    }
}

impl Default for EmbraDirs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_new_creates_instance() {
        let dirs = EmbraDirs::new();
        assert!(!dirs.cache_dir().as_os_str().is_empty());
        assert!(!dirs.config_dir().as_os_str().is_empty());
        assert!(!dirs.data_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_frameworks_dir_is_under_data_dir() {
        let dirs = EmbraDirs::new();
        assert!(dirs.frameworks_dir().starts_with(dirs.data_dir()));
    }

    #[test]
    fn test_downloads_dir_is_under_cache_dir() {
        let dirs = EmbraDirs::new();
        assert!(dirs.downloads_dir().starts_with(dirs.cache_dir()));
    }

    #[test]
    fn test_env_file_is_under_config_dir() {
        let dirs = EmbraDirs::new();
        assert!(dirs.env_file_path().starts_with(dirs.config_dir()));
        assert!(dirs.env_file_path().ends_with("embra.env"));
    }
}
