//! Path and naming helpers
//!
//! Pure functions computing per-target locations and platform-specific
//! binary names. No filesystem access happens here.

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::project::Platform;

/// Root of all target working directories for a project
pub fn build_root(project_dir: &Path) -> PathBuf {
    project_dir.join(defaults::BUILD_ROOT)
}

/// Working directory of one target
pub fn target_dir(project_dir: &Path, target_name: &str) -> PathBuf {
    build_root(project_dir).join(target_name)
}

/// Build-tool state and binary directory of one target
pub fn bin_dir(project_dir: &Path, target_name: &str) -> PathBuf {
    target_dir(project_dir, target_name).join(defaults::BIN_DIR)
}

/// Platform-specific executable suffix
///
/// `.elf` for AVR, `.exe` for native builds on Windows hosts, empty
/// otherwise.
pub fn platform_extension(platform: &Platform) -> &'static str {
    match platform {
        Platform::Avr => ".elf",
        Platform::Native => native_extension(),
        Platform::Other(_) => "",
    }
}

fn native_extension() -> &'static str {
    if cfg!(target_os = "windows") {
        ".exe"
    } else {
        ""
    }
}

/// Full path of the binary a target produces
pub fn binary_path(project_dir: &Path, target_name: &str, platform: &Platform) -> PathBuf {
    bin_dir(project_dir, target_name).join(format!(
        "{target_name}{}",
        platform_extension(platform)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_target_dir_is_under_build_root() {
        let project = Path::new("/proj");
        let dir = target_dir(project, "main");
        assert!(dir.starts_with(build_root(project)));
        assert!(dir.ends_with("main"));
    }

    #[test]
    fn test_bin_dir_is_under_target_dir() {
        let project = Path::new("/proj");
        assert_eq!(
            bin_dir(project, "main"),
            target_dir(project, "main").join("bin")
        );
    }

    #[test]
    fn test_avr_extension() {
        assert_eq!(platform_extension(&Platform::Avr), ".elf");
    }

    #[test]
    fn test_unknown_platform_extension_is_empty() {
        assert_eq!(platform_extension(&Platform::Other("arm".to_string())), "");
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_native_extension_is_empty_off_windows() {
        assert_eq!(platform_extension(&Platform::Native), "");
    }

    #[test]
    fn test_binary_path_for_avr() {
        let path = binary_path(Path::new("/proj"), "main", &Platform::Avr);
        assert!(path.ends_with(".embra/build/main/bin/main.elf"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Distinct target names always get distinct working directories.
        #[test]
        fn prop_target_dirs_are_disjoint(
            a in "[a-z][a-z0-9_-]{0,16}",
            b in "[a-z][a-z0-9_-]{0,16}",
        ) {
            prop_assume!(a != b);
            let project = Path::new("/proj");
            prop_assert_ne!(target_dir(project, &a), target_dir(project, &b));
        }

        /// Path computation is deterministic.
        #[test]
        fn prop_paths_deterministic(name in "[a-z][a-z0-9_-]{0,16}") {
            let project = Path::new("/proj");
            prop_assert_eq!(
                target_dir(project, &name),
                target_dir(project, &name)
            );
        }
    }
}
