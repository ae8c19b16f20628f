//! Project data model
//!
//! The resolved shapes the orchestration engine works with: platforms,
//! targets, library dependencies, and the per-invocation resolved target.

use std::collections::BTreeMap;
use std::path::PathBuf;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Hardware platform a target is bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    /// AVR microcontrollers (requires a framework)
    Avr,
    /// Host-native builds
    Native,
    /// Platforms this version has no special handling for
    Other(String),
}

impl Platform {
    /// Whether targets on this platform need a provisioned framework
    pub fn requires_framework(&self) -> bool {
        matches!(self, Self::Avr)
    }

    /// Whether targets on this platform may omit a board (host build)
    pub fn allows_missing_board(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// Canonical lowercase platform name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Avr => "avr",
            Self::Native => "native",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "avr" => Self::Avr,
            "native" => Self::Native,
            _ => Self::Other(value),
        }
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A library reference as written in the manifest
///
/// Both fields are optional: a bare `{}` entry means "resolve this name
/// from the project scope or the local library directory".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRef {
    /// Source URL, or the literal marker "local"
    #[serde(default)]
    pub source: Option<String>,

    /// Exact version (`Major.Minor.Patch`)
    #[serde(default)]
    pub version: Option<String>,
}

/// A fully resolved library dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDependency {
    /// Library name, unique within a target's resolved set
    pub name: String,
    /// Source URL or the literal "local" marker
    pub source: String,
    /// Exact resolved version
    pub version: Version,
}

impl LibraryDependency {
    /// A dependency resolved from the project's own lib/ directory
    pub fn local(name: &str) -> Self {
        Self {
            name: name.to_string(),
            source: defaults::LOCAL_SOURCE.to_string(),
            version: Version::new(0, 0, 0),
        }
    }

    /// Whether this dependency comes from the local library directory
    pub fn is_local(&self) -> bool {
        self.source == defaults::LOCAL_SOURCE
    }
}

/// One buildable configuration within a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Target name; the manifest map is keyed by name, so this is
    /// populated after lookup, never parsed
    #[serde(skip)]
    pub name: String,

    /// Platform the target compiles for
    pub platform: Platform,

    /// Framework specification (`name` or `name@version`); required for AVR
    #[serde(default)]
    pub framework: Option<String>,

    /// Hardware board identifier; required for compiling to a real device
    #[serde(default)]
    pub board: Option<String>,

    /// Compile flags passed through to the build tool, in declaration order
    #[serde(default)]
    pub compile_flags: Vec<String>,

    /// Library overrides scoped to this target
    #[serde(default)]
    pub libraries: BTreeMap<String, LibraryRef>,
}

impl Target {
    /// The framework field, treating an empty string as unset
    pub fn framework_spec(&self) -> Option<&str> {
        self.framework.as_deref().filter(|s| !s.is_empty())
    }

    /// The board field, treating an empty string as unset
    pub fn board_id(&self) -> Option<&str> {
        self.board.as_deref().filter(|s| !s.is_empty())
    }
}

/// A framework asset that has been provisioned into the local store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedFramework {
    /// Framework name
    pub name: String,
    /// Installed version
    pub version: String,
    /// Root of the unpacked framework tree
    pub path: PathBuf,
}

/// A target enriched with everything the build needs
///
/// Created per invocation and discarded after execution; never persisted.
/// Each resolved target exclusively owns its working directory for the
/// duration of the invocation.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    /// The selected target, name populated
    pub target: Target,
    /// Fully merged library set, keyed by name
    pub libraries: BTreeMap<String, LibraryDependency>,
    /// Per-target working directory under the project build root
    pub work_dir: PathBuf,
    /// Provisioned framework, present when the platform requires one
    pub framework: Option<ProvisionedFramework>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parses_known_names() {
        assert_eq!(Platform::from("avr".to_string()), Platform::Avr);
        assert_eq!(Platform::from("AVR".to_string()), Platform::Avr);
        assert_eq!(Platform::from("native".to_string()), Platform::Native);
    }

    #[test]
    fn test_platform_keeps_unknown_names() {
        let p = Platform::from("arm".to_string());
        assert_eq!(p, Platform::Other("arm".to_string()));
        assert_eq!(p.as_str(), "arm");
    }

    #[test]
    fn test_only_avr_requires_framework() {
        assert!(Platform::Avr.requires_framework());
        assert!(!Platform::Native.requires_framework());
        assert!(!Platform::Other("arm".to_string()).requires_framework());
    }

    #[test]
    fn test_only_native_allows_missing_board() {
        assert!(Platform::Native.allows_missing_board());
        assert!(!Platform::Avr.allows_missing_board());
    }

    #[test]
    fn test_local_dependency_defaults() {
        let dep = LibraryDependency::local("wlib");
        assert_eq!(dep.source, "local");
        assert_eq!(dep.version, Version::new(0, 0, 0));
        assert!(dep.is_local());
    }

    #[test]
    fn test_empty_framework_field_is_unset() {
        let target = Target {
            name: "main".to_string(),
            platform: Platform::Avr,
            framework: Some(String::new()),
            board: None,
            compile_flags: vec![],
            libraries: BTreeMap::new(),
        };
        assert_eq!(target.framework_spec(), None);
    }
}
