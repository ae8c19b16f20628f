//! Manifest (embra.toml) parsing and validation
//!
//! The manifest is the declarative project description: project name,
//! options, named build targets, and project-scope library declarations.
//! The orchestration engine consumes this resolved structure; it never
//! inspects the raw file again after loading.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::project::{LibraryRef, Target};
use crate::error::EmbraError;

/// The main project manifest (embra.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Project configuration
    pub project: ProjectSection,

    /// Project options
    #[serde(default)]
    pub options: OptionsSection,

    /// Build targets, keyed by name
    #[serde(default)]
    pub targets: BTreeMap<String, Target>,

    /// Project-scope library declarations, keyed by name
    #[serde(default)]
    pub libraries: BTreeMap<String, LibraryRef>,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectSection {
    /// Project name
    pub name: String,

    /// Project description
    #[serde(default)]
    pub description: Option<String>,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: "unnamed".to_string(),
            description: None,
        }
    }
}

/// Project options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OptionsSection {
    /// Target used when no names are given on the command line
    #[serde(default)]
    pub default_target: Option<String>,

    /// Header-only projects produce no linkable artifact of their own
    #[serde(default)]
    pub header_only: bool,
}

impl Manifest {
    /// Load a manifest from a project directory
    pub fn load(project_dir: &Path) -> Result<Self, EmbraError> {
        let path = project_dir.join(crate::config::defaults::MANIFEST_FILE);
        if !path.exists() {
            return Err(EmbraError::ManifestNotFound {
                path: path.display().to_string(),
            });
        }
        let content =
            std::fs::read_to_string(&path).map_err(|e| EmbraError::Io { source: e })?;
        Self::from_toml(&content).map_err(|e| EmbraError::ManifestParse { source: e })
    }

    /// Parse a manifest from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize the manifest to a TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Valid target and library name pattern
fn name_pattern() -> Regex {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("static pattern")
}

/// Validate manifest structure and report all errors found, not just the
/// first.
///
/// Only structural problems are checked here: a non-empty project name
/// and well-formed target/library identifiers. Semantic invariants
/// (default target exists, AVR targets carry a framework, boards are set)
/// stay with selection, provisioning, and directive generation, which
/// check exactly the targets an invocation touches.
pub fn validate_manifest(manifest: &Manifest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let pattern = name_pattern();

    if manifest.project.name.is_empty() {
        errors.push("Field 'project.name' cannot be empty".to_string());
    }

    for (name, target) in &manifest.targets {
        if !pattern.is_match(name) {
            errors.push(format!("Invalid target name '{name}'"));
        }
        for lib_name in target.libraries.keys() {
            let base = lib_name.split('@').next().unwrap_or(lib_name);
            if !pattern.is_match(base) {
                errors.push(format!(
                    "Invalid library name '{lib_name}' in target '{name}'"
                ));
            }
        }
    }

    for lib_name in manifest.libraries.keys() {
        if !pattern.is_match(lib_name) {
            errors.push(format!("Invalid library name '{lib_name}'"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::Platform;
    use proptest::prelude::*;

    const SAMPLE: &str = r#"
[project]
name = "blink"

[options]
default_target = "main"

[libraries.wlib]
source = "https://github.com/example/wlib"
version = "1.2.3"

[targets.main]
platform = "avr"
framework = "cosa@1.1.0"
board = "uno"
compile_flags = ["-Os"]

[targets.main.libraries]
wlib = { version = "2.0.0" }

[targets.host]
platform = "native"
"#;

    #[test]
    fn test_manifest_parses_sample() {
        let manifest = Manifest::from_toml(SAMPLE).expect("valid manifest");

        assert_eq!(manifest.project.name, "blink");
        assert_eq!(
            manifest.options.default_target,
            Some("main".to_string())
        );
        assert_eq!(manifest.targets.len(), 2);

        let main = &manifest.targets["main"];
        assert_eq!(main.platform, Platform::Avr);
        assert_eq!(main.framework_spec(), Some("cosa@1.1.0"));
        assert_eq!(main.board_id(), Some("uno"));
        assert_eq!(main.compile_flags, vec!["-Os".to_string()]);
        assert_eq!(
            main.libraries["wlib"].version,
            Some("2.0.0".to_string())
        );

        assert_eq!(manifest.libraries["wlib"].version, Some("1.2.3".to_string()));
    }

    #[test]
    fn test_parsed_targets_have_no_name_yet() {
        // The map is keyed by name; the field stays empty until selection
        let manifest = Manifest::from_toml(SAMPLE).unwrap();
        assert!(manifest.targets["main"].name.is_empty());
    }

    #[test]
    fn test_manifest_missing_project_section() {
        let result = Manifest::from_toml("[targets.main]\nplatform = \"native\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_manifest_roundtrip() {
        let manifest = Manifest::from_toml(SAMPLE).unwrap();
        let serialized = manifest.to_toml().unwrap();
        let parsed = Manifest::from_toml(&serialized).unwrap();
        assert_eq!(manifest, parsed);
    }

    #[test]
    fn test_validate_accepts_sample() {
        let manifest = Manifest::from_toml(SAMPLE).unwrap();
        assert!(validate_manifest(&manifest).is_ok());
    }

    #[test]
    fn test_validate_collects_multiple_errors() {
        let manifest = Manifest::from_toml(
            r#"
[project]
name = ""

[targets."bad name!"]
platform = "avr"

[libraries."?lib"]
version = "1.0.0"
"#,
        )
        .unwrap();

        let errors = validate_manifest(&manifest).unwrap_err();
        assert_eq!(errors.len(), 3, "expected three errors: {errors:?}");
        assert!(errors.iter().any(|e| e.contains("project.name")));
        assert!(errors.iter().any(|e| e.contains("bad name!")));
        assert!(errors.iter().any(|e| e.contains("?lib")));
    }

    #[test]
    fn test_validate_accepts_versioned_library_keys() {
        let manifest = Manifest::from_toml(
            r#"
[project]
name = "pinned"

[targets.main]
platform = "native"

[targets.main.libraries]
"wlib@2.1.0" = {}
"#,
        )
        .unwrap();

        assert!(validate_manifest(&manifest).is_ok());
    }

    fn target_name_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,20}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Serializing then deserializing produces an equivalent manifest.
        #[test]
        fn prop_manifest_toml_roundtrip(
            name in target_name_strategy(),
            board in "[a-z0-9]{2,10}",
            flags in proptest::collection::vec("-[A-Za-z][A-Za-z0-9]{0,6}", 0..4),
        ) {
            let mut targets = BTreeMap::new();
            targets.insert(name.clone(), Target {
                name: String::new(),
                platform: Platform::Avr,
                framework: Some("cosa".to_string()),
                board: Some(board),
                compile_flags: flags,
                libraries: BTreeMap::new(),
            });

            let manifest = Manifest {
                project: ProjectSection { name: "prop".to_string(), description: None },
                options: OptionsSection { default_target: Some(name), header_only: false },
                targets,
                libraries: BTreeMap::new(),
            };

            let toml_str = manifest.to_toml().expect("serialize");
            let parsed = Manifest::from_toml(&toml_str).expect("parse back");
            prop_assert_eq!(manifest, parsed);
        }
    }
}
