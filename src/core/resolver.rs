//! Dependency resolution
//!
//! Merges project-scope library declarations with the libraries physically
//! present in the project's lib/ directory, then applies per-target
//! overrides. Resolution picks one exact version or the default; there is
//! no constraint solving.

use std::collections::BTreeMap;
use std::path::Path;

use semver::Version;
use walkdir::WalkDir;

use crate::config::defaults;
use crate::core::project::{LibraryDependency, LibraryRef, Target};
use crate::error::ResolveError;

/// Split a dependency identifier of the form `name@version`.
///
/// The split happens on the first `@`; a missing or empty suffix means
/// "use the declared or default version".
pub fn parse_library_spec(spec: &str) -> (&str, Option<&str>) {
    match spec.split_once('@') {
        Some((name, version)) if !version.is_empty() => (name, Some(version)),
        Some((name, _)) => (name, None),
        None => (spec, None),
    }
}

/// Names of the libraries physically present in the local library directory.
///
/// Each immediate subdirectory of `lib/` is one library. A missing
/// directory simply yields no local libraries.
pub fn scan_local_libraries(lib_dir: &Path) -> Vec<String> {
    if !lib_dir.is_dir() {
        return Vec::new();
    }
    let mut names: Vec<String> = WalkDir::new(lib_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(String::from))
        .collect();
    names.sort();
    names
}

/// Merge project declarations with locally present libraries.
///
/// Locally present libraries not already declared are synthesized with
/// `source = "local"` and version `0.0.0`. Declared entries keep their
/// declaration untouched; local presence never overrides it.
pub fn merge_project_libraries(
    declared: &BTreeMap<String, LibraryRef>,
    local: &[String],
) -> Result<BTreeMap<String, LibraryDependency>, ResolveError> {
    let mut merged = BTreeMap::new();

    for (name, reference) in declared {
        let (base, requested) = parse_library_spec(name);
        merged.insert(
            base.to_string(),
            dependency_from_ref(base, reference, requested)?,
        );
    }

    for name in local {
        if !merged.contains_key(name) {
            merged.insert(name.clone(), LibraryDependency::local(name));
        }
    }

    Ok(merged)
}

/// Resolve the full library set for one target.
///
/// Starts from the project-level merge and applies the target's own
/// entries. An entry without a source is a reference into the project
/// scope; one with a source is a scoped declaration of its own.
pub fn resolve_target_libraries(
    merged: &BTreeMap<String, LibraryDependency>,
    target: &Target,
) -> Result<BTreeMap<String, LibraryDependency>, ResolveError> {
    let mut resolved = merged.clone();

    for (spec, reference) in &target.libraries {
        let (base, requested) = parse_library_spec(spec);

        match &reference.source {
            None => {
                // Reference into project scope; only the version may change
                let existing =
                    resolved
                        .get(base)
                        .ok_or_else(|| ResolveError::UnresolvedLibrary {
                            name: base.to_string(),
                            target: target.name.clone(),
                        })?;
                let mut dependency = existing.clone();
                if let Some(version) = requested.or(reference.version.as_deref()) {
                    dependency.version = parse_version(base, version)?;
                }
                resolved.insert(base.to_string(), dependency);
            }
            Some(source) => {
                if let Some(existing) = resolved.get(base) {
                    if !existing.is_local() && existing.source != *source {
                        return Err(ResolveError::ConflictingDependency {
                            name: base.to_string(),
                            declared: existing.source.clone(),
                            requested: source.clone(),
                        });
                    }
                }
                resolved.insert(
                    base.to_string(),
                    dependency_from_ref(base, reference, requested)?,
                );
            }
        }
    }

    Ok(resolved)
}

/// Build a resolved dependency from a manifest reference.
///
/// A version suffix on the identifier wins over the `version` field; with
/// neither present, the default `0.0.0` applies.
fn dependency_from_ref(
    name: &str,
    reference: &LibraryRef,
    requested: Option<&str>,
) -> Result<LibraryDependency, ResolveError> {
    let version = match requested.or(reference.version.as_deref()) {
        Some(version) => parse_version(name, version)?,
        None => Version::new(0, 0, 0),
    };
    Ok(LibraryDependency {
        name: name.to_string(),
        source: reference
            .source
            .clone()
            .unwrap_or_else(|| defaults::LOCAL_SOURCE.to_string()),
        version,
    })
}

fn parse_version(name: &str, version: &str) -> Result<Version, ResolveError> {
    Version::parse(version).map_err(|e| ResolveError::InvalidVersion {
        name: name.to_string(),
        version: version.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::Platform;
    use tempfile::TempDir;

    fn library_ref(source: Option<&str>, version: Option<&str>) -> LibraryRef {
        LibraryRef {
            source: source.map(String::from),
            version: version.map(String::from),
        }
    }

    fn target_with_libraries(entries: &[(&str, LibraryRef)]) -> Target {
        Target {
            name: "main".to_string(),
            platform: Platform::Avr,
            framework: Some("cosa".to_string()),
            board: Some("uno".to_string()),
            compile_flags: vec![],
            libraries: entries
                .iter()
                .map(|(name, r)| ((*name).to_string(), r.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_parse_spec_without_version() {
        assert_eq!(parse_library_spec("wlib"), ("wlib", None));
    }

    #[test]
    fn test_parse_spec_with_version() {
        assert_eq!(parse_library_spec("lib@2.1.0"), ("lib", Some("2.1.0")));
    }

    #[test]
    fn test_parse_spec_splits_on_first_at() {
        assert_eq!(parse_library_spec("lib@2.1.0@x"), ("lib", Some("2.1.0@x")));
    }

    #[test]
    fn test_parse_spec_empty_suffix() {
        assert_eq!(parse_library_spec("lib@"), ("lib", None));
    }

    #[test]
    fn test_scan_local_libraries() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("foo/src")).unwrap();
        std::fs::create_dir(dir.path().join("bar")).unwrap();
        std::fs::write(dir.path().join("README.md"), "not a library").unwrap();

        let names = scan_local_libraries(dir.path());

        assert_eq!(names, vec!["bar".to_string(), "foo".to_string()]);
    }

    #[test]
    fn test_scan_missing_lib_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(scan_local_libraries(&dir.path().join("lib")).is_empty());
    }

    #[test]
    fn test_declaration_wins_over_local_presence() {
        let mut declared = BTreeMap::new();
        declared.insert(
            "foo".to_string(),
            library_ref(Some("https://example.com/foo"), Some("1.2.3")),
        );
        let local = vec!["foo".to_string(), "bar".to_string()];

        let merged = merge_project_libraries(&declared, &local).unwrap();

        assert_eq!(merged["foo"].version, Version::new(1, 2, 3));
        assert_eq!(merged["foo"].source, "https://example.com/foo");
        assert_eq!(merged["bar"].version, Version::new(0, 0, 0));
        assert_eq!(merged["bar"].source, "local");
    }

    #[test]
    fn test_versioned_spec_distinct_from_bare_name() {
        let mut declared = BTreeMap::new();
        declared.insert("lib".to_string(), library_ref(None, Some("1.0.0")));
        let merged = merge_project_libraries(&declared, &[]).unwrap();

        let plain = resolve_target_libraries(
            &merged,
            &target_with_libraries(&[("lib", library_ref(None, None))]),
        )
        .unwrap();
        assert_eq!(plain["lib"].version, Version::new(1, 0, 0));

        let pinned = resolve_target_libraries(
            &merged,
            &target_with_libraries(&[("lib@2.1.0", library_ref(None, None))]),
        )
        .unwrap();
        assert_eq!(pinned["lib"].version, Version::new(2, 1, 0));
    }

    #[test]
    fn test_unresolved_reference_fails() {
        let merged = BTreeMap::new();
        let target = target_with_libraries(&[("ghost", library_ref(None, None))]);

        let err = resolve_target_libraries(&merged, &target).unwrap_err();

        assert_eq!(
            err,
            ResolveError::UnresolvedLibrary {
                name: "ghost".to_string(),
                target: "main".to_string()
            }
        );
    }

    #[test]
    fn test_conflicting_sources_fail() {
        let mut declared = BTreeMap::new();
        declared.insert(
            "wlib".to_string(),
            library_ref(Some("https://a.example"), Some("1.0.0")),
        );
        let merged = merge_project_libraries(&declared, &[]).unwrap();

        let target = target_with_libraries(&[(
            "wlib",
            library_ref(Some("https://b.example"), Some("1.0.0")),
        )]);
        let err = resolve_target_libraries(&merged, &target).unwrap_err();

        assert!(matches!(err, ResolveError::ConflictingDependency { .. }));
    }

    #[test]
    fn test_explicit_declaration_may_shadow_local() {
        let merged =
            merge_project_libraries(&BTreeMap::new(), &["wlib".to_string()]).unwrap();

        let target = target_with_libraries(&[(
            "wlib",
            library_ref(Some("https://a.example"), Some("3.0.0")),
        )]);
        let resolved = resolve_target_libraries(&merged, &target).unwrap();

        assert_eq!(resolved["wlib"].source, "https://a.example");
        assert_eq!(resolved["wlib"].version, Version::new(3, 0, 0));
    }

    #[test]
    fn test_bad_version_reports_library() {
        let mut declared = BTreeMap::new();
        declared.insert("wlib".to_string(), library_ref(None, Some("not-semver")));

        let err = merge_project_libraries(&declared, &[]).unwrap_err();

        assert!(matches!(err, ResolveError::InvalidVersion { ref name, .. } if name == "wlib"));
    }
}
