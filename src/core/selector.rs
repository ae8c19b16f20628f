//! Target selection
//!
//! Turns the user's target names (or `--all`, or nothing) into the ordered
//! list of targets to act on. Targets come out of a name-keyed map, so the
//! `name` field is populated here, immediately after lookup.

use crate::core::manifest::Manifest;
use crate::core::project::Target;
use crate::error::SelectionError;

/// Select the targets an invocation acts on.
///
/// - `all` set: every declared target, in manifest (name-sorted) order.
/// - Names given: each is looked up; an unknown name fails the whole
///   selection.
/// - Neither: the project's default target, which must be set and declared.
pub fn select_targets(
    manifest: &Manifest,
    names: &[String],
    all: bool,
) -> Result<Vec<Target>, SelectionError> {
    if all {
        return Ok(manifest
            .targets
            .iter()
            .map(|(name, target)| with_name(target, name))
            .collect());
    }

    if !names.is_empty() {
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let target = manifest
                .targets
                .get(name)
                .ok_or_else(|| SelectionError::UnknownTarget { name: name.clone() })?;
            selected.push(with_name(target, name));
        }
        return Ok(selected);
    }

    let default = manifest
        .options
        .default_target
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or(SelectionError::NoDefaultTarget)?;

    let target = manifest
        .targets
        .get(default)
        .ok_or_else(|| SelectionError::InvalidDefaultTarget {
            name: default.to_string(),
        })?;

    Ok(vec![with_name(target, default)])
}

/// Copy a target out of the map with its key assigned as the name
fn with_name(target: &Target, name: &str) -> Target {
    let mut target = target.clone();
    target.name = name.to_string();
    target
}
