//! Environment file management
//!
//! Maintains `embra.env` in the config directory: one `KEY=VALUE` pair per
//! line. `OS` and `EMBRA_ROOT` are seeded on reset and are read-only.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;

use crate::error::EnvError;

/// Keys that cannot be edited or removed
pub const CONSTANT_KEYS: &[&str] = &["OS", "EMBRA_ROOT"];

/// Whether a key is one of the read-only constants
pub fn is_constant(key: &str) -> bool {
    CONSTANT_KEYS.contains(&key)
}

/// Matches a `KEY=VALUE` assignment token on the command line
pub fn assignment_pattern() -> Regex {
    Regex::new(r"^[^=]+=[^=]+$").expect("static pattern")
}

/// Read the environment file into a sorted map.
///
/// A missing file reads as empty.
pub fn load(path: &Path) -> Result<BTreeMap<String, String>, EnvError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| EnvError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut values = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    Ok(values)
}

/// Write the environment file, creating parent directories as needed
pub fn save(path: &Path, values: &BTreeMap<String, String>) -> Result<(), EnvError> {
    let mut content = String::new();
    for (key, value) in values {
        content.push_str(key);
        content.push('=');
        content.push_str(value);
        content.push('\n');
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| EnvError::Io {
            path: parent.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    std::fs::write(path, content).map_err(|e| EnvError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Rewrite the file with only the constant seed values
pub fn reset(path: &Path, root: &Path) -> Result<(), EnvError> {
    let mut values = BTreeMap::new();
    values.insert("OS".to_string(), std::env::consts::OS.to_string());
    values.insert("EMBRA_ROOT".to_string(), root.display().to_string());
    save(path, &values)
}

/// Outcome of a single set/unset request
#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Value was applied
    Changed,
    /// Key is read-only and was left untouched
    ReadOnly,
    /// Key was not present
    Missing,
}

/// Set one key, refusing the read-only constants
pub fn set_key(values: &mut BTreeMap<String, String>, key: &str, value: &str) -> KeyOutcome {
    if is_constant(key) {
        return KeyOutcome::ReadOnly;
    }
    values.insert(key.to_string(), value.to_string());
    KeyOutcome::Changed
}

/// Remove one key, refusing the read-only constants
pub fn unset_key(values: &mut BTreeMap<String, String>, key: &str) -> KeyOutcome {
    if !values.contains_key(key) {
        return KeyOutcome::Missing;
    }
    if is_constant(key) {
        return KeyOutcome::ReadOnly;
    }
    values.remove(key);
    KeyOutcome::Changed
}
