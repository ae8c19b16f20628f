//! Error types for embra
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Target selection errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// A requested target name is not declared in the project
    #[error("Unrecognized target '{name}'")]
    UnknownTarget { name: String },

    /// No names given and the project declares no default target
    #[error("No default target specified in the project configuration")]
    NoDefaultTarget,

    /// The declared default target does not exist
    #[error("Default target '{name}' does not exist")]
    InvalidDefaultTarget { name: String },
}

/// Dependency resolution errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// A target references a library that is neither declared nor present locally
    #[error("Library '{name}' referenced by target '{target}' could not be resolved")]
    UnresolvedLibrary { name: String, target: String },

    /// The same library is declared with two different explicit sources
    #[error("Library '{name}' is declared with conflicting sources '{declared}' and '{requested}'")]
    ConflictingDependency {
        name: String,
        declared: String,
        requested: String,
    },

    /// A version suffix or declared version is not valid semver
    #[error("Invalid version '{version}' for library '{name}': {reason}")]
    InvalidVersion {
        name: String,
        version: String,
        reason: String,
    },
}

/// Framework provisioning errors
#[derive(Error, Debug)]
pub enum FrameworkError {
    /// Platform requires a framework but the target declares none
    #[error("Framework not specified for target '{target}'")]
    NotSpecified { target: String },

    /// The named framework/version cannot be located or fetched
    #[error("Framework '{name}' ({version}) for platform '{platform}' could not be resolved")]
    Resolution {
        platform: String,
        name: String,
        version: String,
    },

    /// Registry index error
    #[error("Framework registry error: {0}")]
    Registry(String),

    /// Download error while fetching an asset
    #[error("Framework download error: {0}")]
    Download(#[from] DownloadError),

    /// Archive could not be unpacked into the store
    #[error("Failed to install framework archive '{path}': {error}")]
    Install { path: PathBuf, error: String },
}

/// Build directive generation errors
#[derive(Error, Debug)]
pub enum DirectiveError {
    /// Target has no platform set
    #[error("Platform not specified for target '{target}'")]
    MissingPlatform { target: String },

    /// Target needs a board to compile for a real device
    #[error("Board not specified for target '{target}'")]
    MissingBoard { target: String },

    /// Resolution failure surfaced during generation
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Filesystem failure while writing directives
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Per-target execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// External build tool exited nonzero
    #[error("Build tool failed for target '{target}' (exit code {code})")]
    BuildTool { target: String, code: i32 },

    /// External tool could not be started or was killed by a signal
    #[error("Failed to run '{program}' for target '{target}': {error}")]
    Spawn {
        target: String,
        program: String,
        error: String,
    },

    /// Required tool is not installed on the host
    #[error("Required tool '{tool}' not found in PATH")]
    ToolNotFound { tool: String },

    /// Filesystem failure inside a unit of work
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// A unit of work panicked or was aborted
    #[error("Execution unit for target '{target}' did not complete: {error}")]
    Join { target: String, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Network error
    #[error("Network error downloading '{url}': {error}")]
    NetworkError { url: String, error: String },

    /// Checksum verification failed
    #[error("Checksum verification failed for '{file}'")]
    ChecksumFailed { file: String },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },

    /// Max retries exceeded
    #[error("Download failed after {retries} retries: {url}")]
    MaxRetriesExceeded { url: String, retries: u32 },
}

/// Environment file errors
#[derive(Error, Debug)]
pub enum EnvError {
    /// No keys supplied where at least one is required
    #[error("Need minimum one variable to unset")]
    NoKeys,

    /// Environment file could not be read or written
    #[error("Environment file error for '{path}': {error}")]
    Io { path: PathBuf, error: String },
}

/// Top-level embra error type
#[derive(Error, Debug)]
pub enum EmbraError {
    /// Manifest not found
    #[error("No embra.toml found at '{path}'")]
    ManifestNotFound { path: String },

    /// Manifest parse error
    #[error("Failed to parse manifest: {source}")]
    ManifestParse { source: toml::de::Error },

    /// Manifest validation error
    #[error("Invalid manifest: {0}")]
    Manifest(String),

    /// Selection error
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Resolution error
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Framework error
    #[error(transparent)]
    Framework(#[from] FrameworkError),

    /// Directive error
    #[error(transparent)]
    Directive(#[from] DirectiveError),

    /// Execution error
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Environment file error
    #[error(transparent)]
    Env(#[from] EnvError),

    /// IO error
    #[error("IO error: {source}")]
    Io { source: std::io::Error },
}
