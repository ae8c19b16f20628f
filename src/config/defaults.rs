//! Default configuration values

/// Extra jobs added on top of the host CPU count for make-style tools
pub const JOBS_CPU_OFFSET: usize = 2;

/// Maximum number of download retry attempts
pub const MAX_DOWNLOAD_RETRIES: u32 = 3;

/// Version assigned to local or unversioned libraries
pub const DEFAULT_LIBRARY_VERSION: &str = "0.0.0";

/// Source marker for libraries resolved from the project's own lib/ directory
pub const LOCAL_SOURCE: &str = "local";

/// Name of the project manifest file
pub const MANIFEST_FILE: &str = "embra.toml";

/// Name of the per-project build root, relative to the project directory
pub const BUILD_ROOT: &str = ".embra/build";

/// Name of the project-local library directory
pub const LIB_DIR: &str = "lib";

/// Subdirectory of a target working directory holding build-tool state and the binary
pub const BIN_DIR: &str = "bin";

/// Name of the environment file kept in the config directory
pub const ENV_FILE: &str = "embra.env";

/// Number of parallel build jobs for the external tool
pub fn build_jobs() -> usize {
    num_cpus::get() + JOBS_CPU_OFFSET
}
