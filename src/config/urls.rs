//! Registry and framework asset URLs

/// Framework registry base URL (GitHub raw)
pub const FRAMEWORK_REGISTRY: &str =
    "https://raw.githubusercontent.com/embra-project/embra-frameworks/main";

/// Path of the framework index document under the registry base
pub const FRAMEWORK_INDEX: &str = "index.json";
