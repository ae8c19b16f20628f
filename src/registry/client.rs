//! Framework registry client
//!
//! Fetches the framework index document from the GitHub-hosted registry
//! and resolves (platform, name, version) triples against it.

use serde::{Deserialize, Serialize};

use crate::config::urls;
use crate::error::FrameworkError;

/// The registry's index document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkIndex {
    /// All published frameworks
    pub frameworks: Vec<FrameworkEntry>,
}

/// One framework in the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkEntry {
    /// Platform the framework belongs to
    pub platform: String,
    /// Framework name
    pub name: String,
    /// Version resolved when no version is requested
    pub latest: String,
    /// Published versions
    pub versions: Vec<FrameworkAsset>,
}

/// One downloadable framework version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkAsset {
    /// Version string
    pub version: String,
    /// Archive URL (.tar.gz)
    pub url: String,
    /// SHA256 checksum of the archive
    pub sha256: String,
}

/// Registry client for fetching the framework index
#[derive(Debug)]
pub struct RegistryClient {
    /// HTTP client
    client: reqwest::Client,
    /// Registry base URL
    base_url: String,
}

impl RegistryClient {
    /// Create a new registry client with the default URL
    pub fn new() -> Self {
        Self::with_base_url(urls::FRAMEWORK_REGISTRY.to_string())
    }

    /// Create a registry client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Get the registry base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the framework index
    pub async fn fetch_index(&self) -> Result<FrameworkIndex, FrameworkError> {
        let url = format!("{}/{}", self.base_url, urls::FRAMEWORK_INDEX);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FrameworkError::Registry(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FrameworkError::Registry(format!(
                "HTTP {} fetching {url}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FrameworkError::Registry(e.to_string()))?;
        serde_json::from_str(&body)
            .map_err(|e| FrameworkError::Registry(format!("Invalid index: {e}")))
    }
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameworkIndex {
    /// Resolve an asset by platform, name, and optional exact version.
    ///
    /// Without a version the entry's `latest` field decides.
    pub fn resolve(
        &self,
        platform: &str,
        name: &str,
        version: Option<&str>,
    ) -> Result<&FrameworkAsset, FrameworkError> {
        let not_found = || FrameworkError::Resolution {
            platform: platform.to_string(),
            name: name.to_string(),
            version: version.unwrap_or("latest").to_string(),
        };

        let entry = self
            .frameworks
            .iter()
            .find(|f| f.platform == platform && f.name == name)
            .ok_or_else(not_found)?;

        let wanted = version.unwrap_or(entry.latest.as_str());
        entry
            .versions
            .iter()
            .find(|asset| asset.version == wanted)
            .ok_or_else(not_found)
    }
}
