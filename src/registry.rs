//! Package metadata lookup used for the framework version default.

use crate::error::{Error, Result};
use log::{debug, warn};
use semver::Version;
use url::Url;

pub const NPM_REGISTRY: &str = "https://registry.npmjs.org/";

/// Source of published package versions.
pub trait PackageRegistry {
    /// Returns the highest published release of `package`.
    fn highest_version(&self, package: &str) -> Result<Version>;
}

/// Reads package documents from an npm-compatible registry.
pub struct NpmRegistry {
    base: Url,
    /// `None` when the HTTP client could not be set up; every lookup then fails.
    client: Option<reqwest::blocking::Client>,
}

impl NpmRegistry {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base)
            .map_err(|e| Error::ConfigError(format!("invalid registry URL '{base}': {e}")))?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| warn!("HTTP client unavailable: {e}"))
            .ok();
        Ok(Self { base, client })
    }

    /// Document URL for `package`; the scope separator is percent-encoded.
    pub fn package_url(&self, package: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::ConfigError(format!("registry URL cannot have paths: {}", self.base)))?
            .pop_if_empty()
            .push(package);
        Ok(url)
    }
}

impl PackageRegistry for NpmRegistry {
    fn highest_version(&self, package: &str) -> Result<Version> {
        let url = self.package_url(package)?;
        debug!("Looking up versions of '{package}' at {url}");

        let failed = |reason: String| Error::RegistryError { package: package.to_string(), reason };
        let client = self.client.as_ref().ok_or_else(|| failed("no HTTP client".to_string()))?;
        let response = client.get(url).send().map_err(|e| failed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(failed(format!("HTTP {}", response.status())));
        }
        let document: serde_json::Value = response.json().map_err(|e| failed(e.to_string()))?;

        highest_release(&document).ok_or_else(|| failed("no published release".to_string()))
    }
}

/// Picks the highest non-prerelease key of the document's `versions` object,
/// which is what the `*` range resolves to.
pub fn highest_release(document: &serde_json::Value) -> Option<Version> {
    document
        .get("versions")?
        .as_object()?
        .keys()
        .filter_map(|key| Version::parse(key).ok())
        .filter(|version| version.pre.is_empty())
        .max()
}
