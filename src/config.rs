//! The configuration record that drives template projection.
//! Holds the resolved answers together with every value derived from them.

use crate::error::{Error, Result};
use semver::Version;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Namespace offered when nothing else is known.
pub const DEFAULT_NAMESPACE: &str = "com.myorg.myui5app";

/// Types packages switched from `ts-types-esm` to `types` at this release.
pub const TYPES_THRESHOLD: (u64, u64, u64) = (1, 113, 0);

/// First release shipping the Horizon theme.
pub const HORIZON_THRESHOLD: (u64, u64, u64) = (1, 108, 0);

/// Thresholds behind the `gteX_Y_Z` capability flags, ascending.
pub const CAPABILITY_THRESHOLDS: [(u64, u64, u64); 5] =
    [(1, 98, 0), (1, 104, 0), (1, 115, 0), (1, 120, 0), (1, 124, 0)];

/// The UI framework distribution the application targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Framework {
    OpenUI5,
    SAPUI5,
}

impl Framework {
    pub const ALL: [Framework; 2] = [Framework::OpenUI5, Framework::SAPUI5];

    pub fn name(&self) -> &'static str {
        match self {
            Framework::OpenUI5 => "OpenUI5",
            Framework::SAPUI5 => "SAPUI5",
        }
    }

    /// Oldest release for which type definitions are published.
    pub fn min_version(&self) -> Version {
        match self {
            Framework::OpenUI5 => Version::new(1, 90, 1),
            Framework::SAPUI5 => Version::new(1, 90, 0),
        }
    }

    pub fn cdn_domain(&self) -> &'static str {
        match self {
            Framework::OpenUI5 => "sdk.openui5.org",
            Framework::SAPUI5 => "ui5.sap.com",
        }
    }

    /// Name of the npm package carrying the type definitions for `version`.
    ///
    /// Without a version the current flavour is returned, which is also the
    /// package used to look up the newest release.
    pub fn types_package(&self, version: Option<&Version>) -> String {
        let flavor = match version {
            Some(v) if !at_least(v, TYPES_THRESHOLD) => "ts-types-esm",
            _ => "types",
        };
        format!("@{}/{}", self.name().to_lowercase(), flavor)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Framework::ALL.into_iter().find(|fw| fw.name() == s).ok_or_else(|| {
            Error::ValidationError {
                field: "framework".to_string(),
                message: format!("'{s}' is not one of: OpenUI5, SAPUI5"),
            }
        })
    }
}

fn at_least(version: &Version, (major, minor, patch): (u64, u64, u64)) -> bool {
    *version >= Version::new(major, minor, patch)
}

/// Key of the capability flag gated by `threshold`, e.g. `gte1_98_0`.
pub fn capability_key((major, minor, patch): (u64, u64, u64)) -> String {
    format!("gte{major}_{minor}_{patch}")
}

/// Threshold flags for `version`, in ascending threshold order.
pub fn capability_flags(version: &Version) -> Vec<(String, bool)> {
    CAPABILITY_THRESHOLDS
        .iter()
        .map(|&t| (capability_key(t), at_least(version, t)))
        .collect()
}

pub fn default_theme(version: &Version) -> &'static str {
    if at_least(version, HORIZON_THRESHOLD) {
        "sap_horizon"
    } else {
        "sap_fiori_3"
    }
}

/// Path-style identifier derived from a dot-delimited namespace.
pub fn app_uri(namespace: &str) -> String {
    namespace.split('.').collect::<Vec<_>>().join("/")
}

/// Frozen set of answers and derived values handed to the projector.
///
/// Only [`ConfigurationBuilder::build`] creates one, and it exposes no
/// mutating methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRecord {
    namespace: String,
    framework: Framework,
    framework_version: String,
    author: String,
    tstypes: String,
    tstypes_version: String,
    app_id: String,
    #[serde(rename = "appURI")]
    app_uri: String,
    cdn_domain: String,
    default_theme: String,
    #[serde(flatten)]
    flags: indexmap::IndexMap<String, bool>,
}

impl ConfigurationRecord {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn framework_version(&self) -> &str {
        &self.framework_version
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn tstypes(&self) -> &str {
        &self.tstypes
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn app_uri(&self) -> &str {
        &self.app_uri
    }

    pub fn cdn_domain(&self) -> &str {
        &self.cdn_domain
    }

    pub fn default_theme(&self) -> &str {
        &self.default_theme
    }

    /// Value of a threshold flag such as `gte1_104_0` or `lt1_124_0`.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.flags.get(key).copied()
    }

    /// Serializes the record into the rendering context.
    pub fn context(&self) -> serde_json::Value {
        // Plain strings, booleans and a unit enum cannot fail to serialize.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Options that steer the run but never reach the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub newdir: bool,
    pub initrepo: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { newdir: true, initrepo: true }
    }
}

impl RunOptions {
    /// Directory the application is written to: `base`, or a subdirectory
    /// named after the namespace when `newdir` is set.
    pub fn output_dir(&self, base: &Path, namespace: &str) -> PathBuf {
        if self.newdir {
            base.join(namespace)
        } else {
            base.to_path_buf()
        }
    }
}

/// Collects resolved fields and derives the rest once all are present.
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    namespace: Option<String>,
    framework: Option<Framework>,
    framework_version: Option<Version>,
    author: Option<String>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn framework(mut self, framework: Framework) -> Self {
        self.framework = Some(framework);
        self
    }

    pub fn framework_version(mut self, version: Version) -> Self {
        self.framework_version = Some(version);
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Runs the derivations in order and freezes the record.
    ///
    /// # Errors
    /// * `Error::ConfigError` if a required field was never set
    /// * `Error::ValidationError` if the version is below the framework minimum
    pub fn build(self) -> Result<ConfigurationRecord> {
        let namespace = self.namespace.ok_or_else(|| missing("namespace"))?;
        let framework = self.framework.ok_or_else(|| missing("framework"))?;
        let version = self.framework_version.ok_or_else(|| missing("frameworkVersion"))?;
        let author = self.author.ok_or_else(|| missing("author"))?;

        if version < framework.min_version() {
            return Err(Error::ValidationError {
                field: "frameworkVersion".to_string(),
                message: format!(
                    "{framework} requires at least version {}",
                    framework.min_version()
                ),
            });
        }

        let tstypes = framework.types_package(Some(&version));
        let app_id = namespace.clone();
        let app_uri = app_uri(&namespace);
        let cdn_domain = framework.cdn_domain().to_string();
        let default_theme = default_theme(&version).to_string();

        let mut flags: indexmap::IndexMap<String, bool> =
            capability_flags(&version).into_iter().collect();
        let gte1_124_0 = flags.get("gte1_124_0").copied().unwrap_or(false);
        flags.insert("lt1_124_0".to_string(), !gte1_124_0);

        Ok(ConfigurationRecord {
            namespace,
            framework,
            framework_version: version.to_string(),
            author,
            tstypes,
            tstypes_version: version.to_string(),
            app_id,
            app_uri,
            cdn_domain,
            default_theme,
            flags,
        })
    }
}

fn missing(field: &str) -> Error {
    Error::ConfigError(format!("field '{field}' was not resolved before build"))
}
