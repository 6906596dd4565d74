//! Field predicates applied to supplied and entered answers.
//!
//! Every validator returns the normalized value on success and a
//! human-readable message on failure. The message is what the prompt shows
//! before asking again.

use crate::config::Framework;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

static NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_.]*$").expect("valid namespace regex"));

pub fn namespace(value: &str) -> Result<String, String> {
    if NAMESPACE_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err("Please use lowercase alpha numeric characters, underscores and dots only for the namespace."
            .to_string())
    }
}

pub fn framework(value: &str) -> Result<Framework, String> {
    value.parse::<Framework>().map_err(|e| e.to_string())
}

/// Parses `value` as a semantic version (an optional leading `v` is dropped)
/// and checks it against the minimum of `framework`.
pub fn framework_version(framework: Framework, value: &str) -> Result<Version, String> {
    let min = framework.min_version();
    let rejected =
        || format!("{framework} requires the min version {min} due to the availability of the ts-types!");

    let cleaned = value.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    match Version::parse(cleaned) {
        Ok(version) if version >= min => Ok(version),
        _ => Err(rejected()),
    }
}

/// Interprets yes/no style answers supplied outside the prompt.
pub fn boolean(value: &serde_json::Value) -> Result<bool, String> {
    match value {
        serde_json::Value::Bool(b) => Ok(*b),
        serde_json::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "y" => Ok(true),
            "false" | "no" | "n" => Ok(false),
            _ => Err(format!("'{s}' is not a yes/no value")),
        },
        other => Err(format!("'{other}' is not a yes/no value")),
    }
}
