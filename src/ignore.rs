//! Files in the template tree that are never projected.
//! Operating-system and VCS litter is excluded before any gating happens.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Patterns matched against paths relative to the template root.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 3] = ["**/.DS_Store", "**/Thumbs.db", ".git/**"];

/// Compiles the default patterns plus any `extra` ones into a set.
///
/// # Errors
/// * `Error::ConfigError` if a pattern is not a valid glob
pub fn ignore_set(extra: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS.iter().chain(extra) {
        builder.add(Glob::new(pattern).map_err(|e| {
            Error::ConfigError(format!("invalid ignore pattern '{pattern}': {e}"))
        })?);
    }
    builder.build().map_err(|e| Error::ConfigError(format!("ignore patterns: {e}")))
}
