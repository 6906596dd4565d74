//! Version-gated template directories.
//!
//! Some template directories come in two flavours: a canonical one and an
//! alternate one holding the behaviour of older framework releases. A
//! [`GateRule`] names both and the record flag that selects the alternate.

use crate::config::ConfigurationRecord;
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateRule {
    /// Directory holding the gated flavour.
    pub alternate: &'static str,
    /// Directory the gated flavour is written to.
    pub canonical: &'static str,
    /// Record flag that selects the alternate flavour when true.
    pub flag: &'static str,
}

pub const GATE_RULES: &[GateRule] =
    &[GateRule { alternate: "webapp/test_legacy", canonical: "webapp/test", flag: "lt1_124_0" }];

/// Decides applicability and destination of one relative template path.
///
/// `sources` is the full set of (underscore-stripped) relative paths in the
/// template tree; a canonical file only yields to the alternate one when the
/// alternate tree really holds the same logical file.
///
/// Returns `None` for files that do not apply to the record.
pub fn destination(
    rules: &[GateRule],
    path: &Path,
    sources: &BTreeSet<PathBuf>,
    record: &ConfigurationRecord,
) -> Result<Option<PathBuf>> {
    for rule in rules {
        let enabled = record.flag(rule.flag).ok_or_else(|| {
            Error::TemplateError(format!("gate flag '{}' is not part of the record", rule.flag))
        })?;

        if let Ok(rest) = path.strip_prefix(rule.alternate) {
            return Ok(enabled.then(|| Path::new(rule.canonical).join(rest)));
        }
        if let Ok(rest) = path.strip_prefix(rule.canonical) {
            let overridden = enabled && sources.contains(&Path::new(rule.alternate).join(rest));
            return Ok((!overridden).then(|| path.to_path_buf()));
        }
    }
    Ok(Some(path.to_path_buf()))
}
