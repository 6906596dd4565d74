//! Loading of pre-supplied answers.
//!
//! Answers may come from stdin (JSON), from an answers file (JSON or YAML)
//! and from command-line flags. Later sources override earlier ones:
//! stdin < file < flags.

use crate::error::{Error, Result};
use log::debug;
use std::io::Read;
use std::path::Path;

pub type Answers = serde_json::Map<String, serde_json::Value>;

/// Keys a pre-supplied batch may contain.
pub const ANSWER_KEYS: [&str; 6] =
    ["namespace", "framework", "frameworkVersion", "author", "newdir", "initrepo"];

/// Parses an answers document, trying JSON first and YAML second.
///
/// Empty input yields no answers. Anything that is not a mapping is rejected.
pub fn parse_answers(content: &str) -> Result<Answers> {
    if content.trim().is_empty() {
        return Ok(Answers::new());
    }
    let value: serde_json::Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)?,
    };
    match value {
        serde_json::Value::Object(map) => {
            for key in map.keys().filter(|k| !ANSWER_KEYS.contains(&k.as_str())) {
                log::warn!("Ignoring unknown answer '{key}'");
            }
            Ok(map.into_iter().filter(|(k, _)| ANSWER_KEYS.contains(&k.as_str())).collect())
        }
        serde_json::Value::Null => Ok(Answers::new()),
        other => Err(Error::ConfigError(format!("answers must be a mapping, got '{other}'"))),
    }
}

pub fn load_from_stdin() -> Result<Answers> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_answers(&buffer)
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Answers> {
    let path = path.as_ref();
    debug!("Loading answers from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_answers(&content)
}

/// Overlays `overrides` onto `base`, key by key.
pub fn merge(mut base: Answers, overrides: Answers) -> Answers {
    for (key, value) in overrides {
        base.insert(key, value);
    }
    base
}

/// Collects answers from every configured source.
pub fn get_answers_from(
    take_from_stdin: bool,
    answers_file: Option<&Path>,
    flags: Answers,
) -> Result<Answers> {
    let mut answers = if take_from_stdin { load_from_stdin()? } else { Answers::new() };
    if let Some(path) = answers_file {
        answers = merge(answers, load_from_file(path)?);
    }
    Ok(merge(answers, flags))
}
