//! Template projection.
//! Maps every file of the template tree onto at most one destination file,
//! rewriting its path and rendering its content with the configuration record.

use globset::GlobSet;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ConfigurationRecord;
use crate::error::{Error, Result};
use crate::gate::{self, GateRule};
use crate::renderer::TemplateRenderer;

/// One visited template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the template root.
    pub source: PathBuf,
    /// Path relative to the output root.
    pub destination: PathBuf,
    pub applicable: bool,
}

/// Drops one leading `_` from every path component, e.g.
/// `_.gitignore` -> `.gitignore`, `webapp/_test/x` -> `webapp/test/x`.
///
/// # Errors
/// * `Error::TemplateError` if a component is only `_` or not UTF-8
pub fn strip_underscores<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let mut stripped = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| {
                    Error::TemplateError(format!(
                        "non UTF-8 template path '{}'",
                        path.as_ref().display()
                    ))
                })?;
                let part = part.strip_prefix('_').unwrap_or(part);
                if part.is_empty() {
                    return Err(Error::TemplateError(format!(
                        "template path '{}' has a component that is empty once its '_' is stripped",
                        path.as_ref().display()
                    )));
                }
                stripped.push(part);
            }
            other => stripped.push(other.as_os_str()),
        }
    }
    Ok(stripped)
}

/// Writes `content` to `dest_path`, creating parent directories and
/// replacing any existing file.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest_path, content)?;
    Ok(())
}

pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    output_root: &'a Path,
    record: &'a ConfigurationRecord,
    ignored: &'a GlobSet,
    rules: &'a [GateRule],
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        output_root: &'a Path,
        record: &'a ConfigurationRecord,
        ignored: &'a GlobSet,
        rules: &'a [GateRule],
    ) -> Self {
        Self { engine, template_root, output_root, record, ignored, rules }
    }

    /// Relative paths of all template files, sorted and without ignored ones.
    fn sources(&self) -> Result<Vec<PathBuf>> {
        if !self.template_root.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: self.template_root.display().to_string(),
            });
        }

        let mut sources = Vec::new();
        for entry in WalkDir::new(self.template_root) {
            let entry = entry.map_err(|e| Error::TemplateError(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(self.template_root)
                .map_err(|e| Error::TemplateError(e.to_string()))?;
            if self.ignored.is_match(relative) {
                debug!("Skipping ignored file '{}'", relative.display());
                continue;
            }
            sources.push(relative.to_path_buf());
        }
        sources.sort();
        Ok(sources)
    }

    /// Computes the descriptor of every template file.
    ///
    /// # Errors
    /// * `Error::PathCollision` if two applicable files share a destination
    /// * `Error::TemplateDoesNotExistsError` if the template root is missing
    pub fn plan(&self) -> Result<Vec<TemplateFile>> {
        let sources = self.sources()?;
        let stripped = sources
            .iter()
            .map(strip_underscores)
            .collect::<Result<Vec<_>>>()?;
        let logical: BTreeSet<PathBuf> = stripped.iter().cloned().collect();

        let mut claimed: BTreeMap<PathBuf, &Path> = BTreeMap::new();
        let mut files = Vec::with_capacity(sources.len());

        for (source, path) in sources.iter().zip(stripped) {
            let file = match gate::destination(self.rules, &path, &logical, self.record)? {
                Some(destination) => {
                    if let Some(first) = claimed.insert(destination.clone(), source.as_path()) {
                        return Err(Error::PathCollision {
                            first: first.display().to_string(),
                            second: source.display().to_string(),
                            destination: destination.display().to_string(),
                        });
                    }
                    TemplateFile { source: source.clone(), destination, applicable: true }
                }
                None => {
                    debug!("Skipping '{}', not applicable to this version", source.display());
                    TemplateFile { source: source.clone(), destination: path, applicable: false }
                }
            };
            files.push(file);
        }

        Ok(files)
    }

    /// Renders the content of one template file.
    pub fn render(&self, file: &TemplateFile) -> Result<String> {
        let source = self.template_root.join(&file.source);
        let content = fs::read_to_string(&source)?;
        self.engine.render(&content, &self.record.context()).map_err(|e| match e {
            Error::MinijinjaError(inner) => {
                Error::TemplateError(format!("'{}': {inner}", file.source.display()))
            }
            other => other,
        })
    }

    /// Renders and writes one applicable file, returning its absolute target.
    pub fn write(&self, file: &TemplateFile) -> Result<PathBuf> {
        let target = self.output_root.join(&file.destination);
        debug!("Writing '{}' to '{}'", file.source.display(), target.display());
        let content = self.render(file)?;
        write_file(&content, &target)?;
        Ok(target)
    }

    /// Plans the projection and writes every applicable file.
    pub fn project(&self) -> Result<Vec<PathBuf>> {
        self.plan()?
            .iter()
            .filter(|file| file.applicable)
            .map(|file| self.write(file))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_underscores() {
        assert_eq!(strip_underscores("_.gitignore").unwrap(), PathBuf::from(".gitignore"));
        assert_eq!(
            strip_underscores("webapp/_test/_x.ts").unwrap(),
            PathBuf::from("webapp/test/x.ts")
        );
        assert_eq!(strip_underscores("__init").unwrap(), PathBuf::from("_init"));
        assert_eq!(strip_underscores("a_b/c_").unwrap(), PathBuf::from("a_b/c_"));
    }

    #[test]
    fn test_bare_underscore_component_is_rejected() {
        for path in ["_", "webapp/_/x.ts", "webapp/_"] {
            let result = strip_underscores(path);
            assert!(matches!(result, Err(Error::TemplateError(_))), "{path}");
        }
    }
}
