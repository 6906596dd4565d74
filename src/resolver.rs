//! Answer resolution.
//!
//! Each field is resolved on its own from three tiers, in order: a valid
//! pre-supplied value, an interactive answer, a computed default. The tier
//! that produced the value is kept as its [`Provenance`].

use crate::config::{
    ConfigurationBuilder, ConfigurationRecord, Framework, RunOptions, DEFAULT_NAMESPACE,
};
use crate::error::{Error, Result};
use crate::identity::IdentitySource;
use crate::parser::Answers;
use crate::prompt::Prompter;
use crate::registry::PackageRegistry;
use crate::validate;
use indexmap::IndexMap;
use log::{debug, warn};
use semver::Version;
use serde::Serialize;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Provenance {
    Supplied,
    Prompted,
    Defaulted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Resolved<T> {
    fn new(value: T, provenance: Provenance) -> Self {
        Self { value, provenance }
    }
}

/// Outcome of a resolver run.
#[derive(Debug)]
pub struct Resolution {
    pub record: ConfigurationRecord,
    pub options: RunOptions,
    /// Provenance per answer key, in resolution order.
    pub provenance: IndexMap<&'static str, Provenance>,
}

pub struct Resolver<'a> {
    prompt: &'a dyn Prompter,
    registry: &'a dyn PackageRegistry,
    identity: &'a dyn IdentitySource,
    interactive: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(
        prompt: &'a dyn Prompter,
        registry: &'a dyn PackageRegistry,
        identity: &'a dyn IdentitySource,
    ) -> Self {
        Self { prompt, registry, identity, interactive: true }
    }

    /// With `interactive` off, unresolved fields take their default instead
    /// of being prompted.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Resolves every field and freezes the configuration record.
    ///
    /// # Errors
    /// * `Error::PromptError` if the terminal interaction fails
    pub fn resolve(&self, supplied: &Answers) -> Result<Resolution> {
        let mut provenance = IndexMap::new();

        let namespace = self.resolve_namespace(supplied)?;
        provenance.insert("namespace", namespace.provenance);
        let framework = self.resolve_framework(supplied)?;
        provenance.insert("framework", framework.provenance);
        // The version validator depends on the framework resolved just above.
        let version = self.resolve_framework_version(supplied, framework.value)?;
        provenance.insert("frameworkVersion", version.provenance);
        let author = self.resolve_author(supplied)?;
        provenance.insert("author", author.provenance);
        let newdir = self.resolve_bool(
            supplied,
            "newdir",
            "Would you like to create a new directory for the application?",
            true,
        )?;
        provenance.insert("newdir", newdir.provenance);
        let initrepo = self.resolve_bool(
            supplied,
            "initrepo",
            "Would you like to initialize a local git repository for the application?",
            true,
        )?;
        provenance.insert("initrepo", initrepo.provenance);

        for (key, source) in &provenance {
            debug!("Resolved '{key}' ({source:?})");
        }

        let record = ConfigurationBuilder::new()
            .namespace(namespace.value)
            .framework(framework.value)
            .framework_version(version.value)
            .author(author.value)
            .build()?;
        let options = RunOptions { newdir: newdir.value, initrepo: initrepo.value };

        Ok(Resolution { record, options, provenance })
    }

    pub fn resolve_namespace(&self, supplied: &Answers) -> Result<Resolved<String>> {
        if let Some(value) = supplied_str(supplied, "namespace", validate::namespace) {
            return Ok(Resolved::new(value, Provenance::Supplied));
        }
        if !self.interactive {
            return Ok(Resolved::new(DEFAULT_NAMESPACE.to_string(), Provenance::Defaulted));
        }
        let answer = self.prompt.input(
            "Which namespace do you want to use?",
            DEFAULT_NAMESPACE,
            &|s| validate::namespace(s).map(|_| ()),
        )?;
        let value = validate::namespace(&answer).map_err(|m| invalid("namespace", m))?;
        Ok(Resolved::new(value, Provenance::Prompted))
    }

    pub fn resolve_framework(&self, supplied: &Answers) -> Result<Resolved<Framework>> {
        if let Some(value) = supplied_str(supplied, "framework", validate::framework) {
            return Ok(Resolved::new(value, Provenance::Supplied));
        }
        let default = Framework::ALL[0];
        if !self.interactive {
            return Ok(Resolved::new(default, Provenance::Defaulted));
        }
        let choices: Vec<&str> = Framework::ALL.iter().map(Framework::name).collect();
        let index = self.prompt.select("Which framework do you want to use?", &choices, 0)?;
        let value = Framework::ALL
            .get(index)
            .copied()
            .ok_or_else(|| invalid("framework", format!("no choice at index {index}")))?;
        Ok(Resolved::new(value, Provenance::Prompted))
    }

    pub fn resolve_framework_version(
        &self,
        supplied: &Answers,
        framework: Framework,
    ) -> Result<Resolved<Version>> {
        let check = |s: &str| validate::framework_version(framework, s);
        if let Some(value) = supplied_str(supplied, "frameworkVersion", &check) {
            return Ok(Resolved::new(value, Provenance::Supplied));
        }
        let default = self.default_version(framework);
        if !self.interactive {
            return Ok(Resolved::new(default, Provenance::Defaulted));
        }
        let answer = self.prompt.input(
            "Which framework version do you want to use?",
            &default.to_string(),
            &|s| check(s).map(|_| ()),
        )?;
        let value = check(&answer).map_err(|m| invalid("frameworkVersion", m))?;
        Ok(Resolved::new(value, Provenance::Prompted))
    }

    pub fn resolve_author(&self, supplied: &Answers) -> Result<Resolved<String>> {
        if let Some(value) = supplied_str(supplied, "author", |s| Ok(s.to_string())) {
            return Ok(Resolved::new(value, Provenance::Supplied));
        }
        let default = self.identity.user_name().unwrap_or_default();
        if !self.interactive {
            return Ok(Resolved::new(default, Provenance::Defaulted));
        }
        let answer =
            self.prompt.input("Who is the author of the application?", &default, &|_| Ok(()))?;
        Ok(Resolved::new(answer, Provenance::Prompted))
    }

    fn resolve_bool(
        &self,
        supplied: &Answers,
        key: &str,
        message: &str,
        default: bool,
    ) -> Result<Resolved<bool>> {
        if let Some(value) = supplied_value(supplied, key, validate::boolean) {
            return Ok(Resolved::new(value, Provenance::Supplied));
        }
        if !self.interactive {
            return Ok(Resolved::new(default, Provenance::Defaulted));
        }
        let value = self.prompt.confirm(message, default)?;
        Ok(Resolved::new(value, Provenance::Prompted))
    }

    /// Highest published release of the framework's types package, or the
    /// framework minimum when the registry cannot be reached or reports a
    /// release below that minimum.
    fn default_version(&self, framework: Framework) -> Version {
        let package = framework.types_package(None);
        let looked_up = self.registry.highest_version(&package).map_err(|e| e.to_string()).and_then(
            |version| validate::framework_version(framework, &version.to_string()),
        );
        match looked_up {
            Ok(version) => version,
            Err(e) => {
                warn!("{e} Falling back to min version {}.", framework.min_version());
                framework.min_version()
            }
        }
    }
}

/// Returns the supplied value for `key` if `check` accepts it. A rejected
/// value is reported and treated as absent.
fn supplied_value<T>(
    supplied: &Answers,
    key: &str,
    check: impl Fn(&serde_json::Value) -> std::result::Result<T, String>,
) -> Option<T> {
    let raw = supplied.get(key)?;
    match check(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            warn!("Ignoring supplied {key} {raw}: {message}");
            None
        }
    }
}

fn supplied_str<T>(
    supplied: &Answers,
    key: &str,
    check: impl Fn(&str) -> std::result::Result<T, String>,
) -> Option<T> {
    supplied_value(supplied, key, |raw| match raw.as_str() {
        Some(s) => check(s),
        None => Err("expected a string".to_string()),
    })
}

fn invalid(field: &str, message: String) -> Error {
    Error::ValidationError { field: field.to_string(), message }
}
