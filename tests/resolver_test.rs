use semver::Version;
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;
use ui5gen::config::{Framework, RunOptions, DEFAULT_NAMESPACE};
use ui5gen::error::{Error, Result};
use ui5gen::identity::IdentitySource;
use ui5gen::parser::{parse_answers, Answers};
use ui5gen::prompt::{Prompter, Validator};
use ui5gen::registry::PackageRegistry;
use ui5gen::resolver::{Provenance, Resolver};

/// Fails the test on any interaction.
struct NoPrompter;

impl Prompter for NoPrompter {
    fn input(&self, message: &str, _: &str, _: Validator) -> Result<String> {
        panic!("unexpected prompt: {message}")
    }

    fn select(&self, message: &str, _: &[&str], _: usize) -> Result<usize> {
        panic!("unexpected prompt: {message}")
    }

    fn confirm(&self, message: &str, _: bool) -> Result<bool> {
        panic!("unexpected prompt: {message}")
    }
}

/// Replays canned answers, re-asking on rejected input like a terminal would.
#[derive(Default)]
struct ScriptedPrompter {
    inputs: RefCell<VecDeque<&'static str>>,
    selections: RefCell<VecDeque<usize>>,
    confirms: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
    rejections: RefCell<Vec<String>>,
    defaults: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    fn new(inputs: &[&'static str], selections: &[usize], confirms: &[bool]) -> Self {
        Self {
            inputs: RefCell::new(inputs.iter().copied().collect()),
            selections: RefCell::new(selections.iter().copied().collect()),
            confirms: RefCell::new(confirms.iter().copied().collect()),
            ..Default::default()
        }
    }
}

fn exhausted(message: &str) -> Error {
    Error::ConfigError(format!("no scripted answer for '{message}'"))
}

impl Prompter for ScriptedPrompter {
    fn input(&self, message: &str, default: &str, validate: Validator) -> Result<String> {
        self.asked.borrow_mut().push(message.to_string());
        self.defaults.borrow_mut().push(default.to_string());
        loop {
            let answer = self.inputs.borrow_mut().pop_front().ok_or_else(|| exhausted(message))?;
            let answer = if answer.is_empty() { default } else { answer };
            match validate(answer) {
                Ok(()) => return Ok(answer.to_string()),
                Err(e) => self.rejections.borrow_mut().push(e),
            }
        }
    }

    fn select(&self, message: &str, _: &[&str], _: usize) -> Result<usize> {
        self.asked.borrow_mut().push(message.to_string());
        self.selections.borrow_mut().pop_front().ok_or_else(|| exhausted(message))
    }

    fn confirm(&self, message: &str, _: bool) -> Result<bool> {
        self.asked.borrow_mut().push(message.to_string());
        self.confirms.borrow_mut().pop_front().ok_or_else(|| exhausted(message))
    }
}

struct NoRegistry;

impl PackageRegistry for NoRegistry {
    fn highest_version(&self, package: &str) -> Result<Version> {
        panic!("unexpected registry lookup for {package}")
    }
}

struct OfflineRegistry;

impl PackageRegistry for OfflineRegistry {
    fn highest_version(&self, package: &str) -> Result<Version> {
        Err(Error::RegistryError { package: package.to_string(), reason: "offline".to_string() })
    }
}

struct FixedRegistry(Version, RefCell<Vec<String>>);

impl PackageRegistry for FixedRegistry {
    fn highest_version(&self, package: &str) -> Result<Version> {
        self.1.borrow_mut().push(package.to_string());
        Ok(self.0.clone())
    }
}

struct NoIdentity;

impl IdentitySource for NoIdentity {
    fn user_name(&self) -> Option<String> {
        None
    }
}

struct Named;

impl IdentitySource for Named {
    fn user_name(&self) -> Option<String> {
        Some("Git User".to_string())
    }
}

fn full_answers() -> Answers {
    parse_answers(
        r#"{
            "namespace": "com.acme.shop",
            "framework": "OpenUI5",
            "frameworkVersion": "1.130.0",
            "author": "Jane Doe",
            "newdir": false,
            "initrepo": false
        }"#,
    )
    .unwrap()
}

#[test_log::test]
fn test_fully_supplied_answers_never_prompt() {
    let resolution = Resolver::new(&NoPrompter, &NoRegistry, &NoIdentity)
        .resolve(&full_answers())
        .unwrap();

    assert!(resolution.provenance.values().all(|p| *p == Provenance::Supplied));
    assert_eq!(resolution.options, RunOptions { newdir: false, initrepo: false });

    let record = resolution.record;
    assert_eq!(record.namespace(), "com.acme.shop");
    assert_eq!(record.framework(), Framework::OpenUI5);
    assert_eq!(record.framework_version(), "1.130.0");
    assert_eq!(record.author(), "Jane Doe");
    assert_eq!(record.tstypes(), "@openui5/types");
    assert_eq!(record.default_theme(), "sap_horizon");
    assert_eq!(record.app_uri(), "com/acme/shop");
    assert_eq!(record.flag("lt1_124_0"), Some(false));
}

#[test_log::test]
fn test_invalid_supplied_namespace_is_prompted() {
    let mut answers = full_answers();
    answers.insert("namespace".to_string(), json!("Invalid Name!"));
    let prompt = ScriptedPrompter::new(&["Still Invalid", "com.valid.app"], &[], &[]);

    let resolution = Resolver::new(&prompt, &NoRegistry, &NoIdentity).resolve(&answers).unwrap();

    assert_eq!(resolution.record.namespace(), "com.valid.app");
    assert_eq!(resolution.provenance["namespace"], Provenance::Prompted);
    assert_eq!(resolution.provenance["framework"], Provenance::Supplied);
    assert_eq!(prompt.asked.borrow().len(), 1);
    assert_eq!(prompt.rejections.borrow().len(), 1);
    assert!(!resolution.record.context().to_string().contains("Invalid Name!"));
}

#[test_log::test]
fn test_version_validated_against_resolved_framework() {
    let answers = parse_answers(
        r#"{"namespace": "com.acme", "author": "A", "newdir": true, "initrepo": true,
            "framework": "SAPUI5", "frameworkVersion": "1.90.0"}"#,
    )
    .unwrap();
    let resolution = Resolver::new(&NoPrompter, &NoRegistry, &NoIdentity).resolve(&answers).unwrap();
    assert_eq!(resolution.record.framework_version(), "1.90.0");
    assert_eq!(resolution.record.tstypes(), "@sapui5/ts-types-esm");

    // The same version is below the OpenUI5 minimum and must be asked for again.
    let mut answers = answers;
    answers.insert("framework".to_string(), json!("OpenUI5"));
    let prompt = ScriptedPrompter::new(&["1.90.0", "1.95.0"], &[], &[]);
    let resolution = Resolver::new(&prompt, &OfflineRegistry, &NoIdentity).resolve(&answers).unwrap();
    assert_eq!(resolution.record.framework_version(), "1.95.0");
    assert_eq!(resolution.record.default_theme(), "sap_fiori_3");
    assert_eq!(resolution.record.flag("lt1_124_0"), Some(true));
    assert_eq!(prompt.rejections.borrow().len(), 1);
}

#[test_log::test]
fn test_interactive_resolution_uses_prompts() {
    let registry = FixedRegistry(Version::new(1, 131, 0), RefCell::default());
    // namespace (accept default), version (accept default), author (accept default)
    let prompt = ScriptedPrompter::new(&["", "", ""], &[1], &[false, true]);

    let resolution = Resolver::new(&prompt, &registry, &Named).resolve(&Answers::new()).unwrap();

    assert!(resolution.provenance.values().all(|p| *p == Provenance::Prompted));
    assert_eq!(resolution.record.namespace(), DEFAULT_NAMESPACE);
    assert_eq!(resolution.record.framework(), Framework::SAPUI5);
    assert_eq!(resolution.record.framework_version(), "1.131.0");
    assert_eq!(resolution.record.author(), "Git User");
    assert_eq!(resolution.record.cdn_domain(), "ui5.sap.com");
    assert_eq!(resolution.options, RunOptions { newdir: false, initrepo: true });
    assert_eq!(*registry.1.borrow(), vec!["@sapui5/types".to_string()]);
    assert_eq!(prompt.defaults.borrow()[1], "1.131.0");
}

#[test_log::test]
fn test_registry_failure_falls_back_to_minimum() {
    let answers = parse_answers(r#"{"framework": "OpenUI5"}"#).unwrap();
    let resolution = Resolver::new(&NoPrompter, &OfflineRegistry, &NoIdentity)
        .interactive(false)
        .resolve(&answers)
        .unwrap();

    assert_eq!(resolution.record.framework_version(), "1.90.1");
    assert_eq!(resolution.provenance["framework"], Provenance::Supplied);
    assert_eq!(resolution.provenance["frameworkVersion"], Provenance::Defaulted);
}

#[test_log::test]
fn test_registry_release_below_minimum_falls_back() {
    let registry = FixedRegistry(Version::new(1, 80, 0), RefCell::default());
    let resolution = Resolver::new(&NoPrompter, &registry, &NoIdentity)
        .interactive(false)
        .resolve(&Answers::new())
        .unwrap();

    assert_eq!(resolution.record.framework_version(), "1.90.1");
    assert_eq!(resolution.provenance["frameworkVersion"], Provenance::Defaulted);
    assert_eq!(registry.1.borrow().as_slice(), ["@openui5/types"]);
}

#[test_log::test]
fn test_non_interactive_defaults() {
    let registry = FixedRegistry(Version::new(1, 120, 4), RefCell::default());
    let answers = parse_answers(r#"{"namespace": "Bad Namespace", "newdir": "perhaps"}"#).unwrap();

    let resolution = Resolver::new(&NoPrompter, &registry, &NoIdentity)
        .interactive(false)
        .resolve(&answers)
        .unwrap();

    assert!(resolution.provenance.values().all(|p| *p == Provenance::Defaulted));
    assert_eq!(resolution.record.namespace(), DEFAULT_NAMESPACE);
    assert_eq!(resolution.record.framework(), Framework::OpenUI5);
    assert_eq!(resolution.record.framework_version(), "1.120.4");
    assert_eq!(resolution.record.author(), "");
    assert_eq!(resolution.options, RunOptions::default());
}

#[test_log::test]
fn test_wrongly_typed_supplied_values_are_ignored() {
    let mut answers = full_answers();
    answers.insert("frameworkVersion".to_string(), json!(1.12));
    answers.insert("initrepo".to_string(), json!("yes"));
    let prompt = ScriptedPrompter::new(&["1.124.0"], &[], &[]);

    let resolution = Resolver::new(&prompt, &OfflineRegistry, &NoIdentity).resolve(&answers).unwrap();

    assert_eq!(resolution.record.framework_version(), "1.124.0");
    assert_eq!(resolution.provenance["frameworkVersion"], Provenance::Prompted);
    assert!(resolution.options.initrepo);
    assert_eq!(resolution.provenance["initrepo"], Provenance::Supplied);
}
