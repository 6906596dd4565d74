//! Command-line interface implementation for ui5gen.
//! Provides argument parsing and help text formatting using clap.

use crate::parser::Answers;
use clap::Parser;
use std::path::PathBuf;

/// Template tree shipped with the generator.
pub const BUNDLED_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/app");

/// Command-line arguments structure for ui5gen.
///
/// Every answer flag is optional; answers that are missing or invalid are
/// asked for interactively.
#[derive(Parser, Debug)]
#[command(author, version, about = "ui5gen: create a new UI5 TypeScript application", long_about = None)]
pub struct Args {
    /// Application namespace, e.g. com.myorg.myapp
    #[arg(long)]
    pub namespace: Option<String>,

    /// Framework to build on (OpenUI5 or SAPUI5)
    #[arg(long)]
    pub framework: Option<String>,

    /// Framework version, e.g. 1.120.0
    #[arg(long = "framework-version", value_name = "VERSION")]
    pub framework_version: Option<String>,

    /// Author of the application
    #[arg(long)]
    pub author: Option<String>,

    /// Create a new directory named after the namespace
    #[arg(long, value_name = "BOOL")]
    pub newdir: Option<bool>,

    /// Initialize a git repository with an initial commit
    #[arg(long, value_name = "BOOL")]
    pub initrepo: Option<bool>,

    /// Read answers (JSON or YAML) from this file
    #[arg(long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Get answers from stdin (JSON)
    #[arg(short, long)]
    pub stdin: bool,

    /// Accept defaults for everything not supplied instead of prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Directory the application is generated in (defaults to the current one)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Template directory to use instead of the bundled one
    #[arg(long, value_name = "DIR", default_value = BUNDLED_TEMPLATE_DIR)]
    pub template: PathBuf,

    /// npm registry used to look up the newest framework version
    #[arg(long, value_name = "URL", default_value = crate::registry::NPM_REGISTRY)]
    pub registry: String,

    /// Skip `npm install` in the generated project
    #[arg(long)]
    pub skip_install: bool,

    /// Run embedded in another generator (no greeting)
    #[arg(long)]
    pub embedded: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Answers given as flags, keyed like an answers file.
    pub fn supplied_answers(&self) -> Answers {
        let mut answers = Answers::new();
        let strings = [
            ("namespace", &self.namespace),
            ("framework", &self.framework),
            ("frameworkVersion", &self.framework_version),
            ("author", &self.author),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                answers.insert(key.to_string(), serde_json::Value::String(value.clone()));
            }
        }
        for (key, value) in [("newdir", self.newdir), ("initrepo", self.initrepo)] {
            if let Some(value) = value {
                answers.insert(key.to_string(), serde_json::Value::Bool(value));
            }
        }
        answers
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}
