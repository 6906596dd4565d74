//! ui5gen scaffolds UI5 TypeScript applications.
//! It resolves the application settings from flags, answer files, prompts and
//! computed defaults, then projects a template tree into a new project.

/// Command-line interface module
pub mod cli;

/// External commands run after generation (npm, git)
pub mod collaborators;

/// Configuration record, framework model and derived values
pub mod config;

/// Error types and handling
pub mod error;

/// Version-gated template directories
pub mod gate;

/// Author default from the git identity
pub mod identity;

/// Files never projected from the template tree
pub mod ignore;

/// Pre-supplied answers from stdin, files and flags
pub mod parser;

/// Template projection
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// npm registry lookup of framework versions
pub mod registry;

/// Three-tier answer resolution
pub mod resolver;

/// Template rendering
pub mod renderer;

/// Field predicates
pub mod validate;
