//! User input and interaction handling.
//! The resolver only describes what to ask; a [`Prompter`] owns the terminal
//! and keeps asking until the validator accepts the answer.

use crate::error::Result;
use dialoguer::{Confirm, Input, Select};

/// Validator passed along with a text question. `Err` holds the message to
/// show before asking again.
pub type Validator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

/// The interactive question/answer channel.
pub trait Prompter {
    /// Asks for free text, re-asking until `validate` accepts the input.
    fn input(&self, message: &str, default: &str, validate: Validator) -> Result<String>;

    /// Asks to pick one of `choices` and returns its index.
    fn select(&self, message: &str, choices: &[&str], default: usize) -> Result<usize>;

    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, message: &str, default: &str, validate: Validator) -> Result<String> {
        let input = Input::<String>::new()
            .with_prompt(message)
            .default(default.to_string())
            .validate_with(|value: &String| validate(value.as_str()))
            .interact_text()?;
        Ok(input)
    }

    fn select(&self, message: &str, choices: &[&str], default: usize) -> Result<usize> {
        let selection =
            Select::new().with_prompt(message).default(default).items(choices).interact()?;
        Ok(selection)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        let result = Confirm::new().with_prompt(message).default(default).interact()?;
        Ok(result)
    }
}
