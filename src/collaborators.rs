//! External commands run once the project has been written.

use crate::error::{Error, Result};
use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};

/// Message of the commit created by [`init_repository`].
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Runs `program` with `args` inside `cwd`, inheriting stdout and stderr.
///
/// # Errors
/// * `Error::IoError` if the program cannot be started
/// * `Error::CommandError` if it exits unsuccessfully
pub fn run_command(program: &str, args: &[&str], cwd: &Path) -> Result<()> {
    let command = std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ");
    debug!("Running '{command}' in '{}'", cwd.display());

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        return Err(Error::CommandError { command, status: status.to_string() });
    }
    Ok(())
}

/// Installs the generated project's npm dependencies.
pub fn install_dependencies(project_dir: &Path) -> Result<()> {
    let npm = if cfg!(windows) { "npm.cmd" } else { "npm" };
    run_command(npm, &["install"], project_dir)
}

/// Creates a git repository holding the generated files as first commit.
pub fn init_repository(project_dir: &Path) -> Result<()> {
    run_command("git", &["init", "--quiet"], project_dir)?;
    run_command("git", &["add", "."], project_dir)?;
    run_command(
        "git",
        &["commit", "--quiet", "--allow-empty", "-m", INITIAL_COMMIT_MESSAGE],
        project_dir,
    )
}
