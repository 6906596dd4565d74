//! ui5gen's main application entry point and orchestration logic.
//! Handles command-line argument parsing, answer resolution, template
//! projection and the follow-up commands.

use ui5gen::{
    cli::{get_args, Args},
    collaborators::{init_repository, install_dependencies},
    error::{default_error_handler, Result},
    gate::GATE_RULES,
    identity::GitIdentity,
    ignore::ignore_set,
    parser::get_answers_from,
    processor::Processor,
    prompt::DialoguerPrompter,
    registry::NpmRegistry,
    renderer::MiniJinjaRenderer,
    resolver::Resolver,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Collects pre-supplied answers
/// 2. Resolves the configuration record
/// 3. Projects the template tree into the output directory
/// 4. Installs dependencies
/// 5. Initializes the git repository
fn run(args: Args) -> Result<()> {
    if !args.embedded {
        println!("Welcome to the ui5gen generator!");
    }

    let supplied = get_answers_from(args.stdin, args.answers.as_deref(), args.supplied_answers())?;

    let prompt = DialoguerPrompter::new();
    let registry = NpmRegistry::new(&args.registry)?;
    let resolution =
        Resolver::new(&prompt, &registry, &GitIdentity).interactive(!args.yes).resolve(&supplied)?;
    let record = resolution.record;

    let base = match args.output_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let output_root = resolution.options.output_dir(&base, record.namespace());
    let engine = MiniJinjaRenderer::new();
    let ignored = ignore_set(&[])?;
    let processor =
        Processor::new(&engine, &args.template, &output_root, &record, &ignored, GATE_RULES);

    for file in processor.plan()?.iter().filter(|file| file.applicable) {
        let target = processor.write(file)?;
        println!("create: '{}'", target.display());
    }

    if args.skip_install {
        log::info!("Skipping dependency installation");
    } else {
        install_dependencies(&output_root)?;
    }

    if resolution.options.initrepo {
        init_repository(&output_root)?;
    }

    println!("Application generation completed successfully in {}.", output_root.display());
    Ok(())
}
