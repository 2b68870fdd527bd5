//! stencil's main application entry point and orchestration logic.
//! Handles command-line argument parsing, configuration resolution,
//! and coordinates the generation run.

use std::path::{Path, PathBuf};

use stencil::{
    cli::{get_args, Args},
    command::SystemRunner,
    config::{resolve_config, ProjectConfig},
    error::{default_error_handler, Error, Result},
    processor::{Processor, RenderOptions},
    prompt::{DialoguerPrompter, Prompter},
    renderer::MiniJinjaRenderer,
    report::{ConsoleReporter, Reporter},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Validates the template directory and pins it to an absolute path.
fn resolve_template_dir(args: &Args) -> Result<PathBuf> {
    if !args.template_dir.is_dir() {
        return Err(Error::TemplateDoesNotExist {
            template_dir: args.template_dir.display().to_string(),
        });
    }
    args.template_dir.canonicalize().map_err(Error::IoError)
}

/// Picks the destination: an explicit `--output-dir`, or a sibling of the
/// template directory named after the project.
fn resolve_output_dir(args: &Args, template_dir: &Path, config: &ProjectConfig) -> PathBuf {
    match &args.output_dir {
        Some(dir) => dir.clone(),
        None => match template_dir.parent() {
            Some(parent) => parent.join(&config.project_name),
            None => PathBuf::from(&config.project_name),
        },
    }
}

/// Resolves the post-generation toggles, asking about git when nothing on
/// the command line decided it.
fn resolve_options(
    args: &Args,
    prompter: &dyn Prompter,
    reporter: &ConsoleReporter,
) -> Result<RenderOptions> {
    let cleanup = if args.skip_cleanup {
        reporter.warn("Skipping cleanup (keeping template files)");
        false
    } else {
        true
    };

    let git = if args.no_git {
        reporter.warn("Skipping git initialization");
        false
    } else if args.yes {
        true
    } else {
        prompter.confirm("Initialize a new git repository?", true)?
    };

    Ok(RenderOptions {
        cleanup,
        discard_history: git,
        init_repository: git,
        initial_commit: git,
    })
}

fn print_next_steps(output_dir: &Path, git_initialized: bool) {
    println!("\nYour new Python project is ready!");
    println!("\nProject created at: {}", output_dir.display());
    println!("\nNext steps:");
    println!("1. cd {}", output_dir.display());
    println!("2. Create a virtual environment: python -m venv .venv");
    println!("3. Activate: source .venv/bin/activate  # Win: .venv\\Scripts\\activate");
    println!("4. Install dependencies: pip install -e '.[dev]'");
    if git_initialized {
        println!("5. Install pre-commit hooks: pre-commit install");
        println!("6. Start coding!");
    } else {
        println!("5. Initialize git: git init");
        println!("6. Install pre-commit hooks: pre-commit install");
        println!("7. Start coding!");
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Validates the template directory
/// 2. Resolves the configuration, prompting for missing fields
/// 3. Fails fast when the destination already exists
/// 4. Confirms the run and the post-steps unless `--yes`
/// 5. Generates the project
/// 6. Prints the summary and next steps
fn run(args: Args) -> Result<()> {
    let reporter = ConsoleReporter::new();
    let prompter = DialoguerPrompter::new();

    let template_dir = resolve_template_dir(&args)?;

    reporter.header("Setting up your new Python project");
    let config = resolve_config(&args, &prompter)?;

    let output_dir = resolve_output_dir(&args, &template_dir, &config);
    if output_dir.exists() {
        return Err(Error::DestinationExists {
            output_dir: output_dir.display().to_string(),
        });
    }

    reporter.key_value("Project name", &config.project_name);
    reporter.key_value("Module name", &config.module_name);
    reporter.key_value("Description", &config.description);
    reporter.key_value(
        "Author",
        &format!("{} <{}>", config.author_name, config.author_email),
    );
    reporter.key_value("Repository", &config.repo_url);

    if !args.yes {
        println!("\nThis will create a new project at: {}", output_dir.display());
        println!("Based on the template at: {}", template_dir.display());
        if !prompter.confirm("Do you want to continue?", false)? {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    let options = resolve_options(&args, &prompter, &reporter)?;

    let engine = MiniJinjaRenderer::new();
    let runner = SystemRunner::new();
    let processor = Processor::new(&engine, &runner, &reporter);
    let result = processor.render(&template_dir, &output_dir, &config, &options)?;

    println!("\nProject setup complete!");
    println!("\nProject: {}", config.project_name);
    println!("Module:  {}", config.module_name);
    println!("Author:  {} <{}>", config.author_name, config.author_email);
    if !result.warnings.is_empty() {
        println!("Warnings: {}", result.warnings.len());
    }

    print_next_steps(&output_dir, options.init_repository);
    Ok(())
}
