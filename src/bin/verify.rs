//! stencil-verify: runs a template through the full development workflow.
//!
//! Generates a throwaway project from the template, then exercises it the
//! way a developer would: virtual environment, `make install`, git hooks,
//! the quality targets, docs and a final smoke import. Exits non-zero when
//! any fatal stage fails.

use clap::Parser;
use std::path::PathBuf;

use stencil::{
    command::SystemRunner,
    report::{ConsoleReporter, Reporter},
    verify::{StageKind, StageStatus, Verifier},
};

#[derive(Parser, Debug)]
#[command(
    name = "stencil-verify",
    about = "Verifies the clean-python template end to end",
    version
)]
struct Args {
    /// Template directory to verify
    #[arg(value_name = "TEMPLATE_DIR", default_value = ".")]
    template_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    let template_dir = args.template_dir.canonicalize().map_err(|err| {
        anyhow::anyhow!(
            "cannot resolve template directory {}: {}",
            args.template_dir.display(),
            err
        )
    })?;

    let reporter = ConsoleReporter::new();
    let runner = SystemRunner::new();

    reporter.header("Verifying the clean-python template");
    reporter.key_value("Template", &template_dir.display().to_string());
    println!();

    let verifier = Verifier::new(&template_dir, &runner, &reporter);
    let report = verifier.verify();

    println!();
    reporter.header("Results");
    for stage in &report.stages {
        match (&stage.status, stage.kind) {
            (StageStatus::Passed, _) => reporter.success(stage.name),
            (StageStatus::Failed(_), StageKind::Fatal) => {
                reporter.error(&format!("{} (fatal)", stage.name))
            }
            (StageStatus::Failed(_), StageKind::Advisory) => {
                reporter.warn(&format!("{} (advisory)", stage.name))
            }
        }
    }

    if let Some(project_dir) = &report.project_dir {
        println!("\nTest project: {}", project_dir.display());
    }

    if report.passed() {
        println!("\nAll verification stages passed.");
        Ok(())
    } else {
        println!("\nVerification failed.");
        std::process::exit(1);
    }
}
