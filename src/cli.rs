//! Command-line interface implementation for stencil.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for stencil.
///
/// Every project field is optional on the command line; missing fields are
/// collected interactively. `--yes` skips confirmations only, never the
/// field prompts.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "stencil: stamps out new Python projects from the clean-python template", long_about = None)]
pub struct Args {
    /// Project name (e.g. my-awesome-project)
    #[arg(long)]
    pub name: Option<String>,

    /// Short project description
    #[arg(long)]
    pub description: Option<String>,

    /// Author name written into the project metadata
    #[arg(long)]
    pub author: Option<String>,

    /// Author email written into the project metadata
    #[arg(long)]
    pub email: Option<String>,

    /// GitHub username used to derive the repository URLs.
    /// An empty value keeps the placeholder owner without prompting.
    #[arg(long)]
    pub github: Option<String>,

    /// Directory to create the new project in.
    /// Defaults to a sibling of the template directory named after the project.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Template directory to generate from
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub template_dir: PathBuf,

    /// Skip git history removal, repository init and the initial commit
    #[arg(long)]
    pub no_git: bool,

    /// Keep template-only files in the generated project
    #[arg(long)]
    pub skip_cleanup: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
