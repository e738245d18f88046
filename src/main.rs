use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gitlab_component_docs::cli;

#[derive(Parser)]
#[command(name = "gitlab-component-docs", version)]
#[command(about = "Generate README documentation for GitLab CI/CD components", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate README.md from the component definitions in a repository
    Generate {
        /// Repository path (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Directory holding the component YAML files, relative to the repository
        #[arg(long, default_value = "templates")]
        templates_dir: String,

        /// Tera template used to render the README (created if missing)
        #[arg(long, default_value = "README.md.tmpl")]
        template: String,

        /// Output file path
        #[arg(short = 'o', long, default_value = "README.md")]
        output: String,

        /// Project path override (e.g., "my-group/ci-components")
        #[arg(long)]
        project: Option<String>,

        /// Component version override (e.g., "1.2.0")
        #[arg(long)]
        version: Option<String>,
    },

    /// Write the default README template into a repository
    Init {
        /// Repository path (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Template file name
        #[arg(long, default_value = "README.md.tmpl")]
        template: String,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with generated output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            path,
            templates_dir,
            template,
            output,
            project,
            version,
        } => {
            cli::generate::run(&path, &templates_dir, &template, &output, project, version)?;
        }
        Commands::Init { path, template } => {
            cli::init::run(&path, &template)?;
        }
    }

    Ok(())
}
