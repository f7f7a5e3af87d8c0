//! doc-builder CLI - turns prefixed markdown into a VitePress site.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "doc-builder")]
#[command(about = "Rewrites prefixed markdown into a VitePress site")]
#[command(
    after_help = "Run 'doc-builder helper' to see the high-level workflow or 'doc-builder example-doc' to generate a sample markdown file."
)]
#[command(version, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    build: BuildArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Flags of the build action. Unset values fall back to `docbuilder.toml`,
/// then to the built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    /// Path to a docbuilder.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File name prefix to detect documentation sources [default: DOC_]
    #[arg(long)]
    prefix: Option<String>,

    /// Documentation engine to use [default: vitepress]
    #[arg(long)]
    engine: Option<String>,

    /// Root path where prefixed markdown files will be discovered
    #[arg(long)]
    search: Option<PathBuf>,

    /// Documentation workspace directory that contains .vitepress setup [default: .]
    #[arg(long)]
    doc_dir: Option<PathBuf>,

    /// Name of the temporary build directory inside the documentation workspace [default: temp]
    #[arg(long)]
    temp_dir: Option<String>,

    /// Stop after writing the site config, without running npm
    #[arg(long)]
    skip_npm: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the documentation site (default)
    Build(BuildArgs),

    /// Describe the build workflow
    Helper,

    /// Create an example prefixed markdown file
    ExampleDoc {
        /// Directory where the example markdown file will be created
        #[arg(long, default_value = ".")]
        doc_dir: PathBuf,

        /// Prefix to apply to the generated example filename
        #[arg(long, default_value = "DOC_")]
        prefix: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        None => commands::build::run(cli.build).await?,
        Some(Commands::Build(args)) => commands::build::run(args).await?,
        Some(Commands::Helper) => commands::helper::run(),
        Some(Commands::ExampleDoc { doc_dir, prefix }) => {
            commands::example_doc::run(&doc_dir, &prefix)?;
        }
    }

    Ok(())
}
