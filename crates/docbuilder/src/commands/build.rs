//! Documentation build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory};
use docbuilder_site::{BuildOptions, SiteBuilder};
use serde::Deserialize;

use crate::{BuildArgs, Cli};

/// Config file looked up in the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "docbuilder.toml";

/// Configuration file structure (docbuilder.toml).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    build: BuildSettings,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct BuildSettings {
    prefix: Option<String>,
    engine: Option<String>,
    search: Option<PathBuf>,
    doc_dir: Option<PathBuf>,
    temp_dir: Option<String>,
    #[serde(default)]
    skip_npm: bool,
}

/// Load the config file. An explicit path must exist; the default one is
/// optional.
fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(ConfigFile::default());
            }
            path
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Flags win over file values, file values over defaults. `None` when no
/// search path was given anywhere.
fn resolve_options(args: BuildArgs, file: BuildSettings) -> Option<BuildOptions> {
    let defaults = BuildOptions::default();

    Some(BuildOptions {
        search_path: args.search.or(file.search)?,
        prefix: args.prefix.or(file.prefix).unwrap_or(defaults.prefix),
        engine: args.engine.or(file.engine).unwrap_or(defaults.engine),
        doc_dir: args.doc_dir.or(file.doc_dir).unwrap_or(defaults.doc_dir),
        temp_dir_name: args
            .temp_dir
            .or(file.temp_dir)
            .unwrap_or(defaults.temp_dir_name),
        skip_npm: args.skip_npm || file.skip_npm,
    })
}

/// Run the build command.
pub async fn run(args: BuildArgs) -> Result<()> {
    let file_config = load_config(args.config.as_deref())?;

    let Some(options) = resolve_options(args, file_config.build) else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "missing required flag: --search",
            )
            .exit();
    };

    tracing::info!(
        "Building documentation from {} into {}",
        options.search_path.display(),
        options.doc_dir.display()
    );

    let report = SiteBuilder::new(options)
        .build()
        .await
        .context("build failed")?;

    tracing::info!(
        "Built site from {} prefixed and {} existing docs ({} sidebar entries) in {}ms",
        report.prefixed,
        report.existing,
        report.sidebar_entries,
        report.duration_ms
    );
    tracing::info!("Config: {}", report.config_path.display());
    if let Some(output) = report.output_dir {
        tracing::info!("Output: {}", output.display());
    }

    Ok(())
}
