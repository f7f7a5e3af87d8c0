//! Documentation site builder.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use docbuilder_config::{compose, ConfigError, SiteConfig};

use crate::collect::{collect_existing, collect_prefixed, write_menu_index, MenuRecord};
use crate::engine::{engine_for, EngineError, SiteEngine};
use crate::environment::Environment;
use crate::fsutil::{copy_dir, copy_file};
use crate::npm::{CommandRunner, SystemRunner, PACKAGE_FILES};
use crate::sidebar::{build_sections, sections_to_sidebar};

/// Options for one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// File name prefix marking documentation sources
    pub prefix: String,

    /// Engine name (currently only "vitepress")
    pub engine: String,

    /// Root scanned for prefixed markdown
    pub search_path: PathBuf,

    /// Documentation workspace containing the engine config dir
    pub doc_dir: PathBuf,

    /// Name of the scratch directory inside the doc dir
    pub temp_dir_name: String,

    /// Stop after writing the composed config
    pub skip_npm: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            prefix: "DOC_".to_string(),
            engine: "vitepress".to_string(),
            search_path: PathBuf::new(),
            doc_dir: PathBuf::from("."),
            temp_dir_name: "temp".to_string(),
            skip_npm: false,
        }
    }
}

impl BuildOptions {
    /// Reject empty options before touching the filesystem.
    pub fn validate(&self) -> Result<(), BuildError> {
        let checks = [
            (self.prefix.is_empty(), "prefix cannot be empty"),
            (self.engine.trim().is_empty(), "engine cannot be empty"),
            (
                self.search_path.as_os_str().is_empty(),
                "search path cannot be empty",
            ),
            (
                self.doc_dir.as_os_str().is_empty(),
                "documentation directory cannot be empty",
            ),
            (
                self.temp_dir_name.is_empty(),
                "temporary directory name cannot be empty",
            ),
        ];

        if let Some((_, message)) = checks.iter().find(|(failed, _)| *failed) {
            return Err(BuildError::InvalidOptions(message.to_string()));
        }

        // Exactly one directory directly inside the doc dir
        let mut components = Path::new(&self.temp_dir_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(BuildError::InvalidOptions(format!(
                "temporary directory name must be a single directory name, got '{}'",
                self.temp_dir_name
            ))),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildReport {
    /// Prefixed markdown files found under the search root
    pub prefixed: usize,

    /// Existing markdown files merged from the doc dir
    pub existing: usize,

    /// Menu records turned into sidebar entries
    pub sidebar_entries: usize,

    /// Rendered engine config in the doc dir
    pub config_path: PathBuf,

    /// Published site, `None` when npm was skipped
    pub output_dir: Option<PathBuf>,

    /// Total build time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to read: {0}")]
    ReadError(String),

    #[error("Failed to write: {0}")]
    WriteError(String),

    #[error("No documentation sources found")]
    NoSources,

    #[error("Invalid site configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("`{command}` failed: {message}")]
    CommandError { command: String, message: String },
}

/// Stages prefixed and existing markdown, composes the site config and
/// drives the engine build.
pub struct SiteBuilder<R = SystemRunner> {
    options: BuildOptions,
    runner: R,
}

impl SiteBuilder {
    /// Create a builder that runs npm for real.
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            runner: SystemRunner,
        }
    }
}

impl<R: CommandRunner> SiteBuilder<R> {
    /// Replace the command runner.
    pub fn with_runner<T: CommandRunner>(self, runner: T) -> SiteBuilder<T> {
        SiteBuilder {
            options: self.options,
            runner,
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the site.
    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        let start = Instant::now();

        self.options.validate()?;
        let engine = engine_for(&self.options.engine)?;

        let env = Environment::prepare(&self.options, engine.as_ref())?;
        env.prepare_workspace()?;

        let mut seen = HashSet::new();
        let prefixed = collect_prefixed(&env, &self.options.prefix, &mut seen)?;
        let existing = collect_existing(&env, &self.options.temp_dir_name, &mut seen)?;

        let mut records = prefixed.records;
        records.extend(existing.records);
        if records.is_empty() {
            return Err(BuildError::NoSources);
        }

        write_menu_index(&env.temp_dir, &records)?;
        self.generate_config(&env, engine.as_ref(), &records)?;

        let output_dir = if self.options.skip_npm {
            tracing::info!("Skipping npm install and build");
            None
        } else {
            self.install_dependencies(&env).await?;
            self.build_site(&env, engine.as_ref()).await?;
            self.publish_dist(&env)?;
            Some(env.dist_dst.clone())
        };

        Ok(BuildReport {
            prefixed: prefixed.files,
            existing: existing.files,
            sidebar_entries: records.len(),
            config_path: env.output_config.clone(),
            output_dir,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Compose base + override with the generated sidebar and write the
    /// engine config into both the temp dir and the doc dir.
    fn generate_config(
        &self,
        env: &Environment,
        engine: &dyn SiteEngine,
        records: &[MenuRecord],
    ) -> Result<SiteConfig, BuildError> {
        tracing::debug!("[4/7] Generating {} configuration", engine.name());

        let base = SiteConfig::load(&env.base_config)?;
        let over = SiteConfig::load_optional(&env.override_config)?;
        let sidebar = sections_to_sidebar(&build_sections(records));

        let composed = compose(&base, &over, &sidebar)?;
        let rendered = engine.render_config(&composed)?;

        for target in [&env.temp_config, &env.output_config] {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| BuildError::WriteError(format!("{}: {}", parent.display(), e)))?;
            }
            fs::write(target, &rendered)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))?;
        }

        Ok(composed)
    }

    async fn install_dependencies(&self, env: &Environment) -> Result<(), BuildError> {
        tracing::debug!("[5/7] Preparing Node.js dependencies");

        for name in PACKAGE_FILES {
            let src = env.doc_dir.join(name);
            if src.is_file() {
                copy_file(&src, &env.temp_dir.join(name))
                    .map_err(|e| BuildError::WriteError(format!("{}: {}", src.display(), e)))?;
            }
        }

        if env.temp_dir.join("node_modules").exists() {
            tracing::debug!("  node_modules already present, skipping npm install");
            return Ok(());
        }

        tracing::info!("Running npm install (this may take a while)");
        self.runner.run("npm", &["install"], &env.temp_dir).await
    }

    async fn build_site(&self, env: &Environment, engine: &dyn SiteEngine) -> Result<(), BuildError> {
        tracing::debug!("[6/7] Running npm run {}", engine.build_script());
        self.runner
            .run("npm", &["run", engine.build_script()], &env.temp_dir)
            .await
    }

    fn publish_dist(&self, env: &Environment) -> Result<(), BuildError> {
        tracing::debug!("[7/7] Publishing dist output");

        if !env.dist_src.is_dir() {
            return Err(BuildError::NotFound(format!(
                "expected directory not found: {}",
                env.dist_src.display()
            )));
        }

        if env.dist_dst.exists() {
            fs::remove_dir_all(&env.dist_dst).map_err(|e| {
                BuildError::WriteError(format!("Failed to clean {}: {}", env.dist_dst.display(), e))
            })?;
        }

        copy_dir(&env.dist_src, &env.dist_dst)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", env.dist_dst.display(), e)))
    }
}
