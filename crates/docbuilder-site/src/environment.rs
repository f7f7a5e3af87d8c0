//! Resolved paths for one build.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::{BuildError, BuildOptions};
use crate::engine::SiteEngine;
use crate::fsutil::{absolute, ensure_gitignore};

/// Absolute locations used by the pipeline, derived from the options and the
/// engine's layout.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Documentation workspace
    pub doc_dir: PathBuf,

    /// Root scanned for prefixed markdown
    pub search_root: PathBuf,

    /// Scratch workspace inside the doc dir
    pub temp_dir: PathBuf,

    /// Base configuration layer (required)
    pub base_config: PathBuf,

    /// Site override layer (optional)
    pub override_config: PathBuf,

    /// Rendered engine config in the doc dir
    pub output_config: PathBuf,

    /// Rendered engine config in the temp dir
    pub temp_config: PathBuf,

    /// Engine output inside the temp dir
    pub dist_src: PathBuf,

    /// Published output inside the doc dir
    pub dist_dst: PathBuf,
}

impl Environment {
    /// Resolve and check every path the build needs.
    pub fn prepare(options: &BuildOptions, engine: &dyn SiteEngine) -> Result<Self, BuildError> {
        options.validate()?;

        let doc_dir = absolute(&options.doc_dir).map_err(|e| {
            BuildError::ReadError(format!("Failed to resolve documentation directory: {e}"))
        })?;
        let search_root = absolute(&options.search_path)
            .map_err(|e| BuildError::ReadError(format!("Failed to resolve search path: {e}")))?;

        if !doc_dir.is_dir() {
            return Err(BuildError::NotFound(format!(
                "documentation directory not found: {}",
                doc_dir.display()
            )));
        }
        if !search_root.exists() {
            return Err(BuildError::NotFound(format!(
                "search path not found: {}",
                search_root.display()
            )));
        }

        let config_dir = doc_dir.join(engine.config_dir());
        let temp_dir = doc_dir.join(&options.temp_dir_name);
        let temp_config_dir = temp_dir.join(engine.config_dir());

        let env = Self {
            base_config: config_dir.join(engine.base_config_file()),
            override_config: config_dir.join(engine.override_config_file()),
            output_config: config_dir.join(engine.output_config_file()),
            temp_config: temp_config_dir.join(engine.output_config_file()),
            dist_src: temp_config_dir.join(engine.dist_dir()),
            dist_dst: config_dir.join(engine.dist_dir()),
            doc_dir,
            search_root,
            temp_dir,
        };

        require_file(&env.base_config)?;
        require_file(&env.package_json())?;

        Ok(env)
    }

    pub fn package_json(&self) -> PathBuf {
        self.doc_dir.join("package.json")
    }

    /// Recreate an empty temp dir containing only a `.gitignore`.
    pub fn prepare_workspace(&self) -> Result<(), BuildError> {
        tracing::debug!(
            "[1/7] Cleaning temporary directory {}",
            self.temp_dir.display()
        );

        if self.temp_dir.exists() {
            fs::remove_dir_all(&self.temp_dir).map_err(|e| {
                BuildError::WriteError(format!(
                    "Failed to clean temporary directory {}: {}",
                    self.temp_dir.display(),
                    e
                ))
            })?;
        }
        fs::create_dir_all(&self.temp_dir).map_err(|e| {
            BuildError::WriteError(format!(
                "Failed to create temporary directory {}: {}",
                self.temp_dir.display(),
                e
            ))
        })?;
        ensure_gitignore(&self.temp_dir).map_err(|e| {
            BuildError::WriteError(format!(
                "Failed to initialise {}: {}",
                self.temp_dir.join(".gitignore").display(),
                e
            ))
        })
    }
}

fn require_file(path: &Path) -> Result<(), BuildError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(BuildError::NotFound(format!(
            "expected file not found: {}",
            path.display()
        )))
    }
}
