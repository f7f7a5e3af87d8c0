//! Rendering engine seam.
//!
//! The pipeline is engine-agnostic up to the point where the composed
//! [`SiteConfig`] has to be written in a form the external renderer reads.
//! Each engine names its on-disk layout and renders the config.

mod vitepress;

pub use vitepress::VitePressEngine;

use docbuilder_config::SiteConfig;

/// Errors that can occur while rendering an engine config.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Unsupported engine '{0}': only 'vitepress' is currently available")]
    Unsupported(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// A static-site engine the pipeline can hand a composed config to.
pub trait SiteEngine: Send + Sync {
    /// Engine identifier (e.g., "vitepress")
    fn name(&self) -> &'static str;

    /// Config directory, relative to the doc dir
    fn config_dir(&self) -> &'static str;

    /// Base configuration layer inside the config directory
    fn base_config_file(&self) -> &'static str;

    /// Optional site override layer inside the config directory
    fn override_config_file(&self) -> &'static str;

    /// Rendered config file inside the config directory
    fn output_config_file(&self) -> &'static str;

    /// Build output directory inside the config directory
    fn dist_dir(&self) -> &'static str;

    /// npm script that builds the site
    fn build_script(&self) -> &'static str;

    /// Render a composed config into the engine's config file contents.
    fn render_config(&self, config: &SiteConfig) -> Result<String, EngineError>;
}

/// Look up an engine by name (case-insensitive).
pub fn engine_for(name: &str) -> Result<Box<dyn SiteEngine>, EngineError> {
    match name.trim().to_lowercase().as_str() {
        "vitepress" => Ok(Box::new(VitePressEngine)),
        _ => Err(EngineError::Unsupported(name.to_string())),
    }
}
