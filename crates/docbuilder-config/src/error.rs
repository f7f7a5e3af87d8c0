//! Configuration errors.

use std::path::PathBuf;

/// Errors raised while loading, composing or validating a site configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Missing required field `{0}`")]
    MissingRequiredField(&'static str),

    #[error("Malformed link `{link}` at `{field}`: links must be root-relative paths starting with a single `/`")]
    MalformedLink { field: String, link: String },

    #[error("Duplicate sidebar link `{link}` at `{field}`")]
    DuplicateSidebarLink { field: String, link: String },

    #[error("Sidebar placeholder not found, {count} generated entries have nowhere to go")]
    MissingPlaceholder { count: usize },

    #[error("Unresolved sidebar placeholder at `{0}`")]
    UnresolvedPlaceholder(String),
}
