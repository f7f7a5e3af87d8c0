//! Site configuration for doc-builder.
//!
//! A site is declared as two TOML layers: a shared base and a per-site
//! override. This crate merges the layers, splices generated sidebar entries
//! into the typed placeholder, and validates the result before it is handed
//! to a rendering engine.

pub mod compose;
pub mod error;
pub mod merge;
pub mod model;
pub mod placeholder;
pub mod validate;

pub use compose::compose;
pub use error::ConfigError;
pub use merge::merge_json;
pub use model::{
    Marker, NavEntry, PluginOptions, SearchConfig, SearchProvider, SequenceMerge, SidebarEntry,
    SidebarItem, SidebarPlaceholder, SiteConfig, ThemeConfig,
};
pub use placeholder::{substitute, Substituted};
pub use validate::{is_root_relative, validate};
