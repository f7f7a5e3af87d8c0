//! Documentation site pipeline for doc-builder.
//!
//! Collects prefixed markdown from a source tree, stages it next to the
//! documentation that already exists, composes the site configuration with a
//! generated sidebar and hands the result to a static-site engine.

pub mod builder;
pub mod collect;
pub mod engine;
pub mod environment;
pub mod fsutil;
pub mod npm;
pub mod sidebar;
pub mod templates;

pub use builder::{BuildError, BuildOptions, BuildReport, SiteBuilder};
pub use collect::{MenuRecord, DEFAULT_CATEGORY, MENU_INDEX_FILE};
pub use engine::{engine_for, EngineError, SiteEngine, VitePressEngine};
pub use environment::Environment;
pub use npm::{CommandRunner, SystemRunner};
pub use sidebar::{build_sections, sections_to_sidebar, Section, Subsection};
