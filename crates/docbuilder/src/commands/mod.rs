//! CLI command implementations.

pub mod build;
pub mod example_doc;
pub mod helper;
