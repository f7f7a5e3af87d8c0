//! Markdown metadata for doc-builder.
//!
//! Extracts YAML front matter and headings from documentation sources, and
//! derives the slugs, titles and category paths used to place each document
//! in the generated site.

pub mod frontmatter;
pub mod parser;
pub mod text;

pub use frontmatter::{extract_frontmatter, FrontMatter, FrontmatterError};
pub use parser::{parse_markdown, Heading, ParseError, ParsedDoc};
pub use text::{build_slug, derive_title, format_title, normalize_category_path};
