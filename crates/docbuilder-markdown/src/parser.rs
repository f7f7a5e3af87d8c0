//! Markdown document parser.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::frontmatter::{extract_frontmatter, FrontMatter, FrontmatterError};

/// A parsed markdown document.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed front matter (empty if absent)
    pub frontmatter: FrontMatter,

    /// Markdown content (without front matter)
    pub content: String,

    /// Headings in document order
    pub headings: Vec<Heading>,
}

impl ParsedDoc {
    /// Treat the whole source as body, ignoring any front matter block.
    ///
    /// Used when the front matter is malformed but the document should still
    /// be published.
    pub fn body_only(source: &str) -> Self {
        Self {
            frontmatter: FrontMatter::default(),
            content: source.to_string(),
            headings: collect_headings(source),
        }
    }

    /// Text of the first level-one heading.
    pub fn first_heading(&self) -> Option<&str> {
        self.headings
            .iter()
            .find(|h| h.level == 1)
            .map(|h| h.title.as_str())
            .filter(|t| !t.is_empty())
    }
}

/// A heading in the document body.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Heading text
    pub title: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Errors that can occur when parsing a document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Front matter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Parse a markdown document into front matter, body and headings.
pub fn parse_markdown(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        headings: collect_headings(content),
    })
}

fn collect_headings(content: &str) -> Vec<Heading> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let mut headings = Vec::new();
    let mut current: Option<(u8, String)> = None; // (level, text)

    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level as u8, String::new()));
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some((_, ref mut heading_text)) = current {
                    heading_text.push_str(&text);
                }
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, title)) = current.take() {
                    headings.push(Heading {
                        title: title.trim().to_string(),
                        level,
                    });
                }
            }

            _ => {}
        }
    }

    headings
}
