//! Front matter extraction and parsing.

use std::collections::BTreeMap;

use serde_yaml::Value;

/// Front matter of a markdown document as flat, lower-cased string keys.
///
/// Documents carry free-form metadata (`title`, `category`, `description`,
/// `last_updated`, ...), so values are kept as strings rather than mapped
/// onto a fixed struct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: BTreeMap<String, String>,
}

impl FrontMatter {
    /// Look up a field by name (case-insensitive). Blank values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(&key.to_lowercase())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn category(&self) -> Option<&str> {
        self.get("category")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn from_yaml(value: Value) -> Self {
        let mut fields = BTreeMap::new();

        if let Value::Mapping(map) = value {
            for (key, value) in map {
                let Some(key) = scalar_to_string(&key) else {
                    continue;
                };
                let Some(value) = scalar_to_string(&value) else {
                    continue;
                };
                fields.insert(key.trim().to_lowercase(), value);
            }
        }

        Self { fields }
    }

    /// Line-based `key: value` reading for blocks that are not valid YAML,
    /// such as `title: Kubernetes: Setup`. Splits on the first colon.
    fn from_lines(block: &str) -> Self {
        let fields = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| {
                (
                    key.trim().to_lowercase(),
                    value.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string(),
                )
            })
            .collect();

        Self { fields }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

/// Extract front matter from markdown content.
///
/// Returns the parsed front matter and the remaining content after the block.
/// A document without a leading `---` has empty front matter.
pub fn extract_frontmatter(source: &str) -> Result<(FrontMatter, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((FrontMatter::default(), source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    if yaml_content.is_empty() {
        return Ok((FrontMatter::default(), remaining.trim_start()));
    }

    let frontmatter = match serde_yaml::from_str::<Value>(yaml_content) {
        Ok(value) => FrontMatter::from_yaml(value),
        Err(_) => FrontMatter::from_lines(yaml_content),
    };

    Ok((frontmatter, remaining.trim_start()))
}

/// Errors that can occur when parsing front matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed front matter block - missing closing ---")]
    Unclosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_valid_frontmatter() {
        let source = r#"---
title: This Is Example
category: guides/example
description: Short note describing the purpose of this document.
---

# This Is Example
"#;

        let (fm, content) = extract_frontmatter(source).unwrap();

        assert_eq!(fm.title(), Some("This Is Example"));
        assert_eq!(fm.category(), Some("guides/example"));
        assert_eq!(
            fm.get("description"),
            Some("Short note describing the purpose of this document.")
        );
        assert!(content.starts_with("# This Is Example"));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let source = "---\nTitle: Getting Started\nCategory: guides/intro\n---\n# Body\n";

        let (fm, _) = extract_frontmatter(source).unwrap();

        assert_eq!(fm.title(), Some("Getting Started"));
        assert_eq!(fm.category(), Some("guides/intro"));
        assert_eq!(fm.get("CATEGORY"), Some("guides/intro"));
    }

    #[test]
    fn scalars_become_strings() {
        let source = "---\ntitle: 'Quoted'\norder: 3\ndraft: false\nempty:\ntags: [a, b]\n---\n";

        let (fm, _) = extract_frontmatter(source).unwrap();

        assert_eq!(fm.title(), Some("Quoted"));
        assert_eq!(fm.get("order"), Some("3"));
        assert_eq!(fm.get("draft"), Some("false"));
        assert_eq!(fm.get("empty"), None);
        assert_eq!(fm.get("tags"), None);
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Heading only\n";

        let (fm, content) = extract_frontmatter(source).unwrap();

        assert!(fm.is_empty());
        assert_eq!(content, source);
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let source = "---\ntitle: Test\n# No closing";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn keeps_fields_when_block_is_not_yaml() {
        let source = "---\ntitle: Kubernetes: Setup\ncategory: platform/ops\n# note\nnot a field\nsummary: \"quoted\"\n---\n# Body\n";

        let (fm, content) = extract_frontmatter(source).unwrap();

        assert_eq!(fm.title(), Some("Kubernetes: Setup"));
        assert_eq!(fm.category(), Some("platform/ops"));
        assert_eq!(fm.get("summary"), Some("quoted"));
        assert_eq!(fm.len(), 3);
        assert!(content.starts_with("# Body"));
    }
}
