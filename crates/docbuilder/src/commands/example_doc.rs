//! Example document generator.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, SecondsFormat};

/// Write `<prefix>this_is_example.md` into `doc_dir`, which must exist.
/// Never overwrites.
pub fn run(doc_dir: &Path, prefix: &str) -> Result<PathBuf> {
    let dir = if doc_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        doc_dir
    };
    let dir = std::path::absolute(dir).context("Unable to resolve directory")?;

    if !dir.exists() {
        bail!("Target directory not found: {}", dir.display());
    }
    if !dir.is_dir() {
        bail!("Target path is not a directory: {}", dir.display());
    }

    let path = dir.join(format!("{prefix}this_is_example.md"));
    if path.exists() {
        bail!("Example file already exists: {}", path.display());
    }

    let created_at = Local::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    fs::write(&path, example_markdown(&created_at))
        .with_context(|| format!("Failed to create example file {}", path.display()))?;

    tracing::info!("Example markdown created at {}", path.display());
    Ok(path)
}

fn example_markdown(created_at: &str) -> String {
    format!(
        r#"---
title: This Is Example
category: guides/example
description: Short note describing the purpose of this document.
last_updated: {created_at}
---

# This Is Example

The front matter at the top defines metadata used by doc-builder:

- "title" is shown in navigation menus and as the page heading.
- "category" determines the folder hierarchy inside the generated site.
- "description" is optional but helps with search and previews.
- "last_updated" can be any string; ISO timestamps work well.

## Writing Content

Start the body with a level-one heading that repeats the title. Continue with
guides, notes, code snippets, and any additional sections your documentation
needs.

## Tips

- Place screenshots and assets next to the markdown file when possible.
- Keep the filename descriptive. doc-builder converts underscores to hyphens
  for links.
- You can add more keys to the front matter if the theme supports them.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbuilder_markdown::{build_slug, derive_title, parse_markdown};

    #[test]
    fn writes_example() {
        let temp = tempfile::tempdir().unwrap();

        let path = run(temp.path(), "DOC_").unwrap();

        assert!(path.ends_with("DOC_this_is_example.md"));
        let content = fs::read_to_string(&path).unwrap();
        let doc = parse_markdown(&content).unwrap();
        assert_eq!(doc.frontmatter.title(), Some("This Is Example"));
        assert_eq!(doc.frontmatter.category(), Some("guides/example"));
        assert!(doc.frontmatter.get("last_updated").is_some());

        let slug = build_slug("DOC_this_is_example.md", "DOC_");
        assert_eq!(slug, "this-is-example");
        assert_eq!(derive_title(&doc, &slug), "This Is Example");
    }

    #[test]
    fn refuses_to_overwrite() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("API_this_is_example.md"), "keep").unwrap();

        let err = run(temp.path(), "API_").unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            fs::read_to_string(temp.path().join("API_this_is_example.md")).unwrap(),
            "keep"
        );
    }

    #[test]
    fn requires_existing_directory() {
        let temp = tempfile::tempdir().unwrap();

        let err = run(&temp.path().join("missing"), "DOC_").unwrap_err();

        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let stamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
        assert!(example_markdown(&stamp).contains(&format!("last_updated: {stamp}")));
    }
}
