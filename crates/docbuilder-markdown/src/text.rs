//! Slug, title and category helpers.

use crate::parser::ParsedDoc;

/// Turn a source file name into a URL slug.
///
/// `DOC_Example_Page.md` with prefix `DOC_` becomes `example-page`.
pub fn build_slug(file_name: &str, prefix: &str) -> String {
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    let stem = if prefix.is_empty() {
        stem
    } else {
        stem.strip_prefix(prefix).unwrap_or(stem)
    };
    stem.replace('_', "-").to_lowercase()
}

/// Normalize a category into a slash-separated path without outer slashes.
/// `.` and blank input become the empty (root) category.
pub fn normalize_category_path(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    let path = path.trim_matches('/');
    if path == "." {
        String::new()
    } else {
        path.to_string()
    }
}

/// Human title for a path segment: `advanced_topics` becomes `Advanced Topics`.
pub fn format_title(input: &str) -> String {
    let replaced = input.replace(['_', '-'], " ");
    let words: Vec<String> = replaced.split_whitespace().map(capitalize).collect();
    if words.is_empty() {
        "Untitled".to_string()
    } else {
        words.join(" ")
    }
}

/// Pick a document title: front matter, then first level-one heading, then
/// the slug.
pub fn derive_title(doc: &ParsedDoc, slug: &str) -> String {
    if let Some(title) = doc.frontmatter.title() {
        return title.to_string();
    }
    if let Some(heading) = doc.first_heading() {
        return heading.to_string();
    }
    format_title(slug)
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
