//! Documentation discovery.
//!
//! Two sources feed the sidebar: prefixed markdown found anywhere under the
//! search root, and markdown already living in the documentation directory.
//! Both are staged into the temporary workspace and recorded as
//! [`MenuRecord`]s.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use docbuilder_markdown::{
    build_slug, derive_title, normalize_category_path, parse_markdown, ParsedDoc,
};

use crate::builder::BuildError;
use crate::environment::Environment;
use crate::fsutil::{copy_file, same_path, should_skip_directory};

/// Category used for prefixed docs without one in their front matter.
pub const DEFAULT_CATEGORY: &str = "guides";

/// Menu index file written into the temporary workspace.
pub const MENU_INDEX_FILE: &str = ".menu-items.txt";

/// Files in the documentation directory that are never listed.
const UNLISTED_FILES: &[&str] = &["index.md", "DOC_BUILD_README.md"];

/// One sidebar-worthy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRecord {
    /// Slash-separated category, empty for the root
    pub category_path: String,
    pub slug: String,
    pub title: String,
}

impl MenuRecord {
    pub fn new(
        category_path: impl Into<String>,
        slug: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            category_path: category_path.into(),
            slug: slug.into(),
            title: title.into(),
        }
    }

    /// De-duplication key.
    pub fn key(&self) -> String {
        format!("{}|{}", self.category_path, self.slug)
    }

    /// Root-relative link to the page.
    pub fn link(&self) -> String {
        let joined = format!("{}/{}", self.category_path, self.slug);
        format!("/{}", joined.trim_matches('/'))
    }
}

/// Records gathered from one source, plus how many files were read.
#[derive(Debug, Default)]
pub struct Collected {
    pub records: Vec<MenuRecord>,
    pub files: usize,
}

/// A source file read and parsed, waiting to be staged.
struct SourceDoc {
    path: PathBuf,
    content: String,
    doc: ParsedDoc,
}

/// Scan the search root for `<prefix>*.md` files and stage them under
/// `<temp>/<category>/<slug>.md`.
pub fn collect_prefixed(
    env: &Environment,
    prefix: &str,
    seen: &mut HashSet<String>,
) -> Result<Collected, BuildError> {
    tracing::debug!(
        "[2/7] Scanning {} for files starting with {}",
        env.search_root.display(),
        prefix
    );

    let temp_dir = env.temp_dir.clone();
    let walker = WalkDir::new(&env.search_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !(should_skip_directory(&entry_name(e)) || same_path(e.path(), &temp_dir))
        });

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
        let name = entry_name(&entry);
        if entry.file_type().is_file() && is_markdown(entry.path()) && name.starts_with(prefix) {
            paths.push(entry.into_path());
        }
    }

    let docs = read_all(&paths)?;
    let mut collected = Collected {
        records: Vec::new(),
        files: docs.len(),
    };

    for source in docs {
        let file_name = source
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let category = normalize_category_path(
            source
                .doc
                .frontmatter
                .category()
                .unwrap_or(DEFAULT_CATEGORY),
        );
        let slug = build_slug(&file_name, prefix);
        let title = derive_title(&source.doc, &slug);

        let target = env
            .temp_dir
            .join(category_dir(&category))
            .join(format!("{slug}.md"));
        write_staged(&target, &source.content)?;
        tracing::debug!(
            "  collected {} -> {}",
            source.path.display(),
            target.display()
        );

        let record = MenuRecord::new(category, slug, title);
        if seen.insert(record.key()) {
            collected.records.push(record);
        }
    }

    Ok(collected)
}

/// Stage markdown that already lives in the documentation directory, keeping
/// its relative layout. A root `index.md` is staged but not listed.
pub fn collect_existing(
    env: &Environment,
    temp_dir_name: &str,
    seen: &mut HashSet<String>,
) -> Result<Collected, BuildError> {
    tracing::debug!(
        "[3/7] Merging existing documentation from {}",
        env.doc_dir.display()
    );

    let skipped: [&str; 3] = [temp_dir_name, ".vitepress", "node_modules"];
    let walker = WalkDir::new(&env.doc_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| {
            e.depth() == 0 || !e.file_type().is_dir() || !skipped.contains(&entry_name(e).as_str())
        });

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        let rel = relative_slash(entry.path(), &env.doc_dir);
        if UNLISTED_FILES.contains(&rel.as_str()) {
            continue;
        }
        paths.push(entry.into_path());
    }

    let docs = read_all(&paths)?;
    let mut collected = Collected {
        records: Vec::new(),
        files: docs.len(),
    };

    for source in docs {
        let rel = relative_slash(&source.path, &env.doc_dir);
        let (parent, file_name) = rel.rsplit_once('/').unwrap_or(("", rel.as_str()));
        let category = normalize_category_path(parent);
        let slug = file_name.strip_suffix(".md").unwrap_or(file_name).to_string();

        let mut title = derive_title(&source.doc, &slug);
        if slug == "index" {
            title = format!("{title} (overview)");
        }

        write_staged(&env.temp_dir.join(&rel), &source.content)?;
        tracing::debug!("  merged {}", rel);

        let record = MenuRecord::new(category, slug, title);
        if seen.insert(record.key()) {
            collected.records.push(record);
        }
    }

    let index = env.doc_dir.join("index.md");
    if index.is_file() {
        copy_file(&index, &env.temp_dir.join("index.md"))
            .map_err(|e| BuildError::WriteError(format!("{}: {}", index.display(), e)))?;
    }

    Ok(collected)
}

/// Write `<temp>/.menu-items.txt`, one `category|slug|title` line per record.
pub fn write_menu_index(temp_dir: &Path, records: &[MenuRecord]) -> Result<PathBuf, BuildError> {
    let path = temp_dir.join(MENU_INDEX_FILE);
    let content: String = records
        .iter()
        .map(|r| format!("{}|{}|{}\n", r.category_path, r.slug, r.title))
        .collect();

    fs::write(&path, content)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))?;
    Ok(path)
}

/// Read and parse files in parallel, preserving input order.
fn read_all(paths: &[PathBuf]) -> Result<Vec<SourceDoc>, BuildError> {
    paths
        .par_iter()
        .map(|path| -> Result<SourceDoc, BuildError> {
            let content = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;
            let doc = parse_markdown(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring front matter of {}: {}", path.display(), e);
                ParsedDoc::body_only(&content)
            });
            Ok(SourceDoc {
                path: path.clone(),
                content,
                doc,
            })
        })
        .collect()
}

fn write_staged(target: &Path, content: &str) -> Result<(), BuildError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", parent.display(), e)))?;
    }
    fs::write(target, content)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().to_string()
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}

fn category_dir(category: &str) -> PathBuf {
    category.split('/').filter(|s| !s.is_empty()).collect()
}

fn relative_slash(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}
