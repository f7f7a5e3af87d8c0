//! Filesystem helpers shared by the pipeline steps.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

/// Directories never scanned for documentation.
const SKIPPED_DIRS: &[&str] = &["node_modules", "vendor", ".git", ".hg", ".svn"];

pub fn should_skip_directory(name: &str) -> bool {
    SKIPPED_DIRS.contains(&name)
}

/// Lexically normalize a path: drop `.` and resolve `..` against the
/// preceding component. Does not touch the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

pub fn same_path(a: &Path, b: &Path) -> bool {
    clean_path(a) == clean_path(b)
}

/// Absolute, cleaned form of `path`, relative to the working directory.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    Ok(clean_path(&std::path::absolute(path)?))
}

/// Mark a scratch directory as ignored by git.
pub fn ensure_gitignore(dir: &Path) -> io::Result<()> {
    fs::write(dir.join(".gitignore"), "*\n!.gitignore\n")
}

/// Copy a file, creating the destination's parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

/// Recursively copy a directory tree.
pub fn copy_dir(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}
