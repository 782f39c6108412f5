//! Blog post discovery and reading.

use crate::error::{Result, WorldError};
use crate::frontmatter;
use std::fs;
use std::path::{Path, PathBuf};

/// Markdown files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub(crate) fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| WorldError::read(dir, e))? {
        let entry = entry.map_err(|e| WorldError::read(dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// List the posts in a posts directory (non-recursive).
pub fn list_posts(dir: &Path) -> Result<Vec<PathBuf>> {
    markdown_files(dir)
}

/// A post with its header stripped.
#[derive(Debug, Clone)]
pub struct Post {
    /// Where the post was read from.
    pub path: PathBuf,
    /// Markdown body after the header.
    pub body: String,
}

impl Post {
    /// Build a post from in-memory content.
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            body: frontmatter::strip(content).to_string(),
        }
    }

    /// Read a post from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| WorldError::read(path, e))?;
        Ok(Self::from_content(path, &content))
    }

    /// Body lines, numbered from 1.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.body.lines().enumerate().map(|(i, line)| (i + 1, line))
    }
}
