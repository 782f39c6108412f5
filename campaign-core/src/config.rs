//! Content layout configuration.

use std::path::{Path, PathBuf};

/// Default location of blog posts, relative to the site root.
pub const DEFAULT_POSTS_DIR: &str = "src/content/posts";

/// Default location of the entity database, relative to the site root.
pub const DEFAULT_ENTITIES_DIR: &str = "src/content/campaign";

/// Where posts and entities live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldConfig {
    /// Flat directory of post markdown files.
    pub posts_dir: PathBuf,
    /// Root holding one subdirectory per entity category.
    pub entities_dir: PathBuf,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from(DEFAULT_POSTS_DIR),
            entities_dir: PathBuf::from(DEFAULT_ENTITIES_DIR),
        }
    }
}

impl WorldConfig {
    /// Create a configuration for an explicit layout.
    pub fn new(posts_dir: impl Into<PathBuf>, entities_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            entities_dir: entities_dir.into(),
        }
    }

    /// Use the default layout below a site root.
    pub fn for_site_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(root.join(DEFAULT_POSTS_DIR), root.join(DEFAULT_ENTITIES_DIR))
    }

    /// Set the posts directory.
    pub fn with_posts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.posts_dir = dir.into();
        self
    }

    /// Set the entity root directory.
    pub fn with_entities_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.entities_dir = dir.into();
        self
    }
}
