//! Error types for loading and scanning campaign content.
//!
//! Only structural failures are errors. Validation and extraction findings
//! are returned as data.

use std::path::PathBuf;

/// Main error type for campaign content operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A file or directory could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file or directory could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML header of a file could not be parsed.
    #[error("Malformed frontmatter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A stub header could not be serialized.
    #[error("Failed to serialize frontmatter for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The name matcher for an entity could not be built.
    #[error("Invalid name pattern for entity {slug}: {source}")]
    Pattern {
        slug: String,
        #[source]
        source: regex::Error,
    },
}

impl WorldError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorldError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorldError::Write {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WorldError>;
