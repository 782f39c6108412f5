//! YAML frontmatter handling for markdown content files.
//!
//! Entity and post files start with a header fenced by `---` lines:
//!
//! ```text
//! ---
//! name: "Frodo"
//! authority:
//!   variants: ["Mr. Underhill"]
//! ---
//! Body text...
//! ```

use crate::error::{Result, WorldError};
use serde::de::DeserializeOwned;
use std::path::Path;

const DELIMITER: &str = "---";

/// Split a document into its raw header text and body.
///
/// Without an opening fence on the first line, or without a closing fence,
/// the whole document is body.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return (None, content);
    };
    if first.trim_end() != DELIMITER {
        return (None, content);
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let header = &content[header_start..offset];
            let body = &content[offset + line.len()..];
            return (Some(header), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Return the body of a document with any header removed.
pub fn strip(content: &str) -> &str {
    split(content).1
}

/// Parse the header of a document into `T`, returning it with the body.
///
/// A missing or blank header yields `T::default()`.
pub fn parse<'a, T>(path: &Path, content: &'a str) -> Result<(T, &'a str)>
where
    T: DeserializeOwned + Default,
{
    let (header, body) = split(content);
    let parsed = match header {
        Some(text) if !text.trim().is_empty() => {
            serde_yaml::from_str(text).map_err(|source| WorldError::Frontmatter {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => T::default(),
    };
    Ok((parsed, body))
}
