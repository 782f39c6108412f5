//! Testing utilities for campaign content.
//!
//! `WorldFixture` lays out a throwaway site in a temporary directory so tests
//! can exercise the loader, validator and extractor against real files.
//!
//! ```ignore
//! let world = WorldFixture::new()?;
//! world.entity(EntityType::Character, "frodo", &entity_doc("Frodo", &[], "He is a hobbit."))?;
//! world.post("day-one.md", "**Frodo** left the Shire.")?;
//! let result = world.validate()?;
//! ```

use crate::config::WorldConfig;
use crate::entity::EntityType;
use crate::error::{Result, WorldError};
use crate::extract::{extract_entities, ExtractionResult};
use crate::validate::{validate_world, ValidationResult};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary posts directory and entity root.
pub struct WorldFixture {
    dir: TempDir,
}

impl WorldFixture {
    /// Create an empty fixture. Neither directory exists until something is written.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().map_err(|e| WorldError::write(std::env::temp_dir(), e))?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.root().join("posts")
    }

    pub fn entities_dir(&self) -> PathBuf {
        self.root().join("campaign")
    }

    pub fn config(&self) -> WorldConfig {
        WorldConfig::new(self.posts_dir(), self.entities_dir())
    }

    /// Path an entity file of this type and slug lives at.
    pub fn entity_path(&self, entity_type: EntityType, slug: &str) -> PathBuf {
        self.entities_dir()
            .join(entity_type.category())
            .join(format!("{slug}.md"))
    }

    /// Write an entity file with raw content.
    pub fn entity(&self, entity_type: EntityType, slug: &str, content: &str) -> Result<PathBuf> {
        let path = self.entity_path(entity_type, slug);
        write_file(&path, content)?;
        Ok(path)
    }

    /// Write a post with a minimal header in front of `body`.
    pub fn post(&self, file_name: &str, body: &str) -> Result<PathBuf> {
        let path = self.posts_dir().join(file_name);
        let title = file_name.trim_end_matches(".md");
        write_file(&path, &format!("---\ntitle: \"{title}\"\n---\n{body}"))?;
        Ok(path)
    }

    /// Validate the fixture's posts.
    pub fn validate(&self) -> Result<ValidationResult> {
        validate_world(&self.posts_dir(), &self.entities_dir())
    }

    /// Run extraction over the fixture's posts.
    pub fn extract(&self) -> Result<ExtractionResult> {
        extract_entities(&self.posts_dir(), &self.entities_dir())
    }
}

/// Build an entity document with a name, aliases and prose body.
pub fn entity_doc(name: &str, variants: &[&str], body: &str) -> String {
    // JSON strings are valid YAML scalars
    let quote = |s: &str| serde_json::Value::from(s).to_string();
    let mut doc = format!("---\nname: {}\n", quote(name));
    if !variants.is_empty() {
        let list = variants.iter().map(|v| quote(v)).collect::<Vec<_>>().join(", ");
        doc.push_str(&format!("authority:\n  variants: [{list}]\n"));
    }
    doc.push_str("---\n");
    doc.push_str(body);
    doc
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| WorldError::write(parent, e))?;
    }
    fs::write(path, content).map_err(|e| WorldError::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::load_entities;

    #[test]
    fn test_entity_doc_round_trips_through_loader() {
        let world = WorldFixture::new().unwrap();
        world
            .entity(
                EntityType::Character,
                "bilbo",
                &entity_doc("Bilbo \"Burglar\" Baggins", &["Mr. Baggins"], "He wrote a book."),
            )
            .unwrap();

        let index = load_entities(&world.entities_dir()).unwrap();
        let bilbo = index.get("bilbo").unwrap();
        assert_eq!(bilbo.name, "Bilbo \"Burglar\" Baggins");
        assert_eq!(bilbo.variants[1], "Mr. Baggins");
    }

    #[test]
    fn test_empty_fixture_runs() {
        let world = WorldFixture::new().unwrap();
        let result = world.validate().unwrap();
        assert!(result.valid);
        assert_eq!(result.stats.files_checked, 0);
    }
}
