//! Campaign entities and the entity database loader.
//!
//! Entities live under an entity root with one directory per category:
//!
//! ```text
//! campaign/
//! ├── characters/frodo.md
//! ├── enemies/
//! ├── factions/
//! ├── items/
//! └── locations/
//! ```
//!
//! The file stem is the entity's slug. The YAML header supplies the display
//! name, type, subtype and `authority.variants` aliases; the body is free prose
//! from which the entity's pronouns are inferred.

mod loader;
mod pronouns;

pub use loader::{load_entities, load_entity_file, EntityIndex};
pub use pronouns::{infer_pronouns, PossessivePronoun, Pronouns, SubjectPronoun};

use crate::error::{Result, WorldError};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Categories of campaign entities.
///
/// The declaration order is significant: it breaks ties when classifying
/// mentions by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Character,
    Location,
    Faction,
    Item,
    Enemy,
}

impl EntityType {
    /// All types in tie-break order.
    pub const ALL: [EntityType; 5] = [
        EntityType::Character,
        EntityType::Location,
        EntityType::Faction,
        EntityType::Item,
        EntityType::Enemy,
    ];

    /// Singular name, as used in frontmatter `type` fields.
    pub fn name(&self) -> &'static str {
        match self {
            EntityType::Character => "character",
            EntityType::Location => "location",
            EntityType::Faction => "faction",
            EntityType::Item => "item",
            EntityType::Enemy => "enemy",
        }
    }

    /// Plural name, used for directories and `/campaign/{category}/` links.
    pub fn category(&self) -> &'static str {
        match self {
            EntityType::Character => "characters",
            EntityType::Location => "locations",
            EntityType::Faction => "factions",
            EntityType::Item => "items",
            EntityType::Enemy => "enemies",
        }
    }

    /// Look up a type by its plural category name.
    pub fn from_category(category: &str) -> Option<EntityType> {
        Self::ALL.into_iter().find(|t| t.category() == category)
    }

    /// Subtype written into generated stubs.
    pub fn default_subtype(&self) -> &'static str {
        match self {
            EntityType::Character => "npc",
            EntityType::Location => "landmark",
            EntityType::Faction => "guild",
            EntityType::Item => "wondrous",
            EntityType::Enemy => "creature",
        }
    }

    /// Site path for an entity of this type.
    pub fn link_path(&self, slug: &str) -> String {
        format!("/campaign/{}/{}", self.category(), slug)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a string names no entity type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown entity type: {0}")]
pub struct UnknownEntityType(pub String);

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        EntityType::ALL
            .into_iter()
            .find(|t| t.name() == lower || t.category() == lower)
            .ok_or_else(|| UnknownEntityType(s.to_string()))
    }
}

/// A campaign-world subject loaded from the entity database.
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    /// Unique identifier, the file stem.
    pub slug: String,
    /// Canonical display name.
    pub name: String,
    /// What kind of entity this is.
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Free-form classifier (npc, tavern, guild...).
    pub subtype: Option<String>,
    /// Canonical name followed by every alias.
    pub variants: Vec<String>,
    /// Pronouns inferred from the entity's own prose.
    pub pronouns: Option<Pronouns>,
    /// File this entity was loaded from.
    pub source_path: PathBuf,
    #[serde(skip)]
    matcher: Option<Regex>,
}

impl Entity {
    /// Create an entity whose only variant is its name.
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        entity_type: EntityType,
    ) -> Result<Self> {
        let name = name.into();
        Self::with_variants(slug, name.clone(), entity_type, vec![name])
    }

    /// Create an entity from an explicit variant list.
    ///
    /// Empty variants are dropped before the name matcher is compiled.
    pub fn with_variants(
        slug: impl Into<String>,
        name: impl Into<String>,
        entity_type: EntityType,
        variants: Vec<String>,
    ) -> Result<Self> {
        let slug = slug.into();
        let variants: Vec<String> = variants
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .collect();
        let matcher = build_matcher(&slug, &variants)?;
        Ok(Self {
            slug,
            name: name.into(),
            entity_type,
            subtype: None,
            variants,
            pronouns: None,
            source_path: PathBuf::new(),
            matcher,
        })
    }

    /// Set the subtype.
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Set the inferred pronouns.
    pub fn with_pronouns(mut self, pronouns: Pronouns) -> Self {
        self.pronouns = Some(pronouns);
        self
    }

    /// Set the file this entity came from.
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Check whether any variant appears in `text` as whole words, ignoring case.
    pub fn is_named_in(&self, text: &str) -> bool {
        self.matcher.as_ref().is_some_and(|m| m.is_match(text))
    }

    /// Site path for this entity.
    pub fn link_path(&self) -> String {
        self.entity_type.link_path(&self.slug)
    }

    /// The subject pronoun, if any was inferred.
    pub fn subject_pronoun(&self) -> Option<SubjectPronoun> {
        self.pronouns.map(|p| p.subject)
    }
}

fn build_matcher(slug: &str, variants: &[String]) -> Result<Option<Regex>> {
    if variants.is_empty() {
        return Ok(None);
    }
    let alternation = variants
        .iter()
        .map(|v| regex::escape(v.trim()))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|source| WorldError::Pattern {
            slug: slug.to_string(),
            source,
        })
}
