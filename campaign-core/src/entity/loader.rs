//! Entity database loading and lookup.

use super::pronouns::infer_pronouns;
use super::{Entity, EntityType};
use crate::error::{Result, WorldError};
use crate::frontmatter;
use crate::posts::markdown_files;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Category directories in the order they are loaded.
///
/// A slug present in more than one directory resolves to the last one loaded.
const LOAD_ORDER: [EntityType; 5] = [
    EntityType::Character,
    EntityType::Enemy,
    EntityType::Location,
    EntityType::Faction,
    EntityType::Item,
];

/// The slice of an entity file's header that the loader reads.
#[derive(Debug, Default, Deserialize)]
struct EntityHeader {
    name: Option<String>,
    #[serde(rename = "type")]
    entity_type: Option<String>,
    subtype: Option<String>,
    authority: Option<Authority>,
}

#[derive(Debug, Default, Deserialize)]
struct Authority {
    #[serde(default)]
    variants: Vec<String>,
}

/// Loaded entities, keyed by slug, with a case-insensitive name index.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    /// All entities by slug.
    entities: BTreeMap<String, Entity>,
    /// Lowercased name or variant to slug.
    name_index: HashMap<String, String>,
}

impl EntityIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity, returning the one it replaced if the slug was taken.
    ///
    /// Names are last write wins: a replaced entity's names are dropped, even
    /// where an earlier entity under another slug shared one of them.
    pub fn insert(&mut self, entity: Entity) -> Option<Entity> {
        let slug = entity.slug.clone();
        let previous = self.entities.remove(&slug);
        if let Some(ref old) = previous {
            for variant in &old.variants {
                let key = variant.to_lowercase();
                if self.name_index.get(&key) == Some(&slug) {
                    self.name_index.remove(&key);
                }
            }
        }

        // Index by lowercase name and every variant
        self.name_index.insert(entity.name.to_lowercase(), slug.clone());
        for variant in &entity.variants {
            self.name_index.insert(variant.to_lowercase(), slug.clone());
        }

        self.entities.insert(slug, entity);
        previous
    }

    /// Get an entity by slug.
    pub fn get(&self, slug: &str) -> Option<&Entity> {
        self.entities.get(slug)
    }

    /// Check whether a slug is loaded.
    pub fn contains_slug(&self, slug: &str) -> bool {
        self.entities.contains_key(slug)
    }

    /// Find an entity by name or variant (case-insensitive exact match).
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        self.name_index
            .get(&name.to_lowercase())
            .and_then(|slug| self.entities.get(slug))
    }

    /// Every lowercased name and variant.
    pub fn known_names(&self) -> HashSet<String> {
        self.name_index.keys().cloned().collect()
    }

    /// Iterate entities in slug order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Get all entities of a specific type.
    pub fn of_type(&self, entity_type: EntityType) -> Vec<&Entity> {
        self.iter()
            .filter(|e| e.entity_type == entity_type)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<Entity> for EntityIndex {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut index = EntityIndex::new();
        for entity in iter {
            index.insert(entity);
        }
        index
    }
}

/// Load every entity below `root`.
///
/// Missing category directories (or a missing root) are skipped. Unreadable
/// files and malformed headers abort the load.
pub fn load_entities(root: &Path) -> Result<EntityIndex> {
    let mut index = EntityIndex::new();

    for dir_type in LOAD_ORDER {
        let dir = root.join(dir_type.category());
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "skipping missing entity directory");
            continue;
        }

        for path in markdown_files(&dir)? {
            let entity = load_entity_file(&path, dir_type)?;
            debug!(slug = %entity.slug, entity_type = %entity.entity_type, "loaded entity");
            if let Some(previous) = index.insert(entity) {
                debug!(
                    slug = %previous.slug,
                    replaced = %previous.source_path.display(),
                    "duplicate entity slug, keeping the later file"
                );
            }
        }
    }

    info!(count = index.len(), root = %root.display(), "loaded entity database");
    Ok(index)
}

/// Load a single entity file, falling back to `dir_type` when the header has
/// no usable `type`.
pub fn load_entity_file(path: &Path, dir_type: EntityType) -> Result<Entity> {
    let content = fs::read_to_string(path).map_err(|e| WorldError::read(path, e))?;
    let (header, body) = frontmatter::parse::<EntityHeader>(path, &content)?;

    let slug = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = header
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| slug.clone());

    let entity_type = match header.entity_type.as_deref() {
        Some(raw) => raw.parse::<EntityType>().unwrap_or_else(|err| {
            warn!(path = %path.display(), %err, fallback = %dir_type, "unrecognised entity type");
            dir_type
        }),
        None => dir_type,
    };

    let mut variants = vec![name.clone()];
    if let Some(authority) = header.authority {
        variants.extend(authority.variants);
    }

    let mut entity = Entity::with_variants(slug, name, entity_type, variants)?
        .with_source_path(path);
    entity.subtype = header.subtype;
    entity.pronouns = infer_pronouns(body);
    Ok(entity)
}
