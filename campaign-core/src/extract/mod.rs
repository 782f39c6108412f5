//! Extraction of entity candidates from bold mentions in posts.
//!
//! Every plain (unlinked) bold span in every post is slugified and grouped.
//! Groups that match a known entity name, variant or slug are reported as
//! existing; the rest are missing entities, ranked by how often they are
//! mentioned, each with a guessed type taken from the surrounding line.

pub mod heuristics;
mod stub;

pub use stub::{create_missing_entities, render_stub, stub_path, StubOutcome};

use crate::entity::{load_entities, EntityIndex, EntityType};
use crate::error::Result;
use crate::markdown::scan_mentions;
use crate::posts::{list_posts, Post};
use crate::slug::slugify;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Uppercase spans longer than this are treated as shouting, not names.
const MAX_UPPERCASE_NAME_LEN: usize = 3;

/// Spans shorter than this are ignored.
const MIN_MENTION_LEN: usize = 2;

/// One place a candidate was mentioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionOccurrence {
    /// Post containing the mention.
    pub file: PathBuf,
    /// 1-based line within the post body.
    pub line: usize,
    /// The full source line.
    pub context: String,
}

/// All mentions across all posts that share a slug.
#[derive(Debug, Clone, Serialize)]
pub struct MentionedEntity {
    /// Display text of the first mention.
    pub name: String,
    pub slug: String,
    /// Occurrences in scan order.
    pub mentions: Vec<MentionOccurrence>,
    /// Type guessed from the first context that gave any signal.
    pub suggested_type: Option<EntityType>,
    /// A loaded entity already matches by name, variant or slug.
    pub exists: bool,
}

impl MentionedEntity {
    pub fn mention_count(&self) -> usize {
        self.mentions.len()
    }

    /// Type a stub for this candidate would get.
    pub fn stub_type(&self) -> EntityType {
        self.suggested_type.unwrap_or(EntityType::Character)
    }
}

/// Summary counts for an extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub files_scanned: usize,
    pub entities_loaded: usize,
    /// Every bold span seen, linked or not.
    pub mentions_scanned: usize,
    /// Bold spans wrapping a link.
    pub linked_skipped: usize,
    /// Plain spans dropped as headings, numbers or noise.
    pub filtered: usize,
    /// Distinct slugs among the remaining spans.
    pub unique_mentions: usize,
    pub existing: usize,
    pub missing: usize,
}

/// Outcome of an extraction run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Slugs of mentions that resolve to a loaded entity, first-seen order.
    pub existing: Vec<String>,
    /// Unresolved candidates, most mentioned first.
    pub missing: Vec<MentionedEntity>,
    pub stats: ExtractionStats,
}

impl ExtractionResult {
    /// Find a missing candidate by slug.
    pub fn missing_entity(&self, slug: &str) -> Option<&MentionedEntity> {
        self.missing.iter().find(|m| m.slug == slug)
    }
}

/// Whether a plain bold span could name an entity.
pub fn is_candidate(text: &str) -> bool {
    let text = text.trim();
    let len = text.chars().count();
    if len < MIN_MENTION_LEN {
        return false;
    }
    if text.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if len > MAX_UPPERCASE_NAME_LEN && text == text.to_uppercase() {
        return false;
    }
    !slugify(text).is_empty()
}

/// Folds the mentions of many posts into slug-keyed candidates.
pub struct MentionCollector {
    known_names: HashSet<String>,
    known_slugs: HashSet<String>,
    groups: Vec<MentionedEntity>,
    by_slug: HashMap<String, usize>,
    stats: ExtractionStats,
}

impl MentionCollector {
    /// Create a collector that resolves against `entities`.
    pub fn new(entities: &EntityIndex) -> Self {
        Self {
            known_names: entities.known_names(),
            known_slugs: entities.iter().map(|e| e.slug.clone()).collect(),
            groups: Vec::new(),
            by_slug: HashMap::new(),
            stats: ExtractionStats {
                entities_loaded: entities.len(),
                ..Default::default()
            },
        }
    }

    /// Add the mentions of one post.
    pub fn scan_post(&mut self, post: &Post) {
        self.stats.files_scanned += 1;
        let lines: Vec<&str> = post.body.lines().collect();

        for mention in scan_mentions(&post.body) {
            self.stats.mentions_scanned += 1;
            if mention.is_linked {
                self.stats.linked_skipped += 1;
                continue;
            }
            if !is_candidate(&mention.text) {
                self.stats.filtered += 1;
                continue;
            }

            let slug = slugify(&mention.text);
            let context = lines.get(mention.line - 1).copied().unwrap_or_default();
            let exists = self.known_names.contains(&mention.text.to_lowercase())
                || self.known_slugs.contains(&slug);

            let idx = match self.by_slug.get(&slug) {
                Some(&idx) => idx,
                None => {
                    self.groups.push(MentionedEntity {
                        name: mention.text.clone(),
                        slug: slug.clone(),
                        mentions: Vec::new(),
                        suggested_type: None,
                        exists: false,
                    });
                    self.by_slug.insert(slug, self.groups.len() - 1);
                    self.groups.len() - 1
                }
            };

            let group = &mut self.groups[idx];
            group.exists |= exists;
            if group.suggested_type.is_none() {
                group.suggested_type = heuristics::classify(context);
            }
            group.mentions.push(MentionOccurrence {
                file: post.path.clone(),
                line: mention.line,
                context: context.to_string(),
            });
        }
    }

    /// Partition the collected candidates into existing and missing.
    pub fn finish(self) -> ExtractionResult {
        let mut stats = self.stats;
        stats.unique_mentions = self.groups.len();

        let (existing, mut missing): (Vec<_>, Vec<_>) =
            self.groups.into_iter().partition(|g| g.exists);
        // stable: equal counts keep first-seen order
        missing.sort_by(|a, b| b.mention_count().cmp(&a.mention_count()));

        stats.existing = existing.len();
        stats.missing = missing.len();
        ExtractionResult {
            existing: existing.into_iter().map(|g| g.slug).collect(),
            missing,
            stats,
        }
    }
}

/// Scan every post in `posts_dir` for bold mentions with no entity under `entities_dir`.
pub fn extract_entities(posts_dir: &Path, entities_dir: &Path) -> Result<ExtractionResult> {
    let entities = load_entities(entities_dir)?;
    let mut collector = MentionCollector::new(&entities);

    for path in list_posts(posts_dir)? {
        let post = Post::read(&path)?;
        collector.scan_post(&post);
        debug!(post = %path.display(), "scanned post for mentions");
    }

    let result = collector.finish();
    info!(
        files = result.stats.files_scanned,
        existing = result.stats.existing,
        missing = result.stats.missing,
        "entity extraction finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;

    fn collect(posts: &[(&str, &str)], entities: Vec<Entity>) -> ExtractionResult {
        let index: EntityIndex = entities.into_iter().collect();
        let mut collector = MentionCollector::new(&index);
        for (name, body) in posts {
            collector.scan_post(&Post::from_content(*name, body));
        }
        collector.finish()
    }

    #[test]
    fn test_candidate_filter() {
        assert!(is_candidate("Radagast"));
        assert!(is_candidate("Bo"));
        assert!(is_candidate("ORC"));
        assert!(!is_candidate("WARNING"));
        assert!(!is_candidate("1492"));
        assert!(!is_candidate("X"));
        assert!(!is_candidate("?!"));
    }

    #[test]
    fn test_groups_across_posts() {
        let result = collect(
            &[
                ("one.md", "**Radagast** said he likes birds."),
                ("two.md", "Later, **radagast** returned."),
            ],
            vec![],
        );
        assert_eq!(result.missing.len(), 1);
        let radagast = &result.missing[0];
        assert_eq!(radagast.name, "Radagast");
        assert_eq!(radagast.mention_count(), 2);
        assert!(!radagast.exists);
        assert_eq!(radagast.mentions[1].file, PathBuf::from("two.md"));
        assert_eq!(radagast.mentions[1].context, "Later, **radagast** returned.");
    }

    #[test]
    fn test_suggested_type_fixed_at_first_signal() {
        let result = collect(
            &[(
                "p.md",
                "**Glamdring** was quiet.\nHe wielded **Glamdring**, an ancient blade.\nThe wizard **Glamdring** said hello.",
            )],
            vec![],
        );
        let glamdring = result.missing_entity("glamdring").unwrap();
        assert_eq!(glamdring.suggested_type, Some(EntityType::Item));
        assert_eq!(glamdring.mention_count(), 3);
    }

    #[test]
    fn test_missing_sorted_by_count() {
        let result = collect(
            &[(
                "p.md",
                "**Alpha** and **Beta**\n**Beta** again\n**Gamma** once",
            )],
            vec![],
        );
        let slugs: Vec<_> = result.missing.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(slugs, vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn test_existing_by_name_variant_and_slug() {
        let result = collect(
            &[(
                "p.md",
                "**Strider** met **[Frodo](/campaign/characters/frodo)** and **Mr. Underhill** near **the-shire**.",
            )],
            vec![
                Entity::with_variants(
                    "aragorn",
                    "Aragorn",
                    EntityType::Character,
                    vec!["Aragorn".into(), "Strider".into()],
                )
                .unwrap(),
                Entity::with_variants(
                    "frodo",
                    "Frodo",
                    EntityType::Character,
                    vec!["Frodo".into(), "Mr. Underhill".into()],
                )
                .unwrap(),
                Entity::new("the-shire", "The Shire", EntityType::Location).unwrap(),
            ],
        );
        assert_eq!(result.existing, vec!["strider", "mr-underhill", "the-shire"]);
        assert!(result.missing.is_empty());
        assert_eq!(result.stats.linked_skipped, 1);
        assert_eq!(result.stats.mentions_scanned, 4);
    }

    #[test]
    fn test_stats() {
        let result = collect(&[("a.md", "**NOTE** **42** **Bilbo**"), ("b.md", "")], vec![]);
        assert_eq!(result.stats.files_scanned, 2);
        assert_eq!(result.stats.filtered, 2);
        assert_eq!(result.stats.unique_mentions, 1);
        assert_eq!(result.stats.missing, 1);
    }
}
