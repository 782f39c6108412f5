//! Stub entity files for missing mentions.

use super::MentionedEntity;
use crate::entity::EntityType;
use crate::error::{Result, WorldError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Occurrences listed in a stub's comment block.
const MAX_LISTED_MENTIONS: usize = 3;

/// Context longer than this is cut and marked with `...`.
const MAX_CONTEXT_CHARS: usize = 80;

const STUB_TAG: &str = "stub";

/// Result of attempting to create one stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StubOutcome {
    pub path: PathBuf,
    /// False when a file was already there and was left alone.
    pub created: bool,
}

#[derive(Debug, Serialize)]
struct StubHeader<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    entity_type: EntityType,
    subtype: &'static str,
    status: &'static str,
    visibility: &'static str,
    description: String,
    tags: Vec<&'static str>,
    relationships: Vec<String>,
}

/// Where a stub for `entity` would be written.
pub fn stub_path(entities_dir: &Path, entity: &MentionedEntity) -> PathBuf {
    entities_dir
        .join(entity.stub_type().category())
        .join(format!("{}.md", entity.slug))
}

/// Render the full stub document for `entity`.
pub fn render_stub(entity: &MentionedEntity, path: &Path) -> Result<String> {
    let entity_type = entity.stub_type();
    let header = StubHeader {
        name: &entity.name,
        entity_type,
        subtype: entity_type.default_subtype(),
        status: "unknown",
        visibility: "draft",
        description: format!("{} mentioned in the campaign log. Needs details.", entity.name),
        tags: vec![STUB_TAG],
        relationships: Vec::new(),
    };
    let yaml = serde_yaml::to_string(&header).map_err(|source| WorldError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let mut doc = format!("---\n{yaml}---\n\n<!--\n");
    doc.push_str(&format!(
        "Generated from {} mention(s) in posts.\n",
        entity.mention_count()
    ));
    for occurrence in entity.mentions.iter().take(MAX_LISTED_MENTIONS) {
        let file = occurrence
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| occurrence.file.display().to_string());
        doc.push_str(&format!(
            "- {}:{}: {}\n",
            file,
            occurrence.line,
            truncate_context(&occurrence.context)
        ));
    }
    doc.push_str("-->\n");
    Ok(doc)
}

fn truncate_context(context: &str) -> String {
    // keep the comment block closed
    let context = context.trim().replace("-->", "->");
    if context.chars().count() > MAX_CONTEXT_CHARS {
        let cut: String = context.chars().take(MAX_CONTEXT_CHARS).collect();
        format!("{cut}...")
    } else {
        context
    }
}

/// Write stubs for the given missing entities below `entities_dir`.
///
/// Existing files are never overwritten and come back with `created: false`.
/// With `dry_run`, nothing is written and `created` reports what would have
/// been created. The existence check and the write are separate steps, so two
/// concurrent runs may both write the same file.
pub fn create_missing_entities(
    missing: &[MentionedEntity],
    entities_dir: &Path,
    dry_run: bool,
) -> Result<Vec<StubOutcome>> {
    let mut outcomes = Vec::with_capacity(missing.len());

    for entity in missing {
        let path = stub_path(entities_dir, entity);
        if path.exists() {
            debug!(path = %path.display(), "stub target exists, leaving it untouched");
            outcomes.push(StubOutcome {
                path,
                created: false,
            });
            continue;
        }

        if !dry_run {
            let content = render_stub(entity, &path)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| WorldError::write(parent, e))?;
            }
            fs::write(&path, content).map_err(|e| WorldError::write(&path, e))?;
            info!(path = %path.display(), slug = %entity.slug, "created entity stub");
        }

        outcomes.push(StubOutcome {
            path,
            created: true,
        });
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::MentionOccurrence;

    fn candidate(suggested_type: Option<EntityType>, contexts: &[&str]) -> MentionedEntity {
        MentionedEntity {
            name: "Radagast".into(),
            slug: "radagast".into(),
            mentions: contexts
                .iter()
                .enumerate()
                .map(|(i, c)| MentionOccurrence {
                    file: PathBuf::from(format!("posts/day-{i}.md")),
                    line: i + 1,
                    context: c.to_string(),
                })
                .collect(),
            suggested_type,
            exists: false,
        }
    }

    #[test]
    fn test_path_uses_type_category() {
        let root = Path::new("campaign");
        assert_eq!(
            stub_path(root, &candidate(None, &[])),
            PathBuf::from("campaign/characters/radagast.md")
        );
        assert_eq!(
            stub_path(root, &candidate(Some(EntityType::Enemy), &[])),
            PathBuf::from("campaign/enemies/radagast.md")
        );
    }

    #[test]
    fn test_render_header_fields() {
        let doc = render_stub(
            &candidate(Some(EntityType::Location), &["in **Radagast**"]),
            Path::new("x.md"),
        )
        .unwrap();
        assert!(doc.starts_with("---\n"));
        assert!(doc.contains("name: Radagast\n"));
        assert!(doc.contains("type: location\n"));
        assert!(doc.contains("subtype: landmark\n"));
        assert!(doc.contains("- stub\n"));
        assert!(doc.contains("relationships: []\n"));
        assert!(doc.contains("- day-0.md:1: in **Radagast**\n"));
        assert!(doc.trim_end().ends_with("-->"));
    }

    #[test]
    fn test_render_lists_first_three_truncated() {
        let long = "x".repeat(100);
        let doc = render_stub(
            &candidate(None, &[long.as_str(), "b", "c", "d"]),
            Path::new("x.md"),
        )
        .unwrap();
        assert!(doc.contains(&format!("{}...\n", "x".repeat(80))));
        assert!(!doc.contains(&"x".repeat(81)));
        assert!(doc.contains("day-2.md:3: c"));
        assert!(!doc.contains("day-3.md"));
        assert!(doc.contains("Generated from 4 mention(s)"));
    }

    #[test]
    fn test_truncate_exact_length_untouched() {
        let exact = "y".repeat(80);
        assert_eq!(truncate_context(&exact), exact);
    }
}
