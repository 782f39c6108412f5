//! Broken campaign links: unknown categories and slugs with no entity.

use super::{IssueCategory, ValidationIssue};
use crate::entity::{EntityIndex, EntityType};
use crate::markdown::campaign_links;
use crate::posts::Post;
use std::path::Path;

pub(super) fn check(post: &Post, entities: &EntityIndex, entities_dir: &Path) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for link in campaign_links(&post.body) {
        if EntityType::from_category(&link.category).is_none() {
            let valid = EntityType::ALL
                .iter()
                .map(|t| t.category())
                .collect::<Vec<_>>()
                .join(", ");
            issues.push(
                ValidationIssue::new(
                    &post.path,
                    link.line,
                    IssueCategory::BrokenLink,
                    format!(
                        "Invalid entity category \"{}\" in link {}",
                        link.category,
                        link.target()
                    ),
                )
                .with_suggestion(format!("Use one of: {valid}")),
            );
            continue;
        }

        // The linked entity's recorded type is not compared with the category.
        if !entities.contains_slug(&link.slug) {
            let missing = entities_dir.join(&link.category).join(format!("{}.md", link.slug));
            issues.push(
                ValidationIssue::new(
                    &post.path,
                    link.line,
                    IssueCategory::BrokenLink,
                    format!(
                        "Broken link {}: no entity \"{}\" exists",
                        link.target(),
                        link.slug
                    ),
                )
                .with_suggestion(format!("Create {}", missing.display())),
            );
        }
    }

    issues
}
