//! Unlinked entity mentions: bold text naming a known entity without a link.

use super::{IssueCategory, ValidationIssue};
use crate::entity::EntityIndex;
use crate::markdown::scan_mentions;
use crate::posts::Post;

pub(super) fn check(post: &Post, entities: &EntityIndex) -> Vec<ValidationIssue> {
    scan_mentions(&post.body)
        .into_iter()
        .filter(|m| !m.is_linked)
        .filter_map(|mention| {
            let entity = entities.find_by_name(&mention.text)?;
            Some(
                ValidationIssue::new(
                    &post.path,
                    mention.line,
                    IssueCategory::UnlinkedEntity,
                    format!(
                        "\"{}\" refers to {} \"{}\" but is not linked",
                        mention.text, entity.entity_type, entity.name
                    ),
                )
                .with_suggestion(format!(
                    "**[{}]({})**",
                    mention.text,
                    entity.link_path()
                )),
            )
        })
        .collect()
}
