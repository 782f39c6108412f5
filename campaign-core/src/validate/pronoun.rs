//! Pronoun consistency: a pronoun of the other gender near an entity's name,
//! with no other entity of that gender in view to account for it.
//!
//! The window heuristic is imprecise in both directions. Any other
//! same-gender entity named nearby suppresses the finding, and two
//! differently-gendered characters on adjacent lines can trigger one.

use super::{IssueCategory, ValidationIssue};
use crate::entity::{Entity, EntityIndex, SubjectPronoun};
use crate::posts::Post;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lines inspected per match: the matching line and the two after it.
const WINDOW_LINES: usize = 3;

/// Pronoun forms that point at one gender.
struct ConflictForms {
    /// Subject pronoun of the entities that would explain these forms.
    subject: SubjectPronoun,
    /// Label and pattern for each form, checked in order.
    patterns: Vec<(&'static str, Regex)>,
}

impl ConflictForms {
    fn first_match(&self, window: &str) -> Option<&'static str> {
        self.patterns
            .iter()
            .find(|(_, pattern)| pattern.is_match(window))
            .map(|(label, _)| *label)
    }
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("valid pronoun conflict pattern")
}

static FEMININE: Lazy<ConflictForms> = Lazy::new(|| ConflictForms {
    subject: SubjectPronoun::She,
    patterns: vec![
        ("she", pattern(r"(?i)\bshe\b")),
        // possessive "her" is followed by the thing possessed
        ("her", pattern(r"(?i)\bher\s+\w")),
    ],
});

static MASCULINE: Lazy<ConflictForms> = Lazy::new(|| ConflictForms {
    subject: SubjectPronoun::He,
    patterns: vec![
        ("he", pattern(r"(?i)\bhe\b")),
        ("his", pattern(r"(?i)\bhis\b")),
    ],
});

pub(super) fn check(post: &Post, entities: &EntityIndex) -> Vec<ValidationIssue> {
    let lines: Vec<&str> = post.body.lines().collect();
    let mut issues = Vec::new();

    for entity in entities.iter() {
        let Some(pronouns) = entity.pronouns else {
            continue;
        };
        let conflicts: &ConflictForms = match pronouns.subject {
            SubjectPronoun::He => &*FEMININE,
            SubjectPronoun::She => &*MASCULINE,
            SubjectPronoun::They => continue,
        };

        for (idx, line) in lines.iter().enumerate() {
            if !entity.is_named_in(line) {
                continue;
            }

            let end = (idx + WINDOW_LINES).min(lines.len());
            let window = lines[idx..end].join(" ");
            let Some(found) = conflicts.first_match(&window) else {
                continue;
            };
            if named_by_other(entities, entity, conflicts.subject, &window) {
                continue;
            }

            issues.push(
                ValidationIssue::new(
                    &post.path,
                    idx + 1,
                    IssueCategory::Pronoun,
                    format!(
                        "\"{}\" uses {} pronouns, but \"{}\" appears nearby with no other {} character mentioned",
                        entity.name, pronouns, found, conflicts.subject
                    ),
                )
                .with_suggestion(format!(
                    "Check the pronouns used for {} (expected {})",
                    entity.name, pronouns
                )),
            );
        }
    }

    issues
}

/// Another entity with the conflicting subject pronoun is named in the window.
fn named_by_other(
    entities: &EntityIndex,
    current: &Entity,
    subject: SubjectPronoun,
    window: &str,
) -> bool {
    entities.iter().any(|other| {
        other.slug != current.slug
            && other.subject_pronoun() == Some(subject)
            && other.is_named_in(window)
    })
}
