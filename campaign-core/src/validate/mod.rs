//! World consistency validation of blog posts against the entity database.
//!
//! Three independent checks run over every post body:
//!
//! | Check | Category | Severity |
//! |-------|----------|----------|
//! | Pronouns near an entity's name contradict its own prose | `pronoun` | error |
//! | `/campaign/{category}/{slug}` links that resolve to nothing | `broken-link` | error |
//! | Bold text naming an entity without linking to it | `unlinked-entity` | warning |
//!
//! A run is valid when it produced no errors; warnings never invalidate it.

mod links;
mod pronoun;
mod unlinked;

use crate::entity::{load_entities, EntityIndex};
use crate::error::Result;
use crate::posts::{list_posts, Post};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Which check produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    Pronoun,
    BrokenLink,
    UnlinkedEntity,
}

impl IssueCategory {
    /// Severity is fixed per category.
    pub fn severity(&self) -> Severity {
        match self {
            IssueCategory::Pronoun | IssueCategory::BrokenLink => Severity::Error,
            IssueCategory::UnlinkedEntity => Severity::Warning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Pronoun => "pronoun",
            IssueCategory::BrokenLink => "broken-link",
            IssueCategory::UnlinkedEntity => "unlinked-entity",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding from the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Post the finding is in.
    pub file: PathBuf,
    /// 1-based line within the post body.
    pub line: usize,
    pub severity: Severity,
    pub category: IssueCategory,
    pub message: String,
    /// Literal text that would fix the finding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create an issue; severity follows from the category.
    pub fn new(
        file: impl Into<PathBuf>,
        line: usize,
        category: IssueCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            severity: category.severity(),
            category,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach a remediation string.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Summary counts for a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    pub files_checked: usize,
    pub entities_loaded: usize,
    pub pronoun_issues: usize,
    pub broken_links: usize,
    pub unlinked_entities: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Outcome of validating every post.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// No error-severity issue was found.
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
    pub stats: ValidationStats,
}

impl ValidationResult {
    /// Summarise a list of issues.
    pub fn new(issues: Vec<ValidationIssue>, files_checked: usize, entities_loaded: usize) -> Self {
        let mut stats = ValidationStats {
            files_checked,
            entities_loaded,
            ..Default::default()
        };
        for issue in &issues {
            match issue.category {
                IssueCategory::Pronoun => stats.pronoun_issues += 1,
                IssueCategory::BrokenLink => stats.broken_links += 1,
                IssueCategory::UnlinkedEntity => stats.unlinked_entities += 1,
            }
            match issue.severity {
                Severity::Error => stats.errors += 1,
                Severity::Warning => stats.warnings += 1,
            }
        }

        Self {
            valid: stats.errors == 0,
            issues,
            stats,
        }
    }

    /// Error-severity issues.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.is_error())
    }

    /// Warning-severity issues.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| !i.is_error())
    }

    /// Issues of one category.
    pub fn of_category(&self, category: IssueCategory) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|i| i.category == category).collect()
    }
}

/// Runs the consistency checks against a loaded entity set.
pub struct WorldValidator<'a> {
    entities: &'a EntityIndex,
    entities_dir: PathBuf,
}

impl<'a> WorldValidator<'a> {
    /// `entities_dir` is only used to suggest where missing entities belong.
    pub fn new(entities: &'a EntityIndex, entities_dir: impl Into<PathBuf>) -> Self {
        Self {
            entities,
            entities_dir: entities_dir.into(),
        }
    }

    /// Run all checks on one post.
    pub fn check_post(&self, post: &Post) -> Vec<ValidationIssue> {
        let mut issues = pronoun::check(post, self.entities);
        issues.extend(links::check(post, self.entities, &self.entities_dir));
        issues.extend(unlinked::check(post, self.entities));
        issues
    }
}

/// Validate every post in `posts_dir` against the entities under `entities_dir`.
///
/// A missing posts directory checks zero files. An unreadable post aborts the run.
pub fn validate_world(posts_dir: &Path, entities_dir: &Path) -> Result<ValidationResult> {
    let entities = load_entities(entities_dir)?;
    let validator = WorldValidator::new(&entities, entities_dir);

    let posts = list_posts(posts_dir)?;
    let mut issues = Vec::new();
    for path in &posts {
        let post = Post::read(path)?;
        let found = validator.check_post(&post);
        debug!(post = %path.display(), issues = found.len(), "checked post");
        issues.extend(found);
    }

    let result = ValidationResult::new(issues, posts.len(), entities.len());
    info!(
        files = result.stats.files_checked,
        errors = result.stats.errors,
        warnings = result.stats.warnings,
        "world validation finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let issue = ValidationIssue::new("a.md", 1, IssueCategory::BrokenLink, "x");
        assert_eq!(issue.severity, Severity::Error);
        let issue = ValidationIssue::new("a.md", 1, IssueCategory::UnlinkedEntity, "x");
        assert_eq!(issue.severity, Severity::Warning);
        let issue = ValidationIssue::new("a.md", 1, IssueCategory::Pronoun, "x");
        assert_eq!(issue.severity, Severity::Error);
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let result = ValidationResult::new(
            vec![
                ValidationIssue::new("a.md", 1, IssueCategory::UnlinkedEntity, "x"),
                ValidationIssue::new("a.md", 2, IssueCategory::UnlinkedEntity, "y"),
            ],
            1,
            3,
        );
        assert!(result.valid);
        assert_eq!(result.stats.warnings, 2);
        assert_eq!(result.stats.unlinked_entities, 2);
        assert_eq!(result.errors().count(), 0);
    }

    #[test]
    fn test_single_error_invalidates() {
        let result = ValidationResult::new(
            vec![ValidationIssue::new("a.md", 4, IssueCategory::Pronoun, "x")],
            1,
            1,
        );
        assert!(!result.valid);
        assert_eq!(result.stats.pronoun_issues, 1);
        assert_eq!(result.of_category(IssueCategory::Pronoun).len(), 1);
    }

    #[test]
    fn test_issue_json_shape() {
        let issue = ValidationIssue::new("p.md", 3, IssueCategory::UnlinkedEntity, "m")
            .with_suggestion("**[A](/campaign/characters/a)**");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["category"], "unlinked-entity");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["suggestion"], "**[A](/campaign/characters/a)**");

        let bare = serde_json::to_value(ValidationIssue::new("p.md", 1, IssueCategory::BrokenLink, "m"))
            .unwrap();
        assert!(bare.get("suggestion").is_none());
        assert_eq!(bare["category"], "broken-link");
    }
}
