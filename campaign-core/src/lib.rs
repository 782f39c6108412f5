//! World consistency toolkit for a D&D campaign blog.
//!
//! This crate provides:
//! - Loading the campaign entity database (characters, locations, factions, items, enemies)
//! - World validation of blog posts: pronoun consistency, broken links, unlinked mentions
//! - Extraction of bold mentions that have no entity yet, with stub generation
//!
//! # Quick Start
//!
//! ```ignore
//! use campaign_core::{validate_world, WorldConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WorldConfig::default();
//!     let result = validate_world(&config.posts_dir, &config.entities_dir)?;
//!
//!     for issue in &result.issues {
//!         println!("{}:{} {}", issue.file.display(), issue.line, issue.message);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod extract;
pub mod frontmatter;
pub mod markdown;
pub mod posts;
pub mod slug;
pub mod testing;
pub mod validate;

// Primary public API
pub use config::WorldConfig;
pub use entity::{load_entities, Entity, EntityIndex, EntityType, Pronouns};
pub use error::{Result, WorldError};
pub use extract::{
    create_missing_entities, extract_entities, ExtractionResult, MentionedEntity, StubOutcome,
};
pub use slug::slugify;
pub use validate::{validate_world, IssueCategory, Severity, ValidationIssue, ValidationResult};
