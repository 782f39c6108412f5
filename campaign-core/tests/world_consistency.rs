//! End-to-end validation tests against on-disk campaign content.
//!
//! Run with: `cargo test -p campaign-core --test world_consistency`

use campaign_core::testing::{entity_doc, WorldFixture};
use campaign_core::{load_entities, EntityType, IssueCategory, Pronouns, Severity};

fn frodo_world() -> WorldFixture {
    let world = WorldFixture::new().expect("Failed to create fixture");
    world
        .entity(
            EntityType::Character,
            "frodo",
            &entity_doc("Frodo", &["Mr. Underhill"], "A hobbit of the Shire. He carries the ring."),
        )
        .expect("Failed to write frodo");
    world
}

// =============================================================================
// Entity loading
// =============================================================================

#[test]
fn test_missing_category_directories_are_skipped() {
    let world = frodo_world();
    world
        .entity(EntityType::Location, "bree", "---\nname: Bree\n---\nA town.")
        .unwrap();

    let index = load_entities(&world.entities_dir()).expect("load should succeed");
    assert_eq!(index.len(), 2);
    assert!(index.of_type(EntityType::Faction).is_empty());
    assert_eq!(index.get("frodo").unwrap().pronouns, Some(Pronouns::he()));
}

// =============================================================================
// Broken and unlinked references
// =============================================================================

#[test]
fn test_linked_known_entity_is_clean() {
    let world = WorldFixture::new().unwrap();
    world
        .entity(EntityType::Character, "gandalf", &entity_doc("Gandalf", &[], "A wizard."))
        .unwrap();
    world
        .post("arrival.md", "**[Gandalf](/campaign/characters/gandalf)** arrived.\n")
        .unwrap();

    let result = world.validate().unwrap();
    assert!(result.valid);
    assert!(result.issues.is_empty());
    assert_eq!(result.stats.files_checked, 1);
    assert_eq!(result.stats.entities_loaded, 1);
}

#[test]
fn test_link_to_unknown_slug_is_broken() {
    let world = WorldFixture::new().unwrap();
    world
        .post("tower.md", "We climbed to see **[Saruman](/campaign/characters/saruman)**.\n")
        .unwrap();

    let result = world.validate().unwrap();
    assert!(!result.valid);
    let broken = result.of_category(IssueCategory::BrokenLink);
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].severity, Severity::Error);
    assert!(broken[0].message.contains("saruman"));
    assert_eq!(broken[0].line, 1);
    assert!(broken[0].file.ends_with("tower.md"));
}

#[test]
fn test_unlinked_mention_gets_link_suggestion() {
    let world = WorldFixture::new().unwrap();
    world
        .entity(EntityType::Character, "aragorn", &entity_doc("Aragorn", &[], ""))
        .unwrap();
    world.post("road.md", "Intro.\n\n**Aragorn** led the way.\n").unwrap();

    let result = world.validate().unwrap();
    assert!(result.valid, "warnings alone keep a run valid");
    assert_eq!(result.issues.len(), 1);
    let issue = &result.issues[0];
    assert_eq!(issue.category, IssueCategory::UnlinkedEntity);
    assert_eq!(issue.severity, Severity::Warning);
    assert_eq!(issue.line, 3);
    assert_eq!(
        issue.suggestion.as_deref(),
        Some("**[Aragorn](/campaign/characters/aragorn)**")
    );
}

// =============================================================================
// Pronoun consistency
// =============================================================================

#[test]
fn test_pronoun_mismatch_is_an_error() {
    let world = frodo_world();
    world.post("tired.md", "Frodo said she was tired.\n").unwrap();

    let result = world.validate().unwrap();
    assert!(!result.valid);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].category, IssueCategory::Pronoun);
    assert_eq!(result.issues[0].severity, Severity::Error);
    assert_eq!(result.stats.pronoun_issues, 1);
}

#[test]
fn test_pronoun_matched_through_variant() {
    let world = frodo_world();
    world
        .post("inn.md", "Mr. Underhill sat down.\nShe ordered ale.\n")
        .unwrap();

    let result = world.validate().unwrap();
    assert_eq!(result.of_category(IssueCategory::Pronoun).len(), 1);
}

#[test]
fn test_nearby_she_entity_suppresses_pronoun_error() {
    let world = frodo_world();
    world
        .entity(
            EntityType::Character,
            "galadriel",
            &entity_doc("Galadriel", &[], "She is the Lady of the Wood."),
        )
        .unwrap();
    world
        .post("lorien.md", "Frodo looked into the mirror.\nGaladriel said she had seen it too.\n")
        .unwrap();

    let result = world.validate().unwrap();
    assert!(result.of_category(IssueCategory::Pronoun).is_empty());
}

// =============================================================================
// Directory handling
// =============================================================================

#[test]
fn test_missing_posts_directory_checks_nothing() {
    let world = frodo_world();
    let result = world.validate().unwrap();
    assert!(result.valid);
    assert_eq!(result.stats.files_checked, 0);
    assert_eq!(result.stats.entities_loaded, 1);
}

#[test]
fn test_malformed_entity_header_aborts() {
    let world = WorldFixture::new().unwrap();
    world
        .entity(EntityType::Item, "ring", "---\nname: [broken\n---\n")
        .unwrap();
    world.post("p.md", "text").unwrap();

    let err = world.validate().unwrap_err();
    assert!(err.to_string().contains("ring.md"));
}

#[test]
fn test_result_serializes_for_reporting() {
    let world = WorldFixture::new().unwrap();
    world
        .post("p.md", "[x](/campaign/dragons/smaug)\n")
        .unwrap();

    let result = world.validate().unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["stats"]["broken_links"], 1);
    assert_eq!(json["issues"][0]["category"], "broken-link");
}
