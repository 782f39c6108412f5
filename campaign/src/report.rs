//! Human-readable rendering of validation and extraction results.

use campaign_core::extract::StubOutcome;
use campaign_core::{EntityIndex, ExtractionResult, Severity, ValidationResult};
use crossterm::style::{Color, Stylize};
use std::io::{self, Write};
use std::path::PathBuf;

/// Mentions shown under each missing entity.
const CONTEXT_PREVIEW: usize = 1;

/// Optional terminal coloring.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn colored() -> Self {
        Self { enabled: true }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, text: impl AsRef<str>, color: Color) -> String {
        let text = text.as_ref();
        if self.enabled {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: impl AsRef<str>) -> String {
        let text = text.as_ref();
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn counted(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

/// Print issues grouped by file, then a summary.
pub fn write_validation(out: &mut impl Write, result: &ValidationResult, palette: Palette) -> io::Result<()> {
    let mut current: Option<&PathBuf> = None;
    for issue in &result.issues {
        if current != Some(&issue.file) {
            writeln!(out, "\n{}", palette.bold(issue.file.display().to_string()))?;
            current = Some(&issue.file);
        }
        let severity = match issue.severity {
            Severity::Error => palette.paint("error", Color::Red),
            Severity::Warning => palette.paint("warning", Color::Yellow),
        };
        writeln!(
            out,
            "  {:>4}  {}  [{}] {}",
            issue.line, severity, issue.category, issue.message
        )?;
        if let Some(ref suggestion) = issue.suggestion {
            writeln!(out, "        {} {}", palette.paint("fix:", Color::Cyan), suggestion)?;
        }
    }

    let stats = &result.stats;
    writeln!(out)?;
    writeln!(
        out,
        "Checked {} against {}.",
        counted(stats.files_checked, "file", "files"),
        counted(stats.entities_loaded, "entity", "entities")
    )?;
    writeln!(
        out,
        "{}, {} (pronoun: {}, broken-link: {}, unlinked-entity: {})",
        counted(stats.errors, "error", "errors"),
        counted(stats.warnings, "warning", "warnings"),
        stats.pronoun_issues,
        stats.broken_links,
        stats.unlinked_entities
    )?;
    if result.valid {
        writeln!(out, "{}", palette.paint("World is consistent.", Color::Green))?;
    } else {
        writeln!(out, "{}", palette.paint("World validation failed.", Color::Red))?;
    }
    Ok(())
}

/// Print missing entities with their mention counts and a context preview.
pub fn write_extraction(out: &mut impl Write, result: &ExtractionResult, palette: Palette) -> io::Result<()> {
    let stats = &result.stats;
    writeln!(
        out,
        "Scanned {}: {} unique mentions, {} existing, {} missing.",
        counted(stats.files_scanned, "file", "files"),
        stats.unique_mentions,
        stats.existing,
        stats.missing
    )?;

    for entity in &result.missing {
        let suggested = entity
            .suggested_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        writeln!(
            out,
            "\n  {} ({})  {}, suggested type: {}",
            palette.bold(&entity.name),
            entity.slug,
            counted(entity.mention_count(), "mention", "mentions"),
            palette.paint(suggested, Color::Cyan)
        )?;
        for occurrence in entity.mentions.iter().take(CONTEXT_PREVIEW) {
            let file = occurrence
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            writeln!(out, "      {}:{}: {}", file, occurrence.line, occurrence.context.trim())?;
        }
    }
    Ok(())
}

/// Print the outcome of stub creation.
pub fn write_stubs(out: &mut impl Write, outcomes: &[StubOutcome], dry_run: bool, palette: Palette) -> io::Result<()> {
    writeln!(out)?;
    for outcome in outcomes {
        let label = match (outcome.created, dry_run) {
            (true, true) => palette.paint("would create", Color::Cyan),
            (true, false) => palette.paint("created", Color::Green),
            (false, _) => palette.paint("exists, skipped", Color::Yellow),
        };
        writeln!(out, "  {} {}", label, outcome.path.display())?;
    }
    Ok(())
}

/// Print the loaded entity database.
pub fn write_entities(out: &mut impl Write, entities: &EntityIndex, palette: Palette) -> io::Result<()> {
    for entity in entities.iter() {
        let pronouns = entity
            .pronouns
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<10} {}  ({})  pronouns: {}",
            entity.entity_type.to_string(),
            palette.bold(&entity.name),
            entity.slug,
            pronouns
        )?;
        if entity.variants.len() > 1 {
            writeln!(out, "           aka {}", entity.variants[1..].join(", "))?;
        }
    }
    writeln!(out, "\n{} loaded.", counted(entities.len(), "entity", "entities"))?;
    Ok(())
}
