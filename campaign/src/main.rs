//! Campaign world consistency CLI.
//!
//! Validates blog posts against the entity database and finds mentions that
//! still need an entity:
//!
//! ```bash
//! cargo run -p campaign -- validate
//! cargo run -p campaign -- extract --create --dry-run
//! ```
//!
//! Directories default to the site layout and can be set with
//! `--posts-dir` / `--entities-dir` or `CAMPAIGN_POSTS_DIR` /
//! `CAMPAIGN_ENTITIES_DIR` (a `.env` file is honored).

mod cli;
mod report;

use anyhow::{Context, Result};
use campaign_core::{
    create_missing_entities, extract_entities, load_entities, validate_world, MentionedEntity,
    StubOutcome, WorldConfig,
};
use clap::Parser;
use cli::{Cli, Command, EntitiesArgs, ExtractArgs, ValidateArgs};
use report::Palette;
use serde::Serialize;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn palette(no_color: bool) -> Palette {
    if no_color {
        Palette::plain()
    } else {
        Palette::colored()
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.config();
    let palette = palette(cli.no_color);
    tracing::debug!(?config, "resolved content layout");

    match cli.command {
        Command::Validate(args) => run_validate(&config, &args, palette),
        Command::Extract(args) => run_extract(&config, &args, palette),
        Command::Entities(args) => run_entities(&config, &args, palette),
    }
}

fn run_validate(config: &WorldConfig, args: &ValidateArgs, palette: Palette) -> Result<ExitCode> {
    let result = validate_world(&config.posts_dir, &config.entities_dir)
        .context("world validation failed to run")?;

    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
    } else {
        report::write_validation(&mut out, &result, palette)?;
    }

    let failed = !result.valid || (args.strict && result.stats.warnings > 0);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// JSON shape of `extract --create`.
#[derive(Serialize)]
struct ExtractReport<'a> {
    #[serde(flatten)]
    extraction: &'a campaign_core::ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    stubs: Option<&'a [StubOutcome]>,
}

fn run_extract(config: &WorldConfig, args: &ExtractArgs, palette: Palette) -> Result<ExitCode> {
    let result = extract_entities(&config.posts_dir, &config.entities_dir)
        .context("entity extraction failed to run")?;

    let stubs = if args.create {
        let selected = select_missing(&result.missing, args);
        tracing::info!(selected = selected.len(), dry_run = args.dry_run, "creating stubs");
        Some(
            create_missing_entities(&selected, &config.entities_dir, args.dry_run)
                .context("failed to create entity stubs")?,
        )
    } else {
        None
    };

    let mut out = io::stdout().lock();
    if args.json {
        let report = ExtractReport {
            extraction: &result,
            stubs: stubs.as_deref(),
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        report::write_extraction(&mut out, &result, palette)?;
        if let Some(ref outcomes) = stubs {
            report::write_stubs(&mut out, outcomes, args.dry_run, palette)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Missing entities chosen by `--only` and `--min-mentions`.
fn select_missing(missing: &[MentionedEntity], args: &ExtractArgs) -> Vec<MentionedEntity> {
    missing
        .iter()
        .filter(|m| args.only.is_empty() || args.only.iter().any(|s| s == &m.slug))
        .filter(|m| m.mention_count() >= args.min_mentions)
        .cloned()
        .collect()
}

fn run_entities(config: &WorldConfig, args: &EntitiesArgs, palette: Palette) -> Result<ExitCode> {
    let entities = load_entities(&config.entities_dir).with_context(|| {
        format!(
            "failed to load entities from {}",
            config.entities_dir.display()
        )
    })?;

    let mut out = io::stdout().lock();
    if args.json {
        let list: Vec<_> = entities.iter().collect();
        serde_json::to_writer_pretty(&mut out, &list)?;
        writeln!(out)?;
    } else {
        report::write_entities(&mut out, &entities, palette)?;
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::extract::MentionOccurrence;
    use std::path::PathBuf;

    fn candidate(slug: &str, mentions: usize) -> MentionedEntity {
        MentionedEntity {
            name: slug.to_string(),
            slug: slug.to_string(),
            mentions: (0..mentions)
                .map(|i| MentionOccurrence {
                    file: PathBuf::from("p.md"),
                    line: i + 1,
                    context: String::new(),
                })
                .collect(),
            suggested_type: None,
            exists: false,
        }
    }

    fn extract_args(only: &[&str], min_mentions: usize) -> ExtractArgs {
        ExtractArgs {
            json: false,
            create: true,
            dry_run: false,
            only: only.iter().map(|s| s.to_string()).collect(),
            min_mentions,
        }
    }

    #[test]
    fn test_select_all_by_default() {
        let missing = vec![candidate("a", 1), candidate("b", 3)];
        assert_eq!(select_missing(&missing, &extract_args(&[], 1)).len(), 2);
    }

    #[test]
    fn test_select_filters() {
        let missing = vec![candidate("a", 1), candidate("b", 3), candidate("c", 2)];
        let picked = select_missing(&missing, &extract_args(&[], 2));
        let slugs: Vec<_> = picked.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "c"]);

        let picked = select_missing(&missing, &extract_args(&["a", "c"], 2));
        let slugs: Vec<_> = picked.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c"]);
    }

    #[test]
    fn test_no_color_renders_without_escapes() {
        let result = campaign_core::ValidationResult::new(Vec::new(), 1, 1);
        let mut buf = Vec::new();
        report::write_validation(&mut buf, &result, palette(true)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("World is consistent."));
        assert!(!text.contains('\x1b'));
    }
}
