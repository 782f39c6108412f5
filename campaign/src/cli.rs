//! Command line definition.

use campaign_core::config::{DEFAULT_ENTITIES_DIR, DEFAULT_POSTS_DIR};
use campaign_core::WorldConfig;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Keep the campaign world consistent with what the blog says about it.
#[derive(Debug, Parser)]
#[command(name = "campaign", version, about)]
pub struct Cli {
    /// Directory of blog post markdown files.
    #[arg(long, global = true, env = "CAMPAIGN_POSTS_DIR", default_value = DEFAULT_POSTS_DIR)]
    pub posts_dir: PathBuf,

    /// Root of the entity database (characters/, locations/, ...).
    #[arg(long, global = true, env = "CAMPAIGN_ENTITIES_DIR", default_value = DEFAULT_ENTITIES_DIR)]
    pub entities_dir: PathBuf,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config(&self) -> WorldConfig {
        WorldConfig::new(&self.posts_dir, &self.entities_dir)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check posts for pronoun mistakes, broken links and unlinked entities.
    Validate(ValidateArgs),
    /// Find bold mentions with no entity, optionally writing stubs for them.
    Extract(ExtractArgs),
    /// List the loaded entity database.
    Entities(EntitiesArgs),
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Fail on warnings as well as errors.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Write stub entity files for the selected missing entities.
    #[arg(long)]
    pub create: bool,

    /// Report what --create would write without writing it.
    #[arg(long, requires = "create")]
    pub dry_run: bool,

    /// Only consider these slugs (repeatable).
    #[arg(long = "only", value_name = "SLUG")]
    pub only: Vec<String>,

    /// Only consider entities mentioned at least this many times.
    #[arg(long, default_value_t = 1)]
    pub min_mentions: usize,
}

#[derive(Debug, Args)]
pub struct EntitiesArgs {
    /// Print the entities as JSON.
    #[arg(long)]
    pub json: bool,
}
