//! Slug generation for entity file names and link targets.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid slug character class"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid dash pattern"));

/// Turn display text into a slug: `"Kael'thas the Red"` becomes `"kaelthas-the-red"`.
///
/// Applying `slugify` to its own output returns the same string.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase().replace(['\'', '\u{2019}'], "");
    let cleaned = DISALLOWED.replace_all(&lowered, "");
    let dashed = WHITESPACE.replace_all(&cleaned, "-");
    let collapsed = DASHES.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}
