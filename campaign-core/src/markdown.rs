//! Scanning of post bodies for bold mentions and campaign links.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Prefix shared by every entity page on the site.
pub const CAMPAIGN_PREFIX: &str = "/campaign/";

static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+?)\*\*").expect("valid emphasis pattern"));
static WRAPPED_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[[^\]]*\]\([^)]*\)$").expect("valid link pattern"));
static CAMPAIGN_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]*)\]\(/campaign/([^/)\s]+)/([^)\s]+)\)").expect("valid campaign link pattern")
});

/// An occurrence of bold text in a post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mention {
    /// Literal text between the `**` markers.
    pub text: String,
    /// 1-based line within the body.
    pub line: usize,
    /// The bold text is a markdown link, e.g. `**[Frodo](/campaign/characters/frodo)**`.
    pub is_linked: bool,
}

/// A link into the campaign entity pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignLink {
    /// Link text.
    pub text: String,
    /// First path segment after `/campaign/`.
    pub category: String,
    /// Second path segment, without any fragment or trailing slash.
    pub slug: String,
    /// 1-based line within the body.
    pub line: usize,
}

impl CampaignLink {
    /// The link target as written on the site.
    pub fn target(&self) -> String {
        format!("{CAMPAIGN_PREFIX}{}/{}", self.category, self.slug)
    }
}

/// Find every bold span in `body`, line by line.
pub fn scan_mentions(body: &str) -> Vec<Mention> {
    let mut mentions = Vec::new();
    for (idx, line) in body.lines().enumerate() {
        for caps in EMPHASIS.captures_iter(line) {
            let text = &caps[1];
            mentions.push(Mention {
                text: text.to_string(),
                line: idx + 1,
                is_linked: WRAPPED_LINK.is_match(text.trim()),
            });
        }
    }
    mentions
}

/// Find every link whose target is below `/campaign/`.
///
/// Links to a bare category page (`/campaign/characters`) are not entity links
/// and are skipped.
pub fn campaign_links(body: &str) -> Vec<CampaignLink> {
    let mut links = Vec::new();
    for (idx, line) in body.lines().enumerate() {
        for caps in CAMPAIGN_LINK.captures_iter(line) {
            let rest = &caps[3];
            let rest = rest.split('#').next().unwrap_or_default();
            let slug = rest.split('/').find(|s| !s.is_empty()).unwrap_or_default();
            if slug.is_empty() {
                continue;
            }
            links.push(CampaignLink {
                text: caps[1].to_string(),
                category: caps[2].to_string(),
                slug: slug.to_string(),
                line: idx + 1,
            });
        }
    }
    links
}
