//! Pronoun inference from an entity's descriptive prose.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject pronouns recognised in entity prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectPronoun {
    He,
    She,
    They,
}

/// Possessive pronouns recognised in entity prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PossessivePronoun {
    His,
    Her,
    Their,
}

impl SubjectPronoun {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectPronoun::He => "he",
            SubjectPronoun::She => "she",
            SubjectPronoun::They => "they",
        }
    }

    /// The possessive that pairs with this subject pronoun.
    pub fn possessive(&self) -> PossessivePronoun {
        match self {
            SubjectPronoun::He => PossessivePronoun::His,
            SubjectPronoun::She => PossessivePronoun::Her,
            SubjectPronoun::They => PossessivePronoun::Their,
        }
    }
}

impl PossessivePronoun {
    pub fn as_str(&self) -> &'static str {
        match self {
            PossessivePronoun::His => "his",
            PossessivePronoun::Her => "her",
            PossessivePronoun::Their => "their",
        }
    }

    /// The subject pronoun that pairs with this possessive.
    pub fn subject(&self) -> SubjectPronoun {
        match self {
            PossessivePronoun::His => SubjectPronoun::He,
            PossessivePronoun::Her => SubjectPronoun::She,
            PossessivePronoun::Their => SubjectPronoun::They,
        }
    }
}

impl fmt::Display for SubjectPronoun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PossessivePronoun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subject/possessive pronoun pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronouns {
    pub subject: SubjectPronoun,
    pub possessive: PossessivePronoun,
}

impl Pronouns {
    pub fn new(subject: SubjectPronoun, possessive: PossessivePronoun) -> Self {
        Self {
            subject,
            possessive,
        }
    }

    pub fn he() -> Self {
        Self::new(SubjectPronoun::He, PossessivePronoun::His)
    }

    pub fn she() -> Self {
        Self::new(SubjectPronoun::She, PossessivePronoun::Her)
    }

    pub fn they() -> Self {
        Self::new(SubjectPronoun::They, PossessivePronoun::Their)
    }
}

impl fmt::Display for Pronouns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subject, self.possessive)
    }
}

fn word_pattern(words: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{words})\b")).expect("valid pronoun pattern")
}

// Checked in priority order: the first family present anywhere in the text wins.
static SUBJECTS: Lazy<[(SubjectPronoun, Regex); 3]> = Lazy::new(|| {
    [
        (SubjectPronoun::He, word_pattern("he")),
        (SubjectPronoun::She, word_pattern("she")),
        (SubjectPronoun::They, word_pattern("they")),
    ]
});

static POSSESSIVES: Lazy<[(PossessivePronoun, Regex); 3]> = Lazy::new(|| {
    [
        (PossessivePronoun::His, word_pattern("his")),
        (PossessivePronoun::Her, word_pattern("her|hers")),
        (PossessivePronoun::Their, word_pattern("their|theirs")),
    ]
});

/// Infer which pronouns an entity's prose uses.
///
/// Returns `None` when no pronoun appears. When only one side of the pair is
/// found, the other is derived from it.
pub fn infer_pronouns(body: &str) -> Option<Pronouns> {
    let subject = SUBJECTS
        .iter()
        .find(|(_, pattern)| pattern.is_match(body))
        .map(|(pronoun, _)| *pronoun);
    let possessive = POSSESSIVES
        .iter()
        .find(|(_, pattern)| pattern.is_match(body))
        .map(|(pronoun, _)| *pronoun);

    match (subject, possessive) {
        (Some(subject), Some(possessive)) => Some(Pronouns::new(subject, possessive)),
        (Some(subject), None) => Some(Pronouns::new(subject, subject.possessive())),
        (None, Some(possessive)) => Some(Pronouns::new(possessive.subject(), possessive)),
        (None, None) => None,
    }
}
