//! Guessing an entity type from the line a mention appears on.
//!
//! Each type has a family of word-boundary patterns. Every pattern that
//! matches the context line adds one point to its type; the highest score
//! wins, with ties going to the earlier type in [`EntityType::ALL`].

use crate::entity::EntityType;
use once_cell::sync::Lazy;
use regex::Regex;

fn family(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|s| Regex::new(&format!("(?i){s}")).expect("valid type heuristic pattern"))
        .collect()
}

static CHARACTER: Lazy<Vec<Regex>> = Lazy::new(|| {
    family(&[
        r"\b(?:he|she|him|his|her|hers|they|them|their)\b",
        r"\b(?:said|says|asked|replied|whispered|shouted|told|explained|laughed)\b",
        r"\b(?:wizard|fighter|rogue|cleric|paladin|ranger|bard|druid|monk|sorcerer|warlock|barbarian|merchant|captain|priest|priestess|king|queen|prince|princess|lord|lady|innkeeper|blacksmith|sage|scholar)\b",
        r"\b(?:elf|elven|dwarf|dwarven|halfling|gnome|human|half-elf|tiefling|dragonborn|hobbit)\b",
    ])
});

static LOCATION: Lazy<Vec<Regex>> = Lazy::new(|| {
    family(&[
        r"\b(?:in|at|to|from|into|near|toward|towards|through|across|inside|outside)\s+(?:the\s+)?\*\*",
        r"\b(?:city|town|village|hamlet|castle|keep|fortress|tower|temple|shrine|tavern|inn|forest|woods|mountains?|hills?|river|lake|sea|coast|swamp|marsh|caves?|caverns?|dungeon|ruins|road|valley|island|port|harbor|district)\b",
        r"\b(?:traveled|travelled|arrived|journeyed|reached|entered|explored|sailed)\b",
    ])
});

static FACTION: Lazy<Vec<Regex>> = Lazy::new(|| {
    family(&[
        r"\b(?:guild|order|clan|house|cult|brotherhood|sisterhood|council|company|circle|league|alliance|church|army|legion|syndicate|conclave)\b",
        r"\b(?:members?|joined|allied|agents?|leaders?|ranks|recruited|sworn)\b",
    ])
});

static ITEM: Lazy<Vec<Regex>> = Lazy::new(|| {
    family(&[
        r"\b(?:wield|wields|wielded|wielding|carry|carries|carried|carrying|held|holds|found|equipped|drew|gave|looted)\b",
        r"\b(?:sword|blade|dagger|axe|bow|staff|wand|ring|amulet|cloak|armor|armour|shield|helm|potion|scroll|tome|orb|gem|crown)\b",
        r"\b(?:magic|magical|enchanted|cursed|ancient|legendary|artifact|relic)\b",
    ])
});

static ENEMY: Lazy<Vec<Regex>> = Lazy::new(|| {
    family(&[
        r"\b(?:attack|attacks|attacked|attacking|fought|fight|fights|fighting|killed|kills|slew|slain|defeated|ambushed|charged|struck)\b",
        r"\b(?:monster|beast|creature|dragon|goblin|orc|troll|undead|skeleton|zombie|demon|devil|wolf|wolves|giant|spider|bandit|bandits)\b",
        r"\b(?:hostile|enemy|enemies|foe|foes|villain)\b",
    ])
});

fn patterns_for(entity_type: EntityType) -> &'static [Regex] {
    match entity_type {
        EntityType::Character => CHARACTER.as_slice(),
        EntityType::Location => LOCATION.as_slice(),
        EntityType::Faction => FACTION.as_slice(),
        EntityType::Item => ITEM.as_slice(),
        EntityType::Enemy => ENEMY.as_slice(),
    }
}

/// Number of matching patterns per type, in tie-break order.
pub fn score(context: &str) -> [(EntityType, usize); 5] {
    EntityType::ALL.map(|t| {
        let hits = patterns_for(t).iter().filter(|p| p.is_match(context)).count();
        (t, hits)
    })
}

/// Best-scoring type for a context line, or `None` when nothing matched.
pub fn classify(context: &str) -> Option<EntityType> {
    let mut best: Option<(EntityType, usize)> = None;
    for (entity_type, hits) in score(context) {
        if hits == 0 {
            continue;
        }
        // strictly greater, so earlier types keep ties
        if best.map_or(true, |(_, top)| hits > top) {
            best = Some((entity_type, hits));
        }
    }
    best.map(|(t, _)| t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character() {
        assert_eq!(
            classify("The old wizard **Radagast** said he would help."),
            Some(EntityType::Character)
        );
    }

    #[test]
    fn test_location() {
        assert_eq!(
            classify("We travelled to **Rivendell**, a hidden valley."),
            Some(EntityType::Location)
        );
    }

    #[test]
    fn test_faction() {
        assert_eq!(
            classify("The **Silver Hand** guild recruited new members."),
            Some(EntityType::Faction)
        );
    }

    #[test]
    fn test_item() {
        assert_eq!(
            classify("She wielded **Sting**, an enchanted blade."),
            Some(EntityType::Item)
        );
    }

    #[test]
    fn test_enemy() {
        assert_eq!(
            classify("We fought the **Cave Troll**, a hulking beast."),
            Some(EntityType::Enemy)
        );
    }

    #[test]
    fn test_no_signal() {
        assert_eq!(classify("**Mysterious** indeed."), None);
    }

    #[test]
    fn test_tie_prefers_earlier_type() {
        // one character hit ("he"), one location hit ("to **")
        let scores = score("So he went to **Bree**.");
        assert_eq!(scores[0], (EntityType::Character, 1));
        assert_eq!(scores[1], (EntityType::Location, 1));
        assert_eq!(classify("So he went to **Bree**."), Some(EntityType::Character));
    }

    #[test]
    fn test_counts_patterns_not_words() {
        // several pronouns still hit a single pattern
        let scores = score("he and she and they met **Tom**");
        assert_eq!(scores[0], (EntityType::Character, 1));
    }
}
