// Auto-tagger for Fieldnote
// Keyword-based, fully offline and tokenless tagging of free-text notes

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::TagCatalog;

/// Trigger phrases per predefined tag id. A phrase matches as a
/// word-boundary-delimited substring of the note; the first hit wins and the
/// remaining phrases for that tag are skipped.
const KEYWORD_MAP: &[(&str, &[&str])] = &[
    ("b_routine", &["every day", "daily", "routine", "usually", "always", "habit"]),
    ("b_workaround", &["excel", "spreadsheet", "manually", "copy paste", "hack", "workaround"]),
    ("m_efficiency", &["faster", "save time", "quick", "speed up"]),
    ("m_control", &["export", "see everything", "control", "customize"]),
    ("m_safety", &["backup", "safe", "lose data", "secure", "privacy"]),
    ("f_time", &["took too long", "slow", "wait", "hours", "waste of time"]),
    ("f_usability", &["confusing", "hard to find", "clunky", "where is", "complicated", "difficult"]),
    ("f_cost", &["expensive", "too much", "price", "budget", "cost"]),
    ("i_churn", &["cancel", "stop using", "alternative", "switch"]),
    ("i_support", &["call support", "help desk", "ticket", "contact support"]),
];

static KEYWORD_RULES: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    KEYWORD_MAP
        .iter()
        .map(|(tag_id, phrases)| {
            let patterns = phrases
                .iter()
                .map(|phrase| word_bounded(phrase).expect("Invalid keyword pattern"))
                .collect();
            (*tag_id, patterns)
        })
        .collect()
});

/// Compile a phrase into a case-insensitive whole-word/phrase pattern.
/// Boundaries apply only at the phrase's outer edges, so multi-word phrases
/// match as literal substrings.
fn word_bounded(phrase: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase))).ok()
}

/// Map a block of note text to the set of matching tag ids.
///
/// Two passes: the fixed keyword dictionary above, then every catalog tag
/// whose name is longer than 3 characters matched by its own name. The
/// second pass is what lets user-created custom tags self-match without a
/// dictionary entry. Pure: no storage, no side effects, cannot fail.
pub fn auto_tag_note(note_text: &str, catalog: &TagCatalog) -> HashSet<String> {
    let mut matched = HashSet::new();
    if note_text.is_empty() {
        return matched;
    }
    let text = note_text.to_lowercase();

    for (tag_id, patterns) in KEYWORD_RULES.iter() {
        if patterns.iter().any(|re| re.is_match(&text)) {
            matched.insert((*tag_id).to_string());
        }
    }

    for tag in catalog.tags() {
        // Only self-match names distinct enough to avoid noise
        if tag.name.chars().count() <= 3 {
            continue;
        }
        if let Some(re) = word_bounded(&tag.name.to_lowercase()) {
            if re.is_match(&text) {
                matched.insert(tag.id.clone());
            }
        }
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Tag, TagCategory};

    #[test]
    fn test_empty_text_matches_nothing() {
        let result = auto_tag_note("", &TagCatalog::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_phrase_match_sets_tag() {
        let result = auto_tag_note(
            "Honestly the whole process felt like a waste of time.",
            &TagCatalog::default(),
        );
        assert!(result.contains("f_time"));
    }

    #[test]
    fn test_word_boundary_rejects_partial_word() {
        // "wait" must not fire inside "Waiting"
        let result = auto_tag_note("Waiting rooms are fine.", &TagCatalog::default());
        assert!(!result.contains("f_time"));

        let result = auto_tag_note("I had to wait for ages.", &TagCatalog::default());
        assert!(result.contains("f_time"));
    }

    #[test]
    fn test_custom_tag_self_match() {
        let custom = Tag {
            id: "c_1".to_string(),
            name: "dark-mode".to_string(),
            category: TagCategory::Behaviour,
            is_custom: true,
        };
        let catalog = TagCatalog::from_tags(vec![custom]);

        let result = auto_tag_note("I love the dark-mode view", &catalog);
        assert!(result.contains("c_1"));
    }

    #[test]
    fn test_short_custom_name_never_matches() {
        let custom = Tag {
            id: "c_2".to_string(),
            name: "ux".to_string(),
            category: TagCategory::Friction,
            is_custom: true,
        };
        let catalog = TagCatalog::from_tags(vec![custom]);

        let result = auto_tag_note("the ux is great, ux everywhere", &catalog);
        assert!(!result.contains("c_2"));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let result = auto_tag_note("EVERYTHING IS SO SLOW AND CONFUSING", &TagCatalog::default());
        assert!(result.contains("f_time"));
        assert!(result.contains("f_usability"));
    }

    #[test]
    fn test_idempotent() {
        let catalog = TagCatalog::default();
        let text = "I always export to excel manually, it takes hours";
        let first = auto_tag_note(text, &catalog);
        let second = auto_tag_note(text, &catalog);
        assert_eq!(first, second);
        assert!(first.contains("b_routine"));
        assert!(first.contains("b_workaround"));
        assert!(first.contains("m_control"));
        assert!(first.contains("f_time"));
    }

    #[test]
    fn test_predefined_names_self_match_too() {
        // The name pass covers the whole catalog, not just custom tags
        let result = auto_tag_note("pure overload at the checkout", &TagCatalog::default());
        assert!(result.contains("f_overload"));
    }
}
