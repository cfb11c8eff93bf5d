// Live tag suggestions for Fieldnote
// A narrower keyword table matched against whole tokens while the researcher
// types. Kept separate from the full-note auto-tagger: the two tables have
// different granularity and are not interchangeable.

use std::collections::HashSet;

/// Single-word triggers and the tag ids they suggest
const SUGGEST_MAP: &[(&str, &[&str])] = &[
    ("slow", &["f_time"]),
    ("confusing", &["f_usability"]),
    ("hard", &["f_usability", "f_time"]),
    ("error", &["f_reliability"]),
    ("bug", &["f_reliability"]),
    ("down", &["f_reliability"]),
    ("wait", &["f_time"]),
    ("expensive", &["m_cost"]),
    ("cheap", &["m_cost"]),
    ("price", &["m_cost"]),
    ("tired", &["i_mental"]),
    ("stress", &["i_stress"]),
    ("quit", &["i_avoidance"]),
    ("stop", &["i_avoidance"]),
    ("always", &["b_routine", "b_habit"]),
    ("switch", &["b_tool_switch"]),
    ("compare", &["b_comparison"]),
    ("alternative", &["b_comparison"]),
];

/// Phrases that flag an interview prompt as leading the participant
const LEADING_QUESTION_PHRASES: &[&str] = &[
    "would you like",
    "don't you think",
    "isn't it better",
    "do you think this feature",
];

/// Suggest tags for the note as typed, skipping ids already on the question.
///
/// Unlike [`auto_tag_note`](crate::tagging::auto_tag_note) this tokenizes the
/// text on non-word characters and matches whole tokens only, so "slowly"
/// never triggers "slow". Returned in table order, de-duplicated.
pub fn suggest_tags(note_text: &str, applied_tag_ids: &[String]) -> Vec<String> {
    let text = note_text.to_lowercase();
    let words: HashSet<&str> = text
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect();

    let mut suggestions: Vec<String> = Vec::new();
    for (keyword, tag_ids) in SUGGEST_MAP {
        if !words.contains(keyword) {
            continue;
        }
        for tag_id in *tag_ids {
            if applied_tag_ids.iter().any(|id| id == tag_id) {
                continue;
            }
            if !suggestions.iter().any(|id| id == tag_id) {
                suggestions.push((*tag_id).to_string());
            }
        }
    }
    suggestions
}

/// True when the prompt contains a known leading-question phrase
pub fn is_leading_question(prompt: &str) -> bool {
    let prompt = prompt.to_lowercase();
    LEADING_QUESTION_PHRASES
        .iter()
        .any(|phrase| prompt.contains(phrase))
}
