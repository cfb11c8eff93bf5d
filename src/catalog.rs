// Tag catalog for Fieldnote
// The predefined tag list, the default interview template, and the combined
// predefined + custom catalog value passed into the core functions

use crate::database::models::{Tag, TagCategory, TemplateCategory};

/// The fixed tag catalog shipped with the app
pub fn predefined_tags() -> Vec<Tag> {
    use TagCategory::{Behaviour, Friction, Impact, Motivation};

    vec![
        // Behaviour
        Tag::predefined("b_routine", "routine-driven", Behaviour),
        Tag::predefined("b_adaptive", "adaptive", Behaviour),
        Tag::predefined("b_proactive", "proactive", Behaviour),
        Tag::predefined("b_reactive", "reactive", Behaviour),
        Tag::predefined("b_workaround", "workaround-heavy", Behaviour),
        Tag::predefined("b_comparison", "comparison-oriented", Behaviour),
        Tag::predefined("b_habit", "habit-based", Behaviour),
        Tag::predefined("b_tool_switch", "tool-switching", Behaviour),
        // Motivation
        Tag::predefined("m_convenience", "convenience-seeking", Motivation),
        Tag::predefined("m_efficiency", "efficiency-focused", Motivation),
        Tag::predefined("m_cost", "cost-sensitive", Motivation),
        Tag::predefined("m_quality", "quality-focused", Motivation),
        Tag::predefined("m_risk_averse", "risk-averse", Motivation),
        Tag::predefined("m_control", "control-seeking", Motivation),
        Tag::predefined("m_flexibility", "flexibility-valuing", Motivation),
        Tag::predefined("m_safety", "safety-conscious", Motivation),
        // Friction
        Tag::predefined("f_time", "time-friction", Friction),
        Tag::predefined("f_info", "information-gap", Friction),
        Tag::predefined("f_coordination", "coordination-friction", Friction),
        Tag::predefined("f_usability", "usability-friction", Friction),
        Tag::predefined("f_access", "access-barrier", Friction),
        Tag::predefined("f_trust", "trust-friction", Friction),
        Tag::predefined("f_reliability", "reliability-issue", Friction),
        Tag::predefined("f_overload", "overload", Friction),
        Tag::predefined("f_uncertainty", "uncertainty", Friction),
        Tag::predefined("f_inconsistency", "inconsistency", Friction),
        // Impact
        Tag::predefined("i_mental", "mental-fatigue", Impact),
        Tag::predefined("i_decision", "decision-fatigue", Impact),
        Tag::predefined("i_stress", "stress-elevation", Impact),
        Tag::predefined("i_disengage", "disengagement", Impact),
        Tag::predefined("i_reduced", "reduced-performance", Impact),
        Tag::predefined("i_avoidance", "avoidance-behaviour", Impact),
        Tag::predefined("i_satisfaction", "satisfaction", Impact),
        Tag::predefined("i_neutral", "neutral-impact", Impact),
    ]
}

/// The default interview template seeded on first run
pub fn default_template_categories() -> Vec<TemplateCategory> {
    vec![
        TemplateCategory::builtin("cat_context", "Context", false, true),
        TemplateCategory::builtin("cat_decisions", "Decisions", false, true),
        TemplateCategory::builtin("cat_stress", "Stress", true, true),
        TemplateCategory::builtin("cat_coping", "Coping", true, true),
        TemplateCategory::builtin("cat_impact", "Impact", true, true),
    ]
}

/// The combined tag catalog: the predefined list followed by user-created
/// custom tags. Built once per call site and passed by reference into the
/// tagging and insights functions, never held as module state.
#[derive(Debug, Clone)]
pub struct TagCatalog {
    tags: Vec<Tag>,
}

impl TagCatalog {
    /// Predefined catalog plus the given custom tags, in that order
    pub fn with_custom(custom: Vec<Tag>) -> Self {
        let mut tags = predefined_tags();
        tags.extend(custom);
        Self { tags }
    }

    /// Build a catalog from an explicit tag list (tests, imports)
    pub fn from_tags(tags: Vec<Tag>) -> Self {
        Self { tags }
    }

    pub fn get(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for TagCatalog {
    fn default() -> Self {
        Self::with_custom(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_ids_are_unique() {
        let tags = predefined_tags();
        let mut ids: Vec<&str> = tags.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), tags.len());
    }

    #[test]
    fn test_custom_tags_appended_after_predefined() {
        let custom = Tag::new_custom("dark mode", TagCategory::Behaviour);
        let custom_id = custom.id.clone();
        let catalog = TagCatalog::with_custom(vec![custom]);

        assert_eq!(catalog.len(), predefined_tags().len() + 1);
        assert_eq!(catalog.tags().last().unwrap().id, custom_id);
        assert!(catalog.get("f_time").is_some());
        assert!(catalog.get("nope").is_none());
    }
}
