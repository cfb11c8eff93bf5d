// Segment detection for Fieldnote
// Fixed rule-based cohorts evaluated per interview. Rules live in a decision
// table so new segments can be added without touching aggregation plumbing.

use std::collections::HashSet;

use crate::database::models::Interview;

/// Per-interview view the segment rules evaluate: the union of every tag id
/// used anywhere in the interview, plus the interview's own mean stress.
#[derive(Debug, Clone)]
pub struct InterviewProfile {
    pub tag_ids: HashSet<String>,
    pub mean_stress: f64,
}

impl InterviewProfile {
    pub fn of(interview: &Interview) -> Self {
        let mut tag_ids = HashSet::new();
        let mut stress_sum: i64 = 0;
        let mut stress_count: usize = 0;

        for section in &interview.sections {
            for question in &section.questions {
                for tag_id in &question.tags {
                    if !tag_id.is_empty() {
                        tag_ids.insert(tag_id.clone());
                    }
                }
                if let Some(level) = question.stress_level {
                    stress_sum += i64::from(level);
                    stress_count += 1;
                }
            }
        }

        // Interviews with no stress samples sit at the neutral midpoint so
        // the threshold rules don't exclude them outright
        let mean_stress = if stress_count > 0 {
            stress_sum as f64 / stress_count as f64
        } else {
            3.0
        };

        Self { tag_ids, mean_stress }
    }

    fn has(&self, tag_id: &str) -> bool {
        self.tag_ids.contains(tag_id)
    }
}

/// One named cohort and its membership predicate
pub struct SegmentRule {
    pub name: &'static str,
    pub description: &'static str,
    predicate: fn(&InterviewProfile) -> bool,
}

impl SegmentRule {
    pub fn matches(&self, profile: &InterviewProfile) -> bool {
        (self.predicate)(profile)
    }
}

/// The shipped segment rules, evaluated independently: an interview may
/// belong to several segments or to none.
pub const SEGMENT_RULES: &[SegmentRule] = &[
    SegmentRule {
        name: "Efficiency Seekers",
        description: "Efficiency-motivated participants with routine or habit-driven behaviour",
        predicate: |p| p.has("m_efficiency") && (p.has("b_routine") || p.has("b_habit")),
    },
    SegmentRule {
        name: "High-Friction Users",
        description: "Time or usability friction combined with elevated stress",
        predicate: |p| (p.has("f_time") || p.has("f_usability")) && p.mean_stress > 3.0,
    },
    SegmentRule {
        name: "Workaround Experts",
        description: "Control-seeking participants who build their own workarounds",
        predicate: |p| p.has("b_workaround") && p.has("m_control"),
    },
];
