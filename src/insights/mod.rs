// Insights aggregation for Fieldnote
// Cross-interview statistics for one project: stress averages, tag
// frequencies, top tags per semantic group, and segment membership counts.
// Pure over its inputs and recomputed in full on every render.

pub mod segments;

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::TagCatalog;
use crate::database::models::{Interview, TagCategory, TemplateCategory};
use segments::{InterviewProfile, SEGMENT_RULES};

/// Average stress for one stress-enabled template category
#[derive(Debug, Clone, Serialize)]
pub struct StageStress {
    pub category_id: String,
    pub name: String,
    pub avg_stress: f64,
}

/// One row of the tag frequency table
#[derive(Debug, Clone, Serialize)]
pub struct TagFrequency {
    pub id: String,
    pub name: String,
    /// None when the id no longer resolves in the catalog
    pub category: Option<TagCategory>,
    pub count: usize,
    /// Tag density relative to interview count. Intentionally count over
    /// total interviews, so a tag used on several questions of the same
    /// interview can exceed 100. Not clamped.
    pub percent: u32,
}

/// Membership count for one segment rule
#[derive(Debug, Clone, Serialize)]
pub struct SegmentCount {
    pub name: String,
    pub description: String,
    pub matched: usize,
}

/// Everything the insights surface renders
#[derive(Debug, Clone, Serialize)]
pub struct InsightsResult {
    pub total_interviews: usize,
    /// 0.0 when no question in scope carries a stress level
    pub overall_avg_stress: f64,
    /// One entry per stress-enabled template category, in template order
    pub stage_stress: Vec<StageStress>,
    /// Stress-enabled category with the strictly greatest average; first in
    /// template order wins ties, None when every average is zero
    pub highest_stress_stage: Option<String>,
    /// Sorted descending by count; ties keep first-encounter order
    pub tag_frequency: Vec<TagFrequency>,
    pub top_behaviour_tag: Option<String>,
    pub top_friction_tag: Option<String>,
    pub segment_counts: Vec<SegmentCount>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Aggregate statistics over the interviews of one project.
///
/// The caller pre-filters `interviews` to the project in scope. Total over
/// well-typed input: stale tag ids degrade to unknown rows, sections whose
/// category id no longer resolves still contribute notes and stress to the
/// overall figures, and every mean is zero-guarded.
pub fn compute_insights(
    interviews: &[Interview],
    catalog: &TagCatalog,
    template_categories: &[TemplateCategory],
) -> InsightsResult {
    let total_interviews = interviews.len();

    let mut stress_sum: i64 = 0;
    let mut stress_count: usize = 0;
    let mut stage_sum: HashMap<&str, i64> = HashMap::new();
    let mut stage_count: HashMap<&str, usize> = HashMap::new();

    // Counts in first-encounter order; the index map avoids a linear scan
    let mut tag_counts: Vec<(String, usize)> = Vec::new();
    let mut tag_index: HashMap<String, usize> = HashMap::new();

    for interview in interviews {
        for section in &interview.sections {
            for question in &section.questions {
                if let Some(level) = question.stress_level {
                    stress_sum += i64::from(level);
                    stress_count += 1;
                    *stage_sum.entry(section.category_id.as_str()).or_insert(0) +=
                        i64::from(level);
                    *stage_count.entry(section.category_id.as_str()).or_insert(0) += 1;
                }
                for tag_id in &question.tags {
                    if tag_id.is_empty() {
                        continue;
                    }
                    match tag_index.get(tag_id) {
                        Some(&i) => tag_counts[i].1 += 1,
                        None => {
                            tag_index.insert(tag_id.clone(), tag_counts.len());
                            tag_counts.push((tag_id.clone(), 1));
                        }
                    }
                }
            }
        }
    }

    let overall_avg_stress = if stress_count > 0 {
        round1(stress_sum as f64 / stress_count as f64)
    } else {
        0.0
    };

    // Stage averages over stress-enabled categories only. The winner is
    // picked on the unrounded average with a strict comparison, so the first
    // category in template order keeps the title on ties.
    let mut highest_avg = 0.0_f64;
    let mut highest_stress_stage: Option<String> = None;
    let mut stage_stress = Vec::new();
    for category in template_categories.iter().filter(|c| c.enable_stress) {
        let count = stage_count.get(category.id.as_str()).copied().unwrap_or(0);
        let avg = if count > 0 {
            *stage_sum.get(category.id.as_str()).unwrap_or(&0) as f64 / count as f64
        } else {
            0.0
        };
        if avg > highest_avg {
            highest_avg = avg;
            highest_stress_stage = Some(category.name.clone());
        }
        stage_stress.push(StageStress {
            category_id: category.id.clone(),
            name: category.name.clone(),
            avg_stress: round1(avg),
        });
    }

    let mut tag_frequency: Vec<TagFrequency> = tag_counts
        .iter()
        .map(|(id, count)| {
            let tag = catalog.get(id);
            let percent = if total_interviews > 0 {
                (*count as f64 / total_interviews as f64 * 100.0).round() as u32
            } else {
                0
            };
            TagFrequency {
                id: id.clone(),
                name: tag.map(|t| t.name.clone()).unwrap_or_else(|| id.clone()),
                category: tag.map(|t| t.category),
                count: *count,
                percent,
            }
        })
        .collect();
    // Stable sort keeps encounter order between equal counts
    tag_frequency.sort_by(|a, b| b.count.cmp(&a.count));

    let mut top_behaviour: Option<(String, usize)> = None;
    let mut top_friction: Option<(String, usize)> = None;
    for (id, count) in &tag_counts {
        let Some(tag) = catalog.get(id) else {
            continue;
        };
        let slot = match tag.category {
            TagCategory::Behaviour => &mut top_behaviour,
            TagCategory::Friction => &mut top_friction,
            _ => continue,
        };
        // Strict comparison: first-encountered tag wins ties
        if slot.as_ref().map_or(true, |(_, best)| *count > *best) {
            *slot = Some((tag.name.clone(), *count));
        }
    }

    let mut segment_counts: Vec<SegmentCount> = SEGMENT_RULES
        .iter()
        .map(|rule| SegmentCount {
            name: rule.name.to_string(),
            description: rule.description.to_string(),
            matched: 0,
        })
        .collect();
    for interview in interviews {
        let profile = InterviewProfile::of(interview);
        for (rule, entry) in SEGMENT_RULES.iter().zip(segment_counts.iter_mut()) {
            if rule.matches(&profile) {
                entry.matched += 1;
            }
        }
    }

    InsightsResult {
        total_interviews,
        overall_avg_stress,
        stage_stress,
        highest_stress_stage,
        tag_frequency,
        top_behaviour_tag: top_behaviour.map(|(name, _)| name),
        top_friction_tag: top_friction.map(|(name, _)| name),
        segment_counts,
    }
}
