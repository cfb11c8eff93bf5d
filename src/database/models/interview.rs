// Database models - Interviews, sections, and questions
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TemplateCategory;

/// How the interview was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewMode {
    Live,
    Transcript,
}

impl InterviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewMode::Live => "Live",
            InterviewMode::Transcript => "Transcript",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Live" => Some(InterviewMode::Live),
            "Transcript" => Some(InterviewMode::Transcript),
            _ => None,
        }
    }
}

/// Session-level facts about one interview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewMetadata {
    pub participant_id: String,
    pub date: String,
    pub city: String,
    pub mode: InterviewMode,
    pub duration: String,
}

impl InterviewMetadata {
    /// Fresh metadata dated today, defaulting to a live session
    pub fn new(participant_id: &str) -> Self {
        Self {
            participant_id: participant_id.to_string(),
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            city: String::new(),
            mode: InterviewMode::Live,
            duration: String::new(),
        }
    }
}

/// A single prompt with its notes, optional stress rating, and tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub notes: String,
    pub stress_level: Option<i32>,
    pub tags: Vec<String>,
}

impl Question {
    /// Blank question; stress defaults to 3 only where the category tracks it
    pub fn new(enable_stress: bool) -> Self {
        Self {
            id: format!("q_{}", Uuid::new_v4().simple()),
            prompt: String::new(),
            notes: String::new(),
            stress_level: if enable_stress { Some(3) } else { None },
            tags: Vec::new(),
        }
    }

    pub fn apply(&mut self, update: QuestionUpdate) {
        if let Some(prompt) = update.prompt {
            self.prompt = prompt;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        if let Some(level) = update.stress_level {
            self.stress_level = Some(level.clamp(1, 5));
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
    }

    /// Merge auto-tagger output into the tag list. Add-only: existing tags
    /// keep their position and are never removed.
    pub fn merge_tags<I>(&mut self, tag_ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut incoming: Vec<String> = tag_ids
            .into_iter()
            .filter(|id| !self.tags.contains(id))
            .collect();
        incoming.sort();
        incoming.dedup();
        self.tags.extend(incoming);
    }
}

/// Partial question edit
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuestionUpdate {
    pub prompt: Option<String>,
    pub notes: Option<String>,
    pub stress_level: Option<i32>,
    pub tags: Option<Vec<String>>,
}

/// The realization of one template category within one interview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSection {
    pub category_id: String,
    pub questions: Vec<Question>,
}

/// One recorded interview within a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    pub id: String,
    pub project_id: String,
    pub metadata: InterviewMetadata,
    pub sections: Vec<InterviewSection>,
}

impl Interview {
    /// New interview seeded with one blank question per template category
    pub fn new(project_id: &str, participant_id: &str, categories: &[TemplateCategory]) -> Self {
        let sections = categories
            .iter()
            .map(|cat| InterviewSection {
                category_id: cat.id.clone(),
                questions: vec![Question::new(cat.enable_stress)],
            })
            .collect();

        Self {
            id: format!("int_{}", Uuid::new_v4().simple()),
            project_id: project_id.to_string(),
            metadata: InterviewMetadata::new(participant_id),
            sections,
        }
    }

    fn section_mut(&mut self, category_id: &str) -> Option<&mut InterviewSection> {
        self.sections
            .iter_mut()
            .find(|sec| sec.category_id == category_id)
    }

    /// Append a blank question to the category's section. Returns the new
    /// question id, or None when the interview has no such section.
    pub fn add_question(&mut self, category: &TemplateCategory) -> Option<String> {
        let enable_stress = category.enable_stress;
        let section = self.section_mut(&category.id)?;
        let question = Question::new(enable_stress);
        let id = question.id.clone();
        section.questions.push(question);
        Some(id)
    }

    /// Apply a partial edit to one question. Returns false if not found.
    pub fn update_question(
        &mut self,
        category_id: &str,
        question_id: &str,
        update: QuestionUpdate,
    ) -> bool {
        let Some(section) = self.section_mut(category_id) else {
            return false;
        };
        match section.questions.iter_mut().find(|q| q.id == question_id) {
            Some(question) => {
                question.apply(update);
                true
            }
            None => false,
        }
    }

    /// Remove one question. Returns false if not found.
    pub fn delete_question(&mut self, category_id: &str, question_id: &str) -> bool {
        let Some(section) = self.section_mut(category_id) else {
            return false;
        };
        let before = section.questions.len();
        section.questions.retain(|q| q.id != question_id);
        section.questions.len() != before
    }

    /// Copy a question (notes, stress, tags) directly after the original,
    /// under a fresh id. Returns the new id.
    pub fn duplicate_question(&mut self, category_id: &str, question_id: &str) -> Option<String> {
        let section = self.section_mut(category_id)?;
        let index = section.questions.iter().position(|q| q.id == question_id)?;

        let mut copy = section.questions[index].clone();
        copy.id = format!("q_{}", Uuid::new_v4().simple());
        let id = copy.id.clone();
        section.questions.insert(index + 1, copy);
        Some(id)
    }

    /// Rebuild the section list to match an edited template: sections are
    /// reordered to template order, existing ones keep their questions, new
    /// categories get an empty section, removed categories are dropped.
    pub fn normalize_sections(&mut self, categories: &[TemplateCategory]) {
        let sections = categories
            .iter()
            .map(|cat| {
                self.sections
                    .iter()
                    .find(|sec| sec.category_id == cat.id)
                    .cloned()
                    .unwrap_or_else(|| InterviewSection {
                        category_id: cat.id.clone(),
                        questions: Vec::new(),
                    })
            })
            .collect();
        self.sections = sections;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_categories() -> Vec<TemplateCategory> {
        vec![
            TemplateCategory::builtin("cat_context", "Context", false, true),
            TemplateCategory::builtin("cat_stress", "Stress", true, true),
        ]
    }

    #[test]
    fn test_new_interview_seeds_sections() {
        let interview = Interview::new("proj_1", "P1", &sample_categories());

        assert_eq!(interview.sections.len(), 2);
        assert_eq!(interview.sections[0].questions.len(), 1);
        assert_eq!(interview.sections[0].questions[0].stress_level, None);
        assert_eq!(interview.sections[1].questions[0].stress_level, Some(3));
        assert_eq!(interview.metadata.mode, InterviewMode::Live);
    }

    #[test]
    fn test_update_question_partial() {
        let mut interview = Interview::new("proj_1", "P1", &sample_categories());
        let qid = interview.sections[0].questions[0].id.clone();

        let ok = interview.update_question(
            "cat_context",
            &qid,
            QuestionUpdate {
                notes: Some("took too long to find".to_string()),
                ..Default::default()
            },
        );
        assert!(ok);

        let question = &interview.sections[0].questions[0];
        assert_eq!(question.notes, "took too long to find");
        assert_eq!(question.prompt, "");
        assert!(!interview.update_question("cat_context", "q_missing", QuestionUpdate::default()));
    }

    #[test]
    fn test_duplicate_question_inserts_after_original() {
        let mut interview = Interview::new("proj_1", "P1", &sample_categories());
        interview.add_question(&sample_categories()[0]).unwrap();
        let first = interview.sections[0].questions[0].id.clone();

        let copy = interview.duplicate_question("cat_context", &first).unwrap();

        let questions = &interview.sections[0].questions;
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[1].id, copy);
        assert_ne!(questions[0].id, questions[1].id);
    }

    #[test]
    fn test_merge_tags_is_add_only() {
        let mut question = Question::new(false);
        question.tags = vec!["f_time".to_string()];

        question.merge_tags(vec!["b_routine".to_string(), "f_time".to_string()]);

        assert_eq!(question.tags, vec!["f_time", "b_routine"]);
    }

    #[test]
    fn test_normalize_sections_keeps_existing_questions() {
        let mut interview = Interview::new("proj_1", "P1", &sample_categories());
        interview.sections[1].questions[0].notes = "keep me".to_string();

        let mut edited = sample_categories();
        edited.remove(0);
        edited.push(TemplateCategory::builtin("cat_new", "Coping", true, true));
        interview.normalize_sections(&edited);

        assert_eq!(interview.sections.len(), 2);
        assert_eq!(interview.sections[0].category_id, "cat_stress");
        assert_eq!(interview.sections[0].questions[0].notes, "keep me");
        assert!(interview.sections[1].questions.is_empty());
    }

    #[test]
    fn test_stress_update_clamped() {
        let mut question = Question::new(true);
        question.apply(QuestionUpdate {
            stress_level: Some(9),
            ..Default::default()
        });
        assert_eq!(question.stress_level, Some(5));
    }
}
