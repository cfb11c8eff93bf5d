// Database models - Re-exports all domain-specific models
//
// This module is split into focused files by domain:
// - project.rs: Research projects
// - interview.rs: Interviews, sections, and questions
// - tag.rs: Behavioural tags
// - template.rs: Interview template categories
// - settings.rs: Application settings

mod interview;
mod project;
mod settings;
mod tag;
mod template;

pub use interview::{
    Interview, InterviewMetadata, InterviewMode, InterviewSection, Question, QuestionUpdate,
};
pub use project::{Project, ProjectUpdate};
pub use settings::Setting;
pub use tag::{normalize_tag_name, Tag, TagCategory};
pub use template::{TemplateCategory, TemplateCategoryUpdate};
