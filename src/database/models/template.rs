// Database models - Template categories
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named section of the interview template and which facets it tracks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateCategory {
    pub id: String,
    pub name: String,
    pub enable_stress: bool,
    pub enable_tags: bool,
}

impl TemplateCategory {
    pub fn new(name: &str, enable_stress: bool, enable_tags: bool) -> Self {
        Self {
            id: format!("cat_{}", Uuid::new_v4().simple()),
            name: name.to_string(),
            enable_stress,
            enable_tags,
        }
    }

    /// Entry of the fixed default template shipped with the app
    pub fn builtin(id: &str, name: &str, enable_stress: bool, enable_tags: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            enable_stress,
            enable_tags,
        }
    }
}

/// Updates that can be applied to a template category
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TemplateCategoryUpdate {
    pub name: Option<String>,
    pub enable_stress: Option<bool>,
    pub enable_tags: Option<bool>,
}
