// Database models - Projects
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level research project owning zero or more interviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
}

impl Project {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            id: format!("proj_{}", Uuid::new_v4().simple()),
            name: name.to_string(),
            description: description.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Updates that can be applied to a project
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
