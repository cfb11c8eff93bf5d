// Database models - Application settings
use serde::{Deserialize, Serialize};

/// A single key/value setting row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}
