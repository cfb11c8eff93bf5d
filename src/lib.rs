// Fieldnote - local-first qualitative research notebook engine
//
// Everything runs offline against a local SQLite file:
// - Structured interview templates with per-category stress and tag facets
// - Keyword-based auto-tagging of free-text notes (no model, no network)
// - Cross-interview insights: stress averages, tag frequencies, and
//   rule-based participant segments

pub mod catalog;
pub mod database;
pub mod insights;
pub mod tagging;

pub use catalog::{default_template_categories, predefined_tags, TagCatalog};
pub use database::DatabaseManager;
pub use insights::{compute_insights, InsightsResult};
pub use tagging::{auto_tag_note, is_leading_question, suggest_tags};
