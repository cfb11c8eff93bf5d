// Database module for Fieldnote
// Provides SQLite persistence for projects, interviews, tags, the interview
// template, and settings

pub mod manager;
pub mod migrations;
pub mod models;
pub mod projects_repo;
pub mod interviews_repo;
pub mod tags_repo;
pub mod template_repo;
pub mod settings_repo;

pub use manager::DatabaseManager;
pub use models::*;
