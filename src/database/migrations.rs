// Database migrations for Fieldnote
// Creates and updates the database schema

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::catalog::default_template_categories;

/// Current schema version
const SCHEMA_VERSION: i32 = 2;

/// Run all necessary migrations to bring the database up to date
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
    }

    if current_version < 2 {
        migrate_v2(conn)?;
    }

    log::debug!("Database schema at version {}", SCHEMA_VERSION);
    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    // Check if schema_version table exists
    let table_exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_version'",
        [],
        |row| row.get(0),
    ).unwrap_or(false);

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT MAX(version) FROM schema_version",
        [],
        |row| row.get(0),
    ).unwrap_or(0);

    Ok(version)
}

fn record_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        params![version],
    ).context("Failed to record schema version")?;
    Ok(())
}

/// Initial schema creation (version 1)
fn migrate_v1(conn: &Connection) -> Result<()> {
    log::info!("Running migration v1: initial schema");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL,
            applied_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS interviews (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            participant_id TEXT NOT NULL,
            date TEXT NOT NULL,
            city TEXT NOT NULL DEFAULT '',
            mode TEXT NOT NULL DEFAULT 'Live',
            duration TEXT NOT NULL DEFAULT '',
            sections TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS custom_tags (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS template_categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            enable_stress INTEGER NOT NULL DEFAULT 0,
            enable_tags INTEGER NOT NULL DEFAULT 1,
            position INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ).context("Failed to create initial schema")?;

    // Seed the default interview template on first run
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM template_categories",
        [],
        |row| row.get(0),
    ).context("Failed to count template categories")?;

    if count == 0 {
        for (position, category) in default_template_categories().iter().enumerate() {
            conn.execute(
                r#"
                INSERT INTO template_categories (id, name, enable_stress, enable_tags, position)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    category.id,
                    category.name,
                    category.enable_stress as i32,
                    category.enable_tags as i32,
                    position as i64,
                ],
            ).context("Failed to seed default template category")?;
        }
    }

    record_version(conn, 1)
}

/// Index interviews by project for the per-project list and insights scope (version 2)
fn migrate_v2(conn: &Connection) -> Result<()> {
    log::info!("Running migration v2: interview project index");

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_interviews_project ON interviews(project_id);",
    ).context("Failed to create interview project index")?;

    record_version(conn, 2)
}
