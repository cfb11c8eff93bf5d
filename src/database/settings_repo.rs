// Settings repository for Fieldnote
// Small key/value store for app flags

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::Setting;
use super::DatabaseManager;

const ONBOARDING_KEY: &str = "onboarding_completed";

impl DatabaseManager {
    /// Get a single setting by key
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            get_setting_impl(conn, key)
        })
    }

    /// Set a single setting
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_connection(|conn| {
            set_setting_impl(conn, key, value)
        })
    }

    /// Get all settings
    pub fn list_settings(&self) -> Result<Vec<Setting>> {
        self.with_connection(|conn| {
            list_settings_impl(conn)
        })
    }

    /// Delete a setting by key
    pub fn delete_setting(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            delete_setting_impl(conn, key)
        })
    }

    /// Set a boolean setting
    pub fn set_bool_setting(&self, key: &str, value: bool) -> Result<()> {
        self.set_setting(key, if value { "true" } else { "false" })
    }

    /// Get a boolean setting
    pub fn get_bool_setting(&self, key: &str, default: bool) -> Result<bool> {
        match self.get_setting(key)? {
            Some(v) => Ok(v == "true"),
            None => Ok(default),
        }
    }

    /// Whether the researcher finished the first-run walkthrough
    pub fn onboarding_completed(&self) -> Result<bool> {
        self.get_bool_setting(ONBOARDING_KEY, false)
    }

    pub fn set_onboarding_completed(&self, completed: bool) -> Result<()> {
        self.set_bool_setting(ONBOARDING_KEY, completed)
    }
}

fn get_setting_impl(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare(
        "SELECT value FROM settings WHERE key = ?"
    ).context("Failed to prepare get_setting query")?;

    let result = stmt.query_row(params![key], |row| row.get(0));

    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).context("Failed to get setting"),
    }
}

fn set_setting_impl(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?1, ?2, datetime('now'))
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = datetime('now')
        "#,
        params![key, value],
    ).context("Failed to set setting")?;

    Ok(())
}

fn list_settings_impl(conn: &Connection) -> Result<Vec<Setting>> {
    let mut stmt = conn.prepare(
        "SELECT key, value, updated_at FROM settings"
    ).context("Failed to prepare list_settings query")?;

    let settings = stmt.query_map([], |row| {
        Ok(Setting {
            key: row.get(0)?,
            value: row.get(1)?,
            updated_at: row.get(2)?,
        })
    }).context("Failed to query settings")?;

    settings.collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to collect settings")
}

fn delete_setting_impl(conn: &Connection, key: &str) -> Result<()> {
    conn.execute(
        "DELETE FROM settings WHERE key = ?",
        params![key],
    ).context("Failed to delete setting")?;

    Ok(())
}
