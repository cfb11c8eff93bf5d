// Tags repository for Fieldnote
// Persists the append-only list of user-created tags; the predefined catalog
// ships in code and is concatenated at load time

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::catalog::TagCatalog;

use super::models::{Tag, TagCategory};
use super::DatabaseManager;

impl DatabaseManager {
    /// Get all custom tags in creation order
    pub fn list_custom_tags(&self) -> Result<Vec<Tag>> {
        self.with_connection(|conn| {
            list_custom_tags_impl(conn)
        })
    }

    /// Create a custom tag; the name is normalized to lowercase-hyphenated
    pub fn create_custom_tag(&self, name: &str, category: TagCategory) -> Result<Tag> {
        self.with_connection(|conn| {
            create_custom_tag_impl(conn, name, category)
        })
    }

    /// Delete a custom tag. Stale references on questions degrade to unknown
    /// tags in aggregation, so no cleanup pass over interviews is needed.
    pub fn delete_custom_tag(&self, id: &str) -> Result<()> {
        self.with_connection(|conn| {
            delete_custom_tag_impl(conn, id)
        })
    }

    /// Load the combined catalog: predefined tags followed by custom tags
    pub fn load_tag_catalog(&self) -> Result<TagCatalog> {
        Ok(TagCatalog::with_custom(self.list_custom_tags()?))
    }
}

fn list_custom_tags_impl(conn: &Connection) -> Result<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category FROM custom_tags ORDER BY created_at ASC"
    ).context("Failed to prepare list_custom_tags query")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    }).context("Failed to query custom tags")?;

    let mut tags = Vec::new();
    for row in rows {
        let (id, name, category) = row.context("Failed to read custom tag row")?;
        // Rows with an unrecognized category are skipped, not fatal
        match TagCategory::parse(&category) {
            Some(category) => tags.push(Tag {
                id,
                name,
                category,
                is_custom: true,
            }),
            None => log::warn!("Skipping custom tag {} with unknown category {}", id, category),
        }
    }
    Ok(tags)
}

fn create_custom_tag_impl(conn: &Connection, name: &str, category: TagCategory) -> Result<Tag> {
    let tag = Tag::new_custom(name, category);

    conn.execute(
        r#"
        INSERT INTO custom_tags (id, name, category, created_at)
        VALUES (?1, ?2, ?3, datetime('now'))
        "#,
        params![tag.id, tag.name, tag.category.as_str()],
    ).context("Failed to insert custom tag")?;

    log::info!("Created custom tag {} ({})", tag.id, tag.name);
    Ok(tag)
}

fn delete_custom_tag_impl(conn: &Connection, id: &str) -> Result<()> {
    conn.execute(
        "DELETE FROM custom_tags WHERE id = ?1",
        params![id],
    ).context("Failed to delete custom tag")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::predefined_tags;
    use tempfile::tempdir;

    fn create_test_db() -> (DatabaseManager, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        (DatabaseManager::new(db_path).unwrap(), dir)
    }

    #[test]
    fn test_create_and_list_custom_tags() {
        let (db, _dir) = create_test_db();

        let tag = db.create_custom_tag("Dark Mode", TagCategory::Behaviour).unwrap();
        assert_eq!(tag.name, "dark-mode");

        let tags = db.list_custom_tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, tag.id);
        assert!(tags[0].is_custom);
    }

    #[test]
    fn test_catalog_concatenates_predefined_and_custom() {
        let (db, _dir) = create_test_db();
        let custom = db.create_custom_tag("spreadsheet power user", TagCategory::Behaviour).unwrap();

        let catalog = db.load_tag_catalog().unwrap();

        assert_eq!(catalog.len(), predefined_tags().len() + 1);
        assert!(catalog.get("f_time").is_some());
        assert_eq!(catalog.get(&custom.id).unwrap().name, "spreadsheet-power-user");
    }

    #[test]
    fn test_delete_custom_tag() {
        let (db, _dir) = create_test_db();
        let tag = db.create_custom_tag("temp", TagCategory::Impact).unwrap();

        db.delete_custom_tag(&tag.id).unwrap();

        assert!(db.list_custom_tags().unwrap().is_empty());
    }
}
