// Template repository for Fieldnote
// Persists the ordered interview template categories

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::{TemplateCategory, TemplateCategoryUpdate};
use super::DatabaseManager;

impl DatabaseManager {
    /// Get all template categories in template order
    pub fn list_template_categories(&self) -> Result<Vec<TemplateCategory>> {
        self.with_connection(|conn| {
            list_template_categories_impl(conn)
        })
    }

    /// Replace the whole template with the given ordered list
    pub fn save_template_categories(&self, categories: &[TemplateCategory]) -> Result<()> {
        self.with_connection(|conn| {
            save_template_categories_impl(conn, categories)
        })
    }

    /// Update one category's name and/or facets
    pub fn update_template_category(
        &self,
        id: &str,
        update: &TemplateCategoryUpdate,
    ) -> Result<()> {
        self.with_connection(|conn| {
            update_template_category_impl(conn, id, update)
        })
    }
}

fn list_template_categories_impl(conn: &Connection) -> Result<Vec<TemplateCategory>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, enable_stress, enable_tags FROM template_categories ORDER BY position ASC"
    ).context("Failed to prepare list_template_categories query")?;

    let categories = stmt.query_map([], |row| {
        Ok(TemplateCategory {
            id: row.get(0)?,
            name: row.get(1)?,
            enable_stress: row.get::<_, i32>(2)? == 1,
            enable_tags: row.get::<_, i32>(3)? == 1,
        })
    }).context("Failed to query template categories")?;

    categories.collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to collect template categories")
}

fn save_template_categories_impl(
    conn: &Connection,
    categories: &[TemplateCategory],
) -> Result<()> {
    conn.execute("DELETE FROM template_categories", [])
        .context("Failed to clear template categories")?;

    for (position, category) in categories.iter().enumerate() {
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
        ).context("Failed to insert template category")?;
    }

    log::info!("Saved template with {} categories", categories.len());
    Ok(())
}

fn update_template_category_impl(
    conn: &Connection,
    id: &str,
    update: &TemplateCategoryUpdate,
) -> Result<()> {
    if let Some(ref name) = update.name {
        conn.execute(
            "UPDATE template_categories SET name = ?1 WHERE id = ?2",
            params![name, id],
        ).context("Failed to update template category name")?;
    }
    if let Some(enable_stress) = update.enable_stress {
        conn.execute(
            "UPDATE template_categories SET enable_stress = ?1 WHERE id = ?2",
            params![enable_stress as i32, id],
        ).context("Failed to update template category stress facet")?;
    }
    if let Some(enable_tags) = update.enable_tags {
        conn.execute(
            "UPDATE template_categories SET enable_tags = ?1 WHERE id = ?2",
            params![enable_tags as i32, id],
        ).context("Failed to update template category tags facet")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_db() -> (DatabaseManager, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        (DatabaseManager::new(db_path).unwrap(), dir)
    }

    #[test]
    fn test_defaults_seeded_in_order() {
        let (db, _dir) = create_test_db();

        let categories = db.list_template_categories().unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["Context", "Decisions", "Stress", "Coping", "Impact"]);
        assert!(!categories[0].enable_stress);
        assert!(categories[2].enable_stress);
    }

    #[test]
    fn test_save_replaces_template_preserving_order() {
        let (db, _dir) = create_test_db();

        let template = vec![
            TemplateCategory::new("Warmup", false, false),
            TemplateCategory::new("Deep dive", true, true),
        ];
        db.save_template_categories(&template).unwrap();

        let reloaded = db.list_template_categories().unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[0].name, "Warmup");
        assert_eq!(reloaded[1].name, "Deep dive");
    }

    #[test]
    fn test_update_category_facets() {
        let (db, _dir) = create_test_db();

        db.update_template_category(
            "cat_context",
            &TemplateCategoryUpdate {
                enable_stress: Some(true),
                ..Default::default()
            },
        ).unwrap();

        let categories = db.list_template_categories().unwrap();
        let context = categories.iter().find(|c| c.id == "cat_context").unwrap();
        assert!(context.enable_stress);
        assert_eq!(context.name, "Context");
    }
}
