// Projects repository for Fieldnote
// Handles CRUD operations for research projects

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::{Project, ProjectUpdate};
use super::DatabaseManager;

impl DatabaseManager {
    /// Get all projects, newest first
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        self.with_connection(|conn| {
            list_projects_impl(conn)
        })
    }

    /// Get a project by ID
    pub fn get_project(&self, id: &str) -> Result<Option<Project>> {
        self.with_connection(|conn| {
            get_project_impl(conn, id)
        })
    }

    /// Create a new project
    pub fn create_project(&self, name: &str, description: &str) -> Result<Project> {
        self.with_connection(|conn| {
            create_project_impl(conn, name, description)
        })
    }

    /// Update a project's name and/or description
    pub fn update_project(&self, id: &str, update: &ProjectUpdate) -> Result<()> {
        self.with_connection(|conn| {
            update_project_impl(conn, id, update)
        })
    }

    /// Delete a project and, via cascade, all of its interviews
    pub fn delete_project(&self, id: &str) -> Result<()> {
        self.with_connection(|conn| {
            delete_project_impl(conn, id)
        })
    }
}

fn list_projects_impl(conn: &Connection) -> Result<Vec<Project>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, created_at FROM projects ORDER BY created_at DESC"
    ).context("Failed to prepare list_projects query")?;

    let projects = stmt.query_map([], |row| {
        Ok(Project {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: row.get(3)?,
        })
    }).context("Failed to query projects")?;

    projects.collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to collect projects")
}

fn get_project_impl(conn: &Connection, id: &str) -> Result<Option<Project>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, created_at FROM projects WHERE id = ?1"
    ).context("Failed to prepare get_project query")?;

    let result = stmt.query_row(params![id], |row| {
        Ok(Project {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: row.get(3)?,
        })
    });

    match result {
        Ok(project) => Ok(Some(project)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).context("Failed to get project"),
    }
}

fn create_project_impl(conn: &Connection, name: &str, description: &str) -> Result<Project> {
    let project = Project::new(name, description);

    conn.execute(
        "INSERT INTO projects (id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![project.id, project.name, project.description, project.created_at],
    ).context("Failed to insert project")?;

    log::info!("Created project {} ({})", project.id, project.name);
    Ok(project)
}

fn update_project_impl(conn: &Connection, id: &str, update: &ProjectUpdate) -> Result<()> {
    if let Some(ref name) = update.name {
        conn.execute(
            "UPDATE projects SET name = ?1 WHERE id = ?2",
            params![name, id],
        ).context("Failed to update project name")?;
    }
    if let Some(ref description) = update.description {
        conn.execute(
            "UPDATE projects SET description = ?1 WHERE id = ?2",
            params![description, id],
        ).context("Failed to update project description")?;
    }
    Ok(())
}

fn delete_project_impl(conn: &Connection, id: &str) -> Result<()> {
    let deleted = conn.execute(
        "DELETE FROM projects WHERE id = ?1",
        params![id],
    ).context("Failed to delete project")?;

    if deleted > 0 {
        log::info!("Deleted project {} and its interviews", id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_template_categories;
    use tempfile::tempdir;

    fn create_test_db() -> (DatabaseManager, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        (DatabaseManager::new(db_path).unwrap(), dir)
    }

    #[test]
    fn test_create_and_get_project() {
        let (db, _dir) = create_test_db();

        let project = db.create_project("Bill payments study", "How people pay bills").unwrap();
        let retrieved = db.get_project(&project.id).unwrap().unwrap();

        assert_eq!(retrieved.name, "Bill payments study");
        assert_eq!(retrieved.description, "How people pay bills");
        assert!(db.get_project("proj_missing").unwrap().is_none());
    }

    #[test]
    fn test_update_project_partial() {
        let (db, _dir) = create_test_db();
        let project = db.create_project("Draft", "").unwrap();

        db.update_project(
            &project.id,
            &ProjectUpdate {
                name: Some("Renamed".to_string()),
                description: None,
            },
        ).unwrap();

        let retrieved = db.get_project(&project.id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Renamed");
        assert_eq!(retrieved.description, "");
    }

    #[test]
    fn test_delete_project_cascades_interviews() {
        let (db, _dir) = create_test_db();
        let categories = default_template_categories();

        let project = db.create_project("Doomed", "").unwrap();
        let interview = db.create_interview(&project.id, &categories).unwrap();

        db.delete_project(&project.id).unwrap();

        assert!(db.get_project(&project.id).unwrap().is_none());
        assert!(db.get_interview(&interview.id).unwrap().is_none());
    }
}
