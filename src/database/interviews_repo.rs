// Interviews repository for Fieldnote
// Handles persistence of interviews; sections and questions are stored as a
// JSON snapshot per interview row

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

use super::models::{Interview, InterviewMetadata, InterviewMode, TemplateCategory};
use super::DatabaseManager;

impl DatabaseManager {
    /// Get all interviews of a project, newest first
    pub fn list_interviews(&self, project_id: &str) -> Result<Vec<Interview>> {
        self.with_connection(|conn| {
            list_interviews_impl(conn, project_id)
        })
    }

    /// Get an interview by ID
    pub fn get_interview(&self, id: &str) -> Result<Option<Interview>> {
        self.with_connection(|conn| {
            get_interview_impl(conn, id)
        })
    }

    /// Create a new interview seeded from the template. The participant id is
    /// numbered P1, P2, ... within the project.
    pub fn create_interview(
        &self,
        project_id: &str,
        categories: &[TemplateCategory],
    ) -> Result<Interview> {
        self.with_connection(|conn| {
            create_interview_impl(conn, project_id, categories)
        })
    }

    /// Persist the full current snapshot of an interview
    pub fn save_interview(&self, interview: &Interview) -> Result<()> {
        self.with_connection(|conn| {
            save_interview_impl(conn, interview)
        })
    }

    /// Delete an interview
    pub fn delete_interview(&self, id: &str) -> Result<()> {
        self.with_connection(|conn| {
            delete_interview_impl(conn, id)
        })
    }

    /// Rebuild the sections of every interview in a project against an edited
    /// template: existing sections survive, new categories get empty sections,
    /// removed categories are dropped
    pub fn apply_template_to_project(
        &self,
        project_id: &str,
        categories: &[TemplateCategory],
    ) -> Result<()> {
        self.with_connection(|conn| {
            let interviews = list_interviews_impl(conn, project_id)?;
            for mut interview in interviews {
                interview.normalize_sections(categories);
                save_interview_impl(conn, &interview)?;
            }
            Ok(())
        })
    }
}

fn row_to_interview(row: &Row) -> rusqlite::Result<Interview> {
    let id: String = row.get(0)?;
    let mode_str: String = row.get(5)?;
    let sections_json: String = row.get(7)?;

    // A malformed sections blob degrades to an empty interview rather than
    // failing the whole listing
    let sections = match serde_json::from_str(&sections_json) {
        Ok(sections) => sections,
        Err(e) => {
            log::warn!("Failed to parse sections for interview {}: {}", id, e);
            Vec::new()
        }
    };

    Ok(Interview {
        id,
        project_id: row.get(1)?,
        metadata: InterviewMetadata {
            participant_id: row.get(2)?,
            date: row.get(3)?,
            city: row.get(4)?,
            mode: InterviewMode::parse(&mode_str).unwrap_or(InterviewMode::Live),
            duration: row.get(6)?,
        },
        sections,
    })
}

const INTERVIEW_COLUMNS: &str =
    "id, project_id, participant_id, date, city, mode, duration, sections";

fn list_interviews_impl(conn: &Connection, project_id: &str) -> Result<Vec<Interview>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM interviews WHERE project_id = ?1 ORDER BY created_at DESC",
        INTERVIEW_COLUMNS
    )).context("Failed to prepare list_interviews query")?;

    let interviews = stmt.query_map(params![project_id], row_to_interview)
        .context("Failed to query interviews")?;

    interviews.collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to collect interviews")
}

fn get_interview_impl(conn: &Connection, id: &str) -> Result<Option<Interview>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM interviews WHERE id = ?1",
        INTERVIEW_COLUMNS
    )).context("Failed to prepare get_interview query")?;

    let result = stmt.query_row(params![id], row_to_interview);

    match result {
        Ok(interview) => Ok(Some(interview)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).context("Failed to get interview"),
    }
}

fn create_interview_impl(
    conn: &Connection,
    project_id: &str,
    categories: &[TemplateCategory],
) -> Result<Interview> {
    let existing: i64 = conn.query_row(
        "SELECT COUNT(*) FROM interviews WHERE project_id = ?1",
        params![project_id],
        |row| row.get(0),
    ).context("Failed to count project interviews")?;

    let participant_id = format!("P{}", existing + 1);
    let interview = Interview::new(project_id, &participant_id, categories);
    let sections_json =
        serde_json::to_string(&interview.sections).unwrap_or_else(|_| "[]".to_string());

    conn.execute(
        r#"
        INSERT INTO interviews (id, project_id, participant_id, date, city, mode, duration, sections, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, datetime('now'))
        "#,
        params![
            interview.id,
            interview.project_id,
            interview.metadata.participant_id,
            interview.metadata.date,
            interview.metadata.city,
            interview.metadata.mode.as_str(),
            interview.metadata.duration,
            sections_json,
        ],
    ).context("Failed to insert interview")?;

    log::info!("Created interview {} in project {}", interview.id, project_id);
    Ok(interview)
}

fn save_interview_impl(conn: &Connection, interview: &Interview) -> Result<()> {
    let sections_json =
        serde_json::to_string(&interview.sections).unwrap_or_else(|_| "[]".to_string());

    conn.execute(
        r#"
        INSERT INTO interviews (id, project_id, participant_id, date, city, mode, duration, sections, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, datetime('now'))
        ON CONFLICT(id) DO UPDATE SET
            participant_id = excluded.participant_id,
            date = excluded.date,
            city = excluded.city,
            mode = excluded.mode,
            duration = excluded.duration,
            sections = excluded.sections
        "#,
        params![
            interview.id,
            interview.project_id,
            interview.metadata.participant_id,
            interview.metadata.date,
            interview.metadata.city,
            interview.metadata.mode.as_str(),
            interview.metadata.duration,
            sections_json,
        ],
    ).context("Failed to save interview")?;

    Ok(())
}

fn delete_interview_impl(conn: &Connection, id: &str) -> Result<()> {
    conn.execute(
        "DELETE FROM interviews WHERE id = ?1",
        params![id],
    ).context("Failed to delete interview")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_template_categories;
    use crate::database::models::QuestionUpdate;
    use crate::insights::compute_insights;
    use crate::tagging::auto_tag_note;
    use tempfile::tempdir;

    fn create_test_db() -> (DatabaseManager, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        (DatabaseManager::new(db_path).unwrap(), dir)
    }

    #[test]
    fn test_participants_numbered_per_project() {
        let (db, _dir) = create_test_db();
        let categories = default_template_categories();
        let project = db.create_project("Study", "").unwrap();
        let other = db.create_project("Other", "").unwrap();

        let first = db.create_interview(&project.id, &categories).unwrap();
        let second = db.create_interview(&project.id, &categories).unwrap();
        let elsewhere = db.create_interview(&other.id, &categories).unwrap();

        assert_eq!(first.metadata.participant_id, "P1");
        assert_eq!(second.metadata.participant_id, "P2");
        assert_eq!(elsewhere.metadata.participant_id, "P1");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let (db, _dir) = create_test_db();
        let categories = default_template_categories();
        let project = db.create_project("Study", "").unwrap();

        let mut interview = db.create_interview(&project.id, &categories).unwrap();
        let qid = interview.sections[0].questions[0].id.clone();
        interview.update_question(
            "cat_context",
            &qid,
            QuestionUpdate {
                notes: Some("spreadsheet every day".to_string()),
                ..Default::default()
            },
        );
        interview.metadata.city = "Lisbon".to_string();
        db.save_interview(&interview).unwrap();

        let reloaded = db.get_interview(&interview.id).unwrap().unwrap();
        assert_eq!(reloaded.metadata.city, "Lisbon");
        assert_eq!(reloaded.sections[0].questions[0].notes, "spreadsheet every day");
    }

    #[test]
    fn test_apply_template_normalizes_project_interviews() {
        let (db, _dir) = create_test_db();
        let mut categories = default_template_categories();
        let project = db.create_project("Study", "").unwrap();
        let interview = db.create_interview(&project.id, &categories).unwrap();

        categories.remove(0);
        db.save_template_categories(&categories).unwrap();
        db.apply_template_to_project(&project.id, &categories).unwrap();

        let reloaded = db.get_interview(&interview.id).unwrap().unwrap();
        assert_eq!(reloaded.sections.len(), categories.len());
        assert_eq!(reloaded.sections[0].category_id, categories[0].id);
    }

    #[test]
    fn test_capture_to_insights_flow() {
        let (db, _dir) = create_test_db();
        let categories = db.list_template_categories().unwrap();
        let project = db.create_project("Bills", "").unwrap();
        let catalog = db.load_tag_catalog().unwrap();

        let mut interview = db.create_interview(&project.id, &categories).unwrap();
        let note = "I always copy everything into a spreadsheet, it takes hours";
        let matched = auto_tag_note(note, &catalog);
        let qid = interview.sections[0].questions[0].id.clone();
        interview.update_question(
            "cat_context",
            &qid,
            QuestionUpdate {
                notes: Some(note.to_string()),
                ..Default::default()
            },
        );
        let question = &mut interview.sections[0].questions[0];
        question.merge_tags(matched);
        db.save_interview(&interview).unwrap();

        let interviews = db.list_interviews(&project.id).unwrap();
        let insights = compute_insights(&interviews, &catalog, &categories);

        assert_eq!(insights.total_interviews, 1);
        assert!(insights
            .tag_frequency
            .iter()
            .any(|row| row.id == "b_routine" && row.percent == 100));
        assert!(insights.tag_frequency.iter().any(|row| row.id == "f_time"));
    }
}
