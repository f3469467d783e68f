//! SQLite-backed saved-form library.
//!
//! Schema: `saved_forms(id TEXT PRIMARY KEY, body TEXT NOT NULL)` where `body`
//! is a serialized `FormTemplate`. The table is created on first access.
//! Entries are free-form, so category and type tag are often missing.

use common::engine::catalogue::SavedFormLibrary;
use common::model::template::FormTemplate;
use include_dir::{include_dir, Dir};
use log::{error, info, warn};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use crate::services::templates::catalogue::{json_files, parse_template_files};

/// Starter entries written into an empty library.
static SEED_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/data/saved_forms");

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS saved_forms (id TEXT PRIMARY KEY, body TEXT NOT NULL)";

#[derive(Debug, Clone)]
pub struct SqliteLibrary {
    path: PathBuf,
}

impl SqliteLibrary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection, String> {
        let conn = Connection::open(&self.path).map_err(|e| e.to_string())?;
        conn.execute(CREATE_TABLE, []).map_err(|e| e.to_string())?;
        Ok(conn)
    }

    /// Reads every row in insertion order. Unparsable bodies are skipped.
    pub fn load(&self) -> Result<Vec<FormTemplate>, String> {
        let conn = self.open()?;
        let mut stmt = conn
            .prepare("SELECT id, body FROM saved_forms ORDER BY rowid")
            .map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(|e| e.to_string())?;

        let mut templates = Vec::new();
        for row in rows {
            let (id, body) = row.map_err(|e| e.to_string())?;
            match serde_json::from_str::<FormTemplate>(&body) {
                Ok(template) => templates.push(template),
                Err(e) => warn!("Skipping saved form `{}`: {}", id, e),
            }
        }
        Ok(templates)
    }

    /// Inserts or replaces the row keyed by the template id.
    pub fn save(&self, template: &FormTemplate) -> Result<(), String> {
        let conn = self.open()?;
        let body = serde_json::to_string(template).map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT OR REPLACE INTO saved_forms (id, body) VALUES (?1, ?2)",
            params![template.id, body],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn count(&self) -> Result<usize, String> {
        let conn = self.open()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM saved_forms", [], |row| row.get(0))
            .map_err(|e| e.to_string())?;
        Ok(count as usize)
    }

    /// Writes `templates` only when the library has no rows yet. Returns how many were written.
    pub fn seed_if_empty(&self, templates: &[FormTemplate]) -> Result<usize, String> {
        if self.count()? > 0 {
            return Ok(0);
        }
        for template in templates {
            self.save(template)?;
        }
        Ok(templates.len())
    }

    /// Seeds an empty library with the starter entries compiled into the binary.
    pub fn seed_with_starters(&self) -> Result<usize, String> {
        let starters = parse_template_files(json_files(&SEED_DIR));
        let written = self.seed_if_empty(&starters)?;
        if written > 0 {
            info!("Saved-form library {} seeded with {} entries", self.path.display(), written);
        }
        Ok(written)
    }
}

impl SavedFormLibrary for SqliteLibrary {
    fn list(&self) -> Vec<FormTemplate> {
        self.load().unwrap_or_else(|e| {
            error!("Saved-form library {} unavailable: {}", self.path.display(), e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::engine::filter::TemplateFilter;
    use tempfile::tempdir;

    fn template(id: &str, category: &str) -> FormTemplate {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": id, "category": category, "fields": []
        }))
        .unwrap()
    }

    #[test]
    fn rows_round_trip_in_insertion_order() {
        let dir = tempdir().unwrap();
        let library = SqliteLibrary::new(dir.path().join("forms.sqlite"));

        library.save(&template("B", "Textes Juridiques")).unwrap();
        library.save(&template("A", "Commerce")).unwrap();

        let ids: Vec<String> = library.load().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn unparsable_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let library = SqliteLibrary::new(dir.path().join("forms.sqlite"));
        library.save(&template("ok", "Textes Juridiques")).unwrap();

        let conn = library.open().unwrap();
        conn.execute(
            "INSERT INTO saved_forms (id, body) VALUES ('broken', '{\"id\": 3')",
            [],
        )
        .unwrap();

        let templates = SavedFormLibrary::list(&library);
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id, "ok");
    }

    #[test]
    fn rows_with_null_category_still_load() {
        let dir = tempdir().unwrap();
        let library = SqliteLibrary::new(dir.path().join("forms.sqlite"));
        let conn = library.open().unwrap();
        conn.execute(
            "INSERT INTO saved_forms (id, body) VALUES (?1, ?2)",
            params![
                "s1",
                r#"{"id":"s1","name":"Décret","category":null,"type":"textes_juridiques",
                    "fields":[{"id":"f1","name":"numero","label":"N","options":null}]}"#
            ],
        )
        .unwrap();

        let templates = library.load().unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].fields[0].identifier, "f1");
        assert_eq!(TemplateFilter::saved_legal_texts().apply(&templates).len(), 1);
    }

    #[test]
    fn seeding_only_touches_an_empty_library() {
        let dir = tempdir().unwrap();
        let library = SqliteLibrary::new(dir.path().join("forms.sqlite"));

        let written = library.seed_with_starters().unwrap();
        assert!(written > 0);
        assert_eq!(library.count().unwrap(), written);
        assert_eq!(library.seed_with_starters().unwrap(), 0);

        // The starters include at least one entry the legal-text dialog offers.
        let legal = TemplateFilter::saved_legal_texts().apply(&library.load().unwrap());
        assert!(!legal.is_empty());
    }

    #[test]
    fn unreachable_database_lists_nothing() {
        let dir = tempdir().unwrap();
        // A directory path cannot be opened as a database file.
        let library = SqliteLibrary::new(dir.path());
        assert!(library.load().is_err());
        assert!(SavedFormLibrary::list(&library).is_empty());
    }
}
