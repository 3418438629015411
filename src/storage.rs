use std::{
    fs,
    path::Path,
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use log::{debug, error, info, trace, warn};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::{Category, Note, NoteDraft, NotesError, Project, Result};

/// Starter projects inserted on first run, with their descriptions
pub const SEED_PROJECTS: &[(&str, &str)] = &[
    ("Work", "Tasks and meetings for the day job"),
    ("Personal", "Errands, health and household"),
    ("Hobbies", "Side projects and things done for fun"),
    ("General", "Everything that fits nowhere else"),
];

/// Starter categories inserted on first run
pub const SEED_CATEGORIES: &[&str] = &["Urgent", "Important", "Optional"];

/// Which starter categories each starter project offers
pub const SEED_ASSOCIATIONS: &[(&str, &[&str])] = &[
    ("Work", &["Urgent", "Important"]),
    ("Personal", &["Important", "Optional"]),
    ("Hobbies", &["Optional"]),
    ("General", &["Urgent", "Important", "Optional"]),
];

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS project_categories (
        project_id INTEGER NOT NULL REFERENCES projects(id),
        category_id INTEGER NOT NULL REFERENCES categories(id),
        PRIMARY KEY (project_id, category_id)
    );
    CREATE TABLE IF NOT EXISTS notes (
        id TEXT NOT NULL PRIMARY KEY,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        total_time TEXT NOT NULL DEFAULT '',
        project_id INTEGER NOT NULL REFERENCES projects(id),
        category_id INTEGER REFERENCES categories(id),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

const NOTE_SELECT: &str = "
    SELECT n.id, n.title, n.body, n.total_time, n.created_at, n.updated_at,
           p.id, p.name, p.description, p.created_at, p.updated_at,
           c.id, c.name
    FROM notes n
    JOIN projects p ON p.id = n.project_id
    LEFT JOIN categories c ON c.id = n.category_id";

const NOTE_UPSERT: &str = "
    INSERT INTO notes (id, title, body, total_time, project_id, category_id, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    ON CONFLICT(id) DO UPDATE SET
        title = excluded.title,
        body = excluded.body,
        total_time = excluded.total_time,
        project_id = excluded.project_id,
        category_id = excluded.category_id,
        updated_at = excluded.updated_at";

const PROJECT_SELECT: &str = "SELECT id, name, description, created_at, updated_at FROM projects";

/// Durable storage for notes, projects and categories.
///
/// Wraps a single SQLite connection. Every public operation takes the lock
/// for its whole duration, so the store is safe for sequential use from the
/// foreground loop and background tasks alike.
pub struct NoteStore {
    conn: Mutex<Connection>,
}

impl NoteStore {
    /// Opens or creates the database file at `path`, creating parent directories as needed.
    ///
    /// The schema is not touched; call [`NoteStore::initialize`] afterwards.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating database directory: {}", parent.display());
                fs::create_dir_all(parent).map_err(|e| {
                    error!("Failed to create database directory: {}", e);
                    NotesError::DirectoryError {
                        path: parent.to_path_buf(),
                    }
                })?;
            }
        }

        info!("Opening note store at {}", path.display());
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| NotesError::LockAcquisitionFailed {
                message: format!("Failed to acquire lock on database connection: {}", e),
            })
    }

    /// Creates the schema if absent and seeds the starter projects and categories.
    ///
    /// Safe to call on every startup: existing rows are left alone.
    pub fn initialize(&self) -> Result<()> {
        info!("Initializing note store schema");
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;
        seed(&tx)?;
        tx.commit()?;
        info!("Note store ready");
        Ok(())
    }

    /// Returns every note joined with its project and category, in storage order.
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        let conn = self.conn()?;
        let notes = query_notes(&conn, "ORDER BY n.rowid", params![])?;
        debug!("Listed {} notes", notes.len());
        Ok(notes)
    }

    pub fn list_notes_by_project(&self, project_id: i64) -> Result<Vec<Note>> {
        let conn = self.conn()?;
        query_notes(
            &conn,
            "WHERE n.project_id = ?1 ORDER BY n.rowid",
            params![project_id],
        )
    }

    /// Returns the notes created on the given UTC calendar day.
    pub fn list_notes_by_date(&self, date: NaiveDate) -> Result<Vec<Note>> {
        let conn = self.conn()?;
        query_notes(
            &conn,
            "WHERE substr(n.created_at, 1, 10) = ?1 ORDER BY n.rowid",
            params![date.format("%Y-%m-%d").to_string()],
        )
    }

    pub fn get_note(&self, id: &str) -> Result<Option<Note>> {
        let conn = self.conn()?;
        select_note(&conn, id)
    }

    /// Inserts or updates a note, keyed by its id.
    ///
    /// A draft without an id gets a fresh UUID and both timestamps set to now.
    /// A draft with an id keeps its stored `created_at` and gets a new
    /// `updated_at`. Every other column is overwritten unconditionally.
    pub fn save_note(
        &self,
        draft: &NoteDraft,
        project_id: i64,
        category_id: Option<i64>,
    ) -> Result<Note> {
        let now = Utc::now();
        let (id, created_at) = match draft.existing_id() {
            Some(id) => (id.to_string(), draft.created_at.unwrap_or(now)),
            None => (Uuid::new_v4().to_string(), now),
        };
        info!("Saving note: {}", id);

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        if select_project(&tx, "WHERE id = ?1", params![project_id])?.is_none() {
            warn!("Refusing to save note {} into unknown project {}", id, project_id);
            return Err(NotesError::ProjectNotFound { id: project_id });
        }
        if let Some(category_id) = category_id {
            if !is_associated(&tx, project_id, category_id)? {
                warn!(
                    "Refusing to save note {}: category {} not offered by project {}",
                    id, category_id, project_id
                );
                return Err(NotesError::CategoryNotInProject {
                    project_id,
                    category_id,
                });
            }
        }

        tx.execute(
            NOTE_UPSERT,
            params![
                id,
                draft.title,
                draft.body,
                draft.total_time,
                project_id,
                category_id,
                format_timestamp(created_at),
                format_timestamp(now),
            ],
        )?;
        let note = select_note(&tx, &id)?.ok_or_else(|| NotesError::NoteNotFound { id: id.clone() })?;
        tx.commit()?;

        info!("Note saved successfully: {}", note.id);
        Ok(note)
    }

    /// Deletes a note by id. Deleting a missing note is not an error.
    pub fn delete_note(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
        if removed == 0 {
            debug!("Delete of note {} matched no rows", id);
        } else {
            info!("Deleted note: {}", id);
        }
        Ok(())
    }

    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{PROJECT_SELECT} ORDER BY id"))?;
        let projects = stmt
            .query_map([], |row| project_at(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    pub fn get_project_by_id(&self, id: i64) -> Result<Option<Project>> {
        let conn = self.conn()?;
        select_project(&conn, "WHERE id = ?1", params![id])
    }

    pub fn get_project_by_name(&self, name: &str) -> Result<Option<Project>> {
        let conn = self.conn()?;
        select_project(&conn, "WHERE name = ?1", params![name])
    }

    /// Inserts a project unless one with the same name exists.
    ///
    /// Returns whether a row was inserted; an existing project is never updated.
    pub fn save_project(&self, name: &str, description: Option<&str>) -> Result<bool> {
        let conn = self.conn()?;
        insert_project(&conn, name, description, Utc::now())
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY id")?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    pub fn get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let conn = self.conn()?;
        select_category_by_name(&conn, name)
    }

    /// Inserts a category unless one with the same name exists.
    pub fn save_category(&self, name: &str) -> Result<bool> {
        let conn = self.conn()?;
        insert_category(&conn, name)
    }

    /// Returns only the categories associated with the project.
    pub fn list_categories_for_project(&self, project_id: i64) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT c.id, c.name
             FROM categories c
             JOIN project_categories pc ON pc.category_id = c.id
             WHERE pc.project_id = ?1
             ORDER BY c.id",
        )?;
        let categories = stmt
            .query_map(params![project_id], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        trace!(
            "Project {} offers {} categories",
            project_id,
            categories.len()
        );
        Ok(categories)
    }

    /// Associates categories with a project. Existing associations are kept as is.
    pub fn associate_categories_with_project(
        &self,
        project_id: i64,
        category_ids: &[i64],
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        insert_associations(&tx, project_id, category_ids)?;
        tx.commit()?;
        Ok(())
    }
}

fn seed(conn: &Connection) -> Result<()> {
    let now = Utc::now();
    for (name, description) in SEED_PROJECTS {
        if insert_project(conn, name, Some(*description), now)? {
            debug!("Seeded project {}", name);
        }
    }
    for name in SEED_CATEGORIES {
        if insert_category(conn, name)? {
            debug!("Seeded category {}", name);
        }
    }
    for (project_name, category_names) in SEED_ASSOCIATIONS {
        let Some(project) = select_project(conn, "WHERE name = ?1", params![project_name])?
        else {
            warn!("Seed project {} is missing, skipping its categories", project_name);
            continue;
        };
        let mut category_ids = Vec::with_capacity(category_names.len());
        for category_name in category_names.iter() {
            if let Some(category) = select_category_by_name(conn, category_name)? {
                category_ids.push(category.id);
            }
        }
        insert_associations(conn, project.id, &category_ids)?;
    }
    Ok(())
}

fn insert_project(
    conn: &Connection,
    name: &str,
    description: Option<&str>,
    now: DateTime<Utc>,
) -> Result<bool> {
    let stamp = format_timestamp(now);
    let inserted = conn.execute(
        "INSERT INTO projects (name, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(name) DO NOTHING",
        params![name, description, stamp, stamp],
    )?;
    Ok(inserted > 0)
}

fn insert_category(conn: &Connection, name: &str) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT INTO categories (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
        params![name],
    )?;
    Ok(inserted > 0)
}

fn insert_associations(conn: &Connection, project_id: i64, category_ids: &[i64]) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO project_categories (project_id, category_id)
         VALUES (?1, ?2)
         ON CONFLICT(project_id, category_id) DO NOTHING",
    )?;
    for category_id in category_ids {
        stmt.execute(params![project_id, category_id])?;
    }
    Ok(())
}

fn is_associated(conn: &Connection, project_id: i64, category_id: i64) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM project_categories WHERE project_id = ?1 AND category_id = ?2",
            params![project_id, category_id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn query_notes(
    conn: &Connection,
    clause: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare(&format!("{NOTE_SELECT} {clause}"))?;
    let notes = stmt
        .query_map(params, note_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(notes)
}

fn select_note(conn: &Connection, id: &str) -> Result<Option<Note>> {
    let note = conn
        .query_row(
            &format!("{NOTE_SELECT} WHERE n.id = ?1"),
            params![id],
            note_from_row,
        )
        .optional()?;
    Ok(note)
}

fn select_project(
    conn: &Connection,
    clause: &str,
    params: impl rusqlite::Params,
) -> Result<Option<Project>> {
    let project = conn
        .query_row(&format!("{PROJECT_SELECT} {clause}"), params, |row| {
            project_at(row, 0)
        })
        .optional()?;
    Ok(project)
}

fn select_category_by_name(conn: &Connection, name: &str) -> Result<Option<Category>> {
    let category = conn
        .query_row(
            "SELECT id, name FROM categories WHERE name = ?1",
            params![name],
            |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(category)
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    let category_id: Option<i64> = row.get(11)?;
    let category_name: Option<String> = row.get(12)?;
    let category = category_id
        .zip(category_name)
        .map(|(id, name)| Category { id, name });

    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        total_time: row.get(3)?,
        created_at: timestamp_at(row, 4)?,
        updated_at: timestamp_at(row, 5)?,
        project: project_at(row, 6)?,
        category,
    })
}

fn project_at(row: &Row<'_>, base: usize) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(base)?,
        name: row.get(base + 1)?,
        description: row.get(base + 2)?,
        created_at: timestamp_at(row, base + 3)?,
        updated_at: timestamp_at(row, base + 4)?,
    })
}

fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Timestamps are stored as RFC 3339 UTC text, so the first ten characters are the day.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, thread, time::Duration};

    use super::*;

    fn store() -> NoteStore {
        let store = NoteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store
    }

    fn project(store: &NoteStore, name: &str) -> Project {
        store.get_project_by_name(name).unwrap().unwrap()
    }

    fn category(store: &NoteStore, name: &str) -> Category {
        store.get_category_by_name(name).unwrap().unwrap()
    }

    fn names(categories: &[Category]) -> Vec<&str> {
        categories.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn initialize_twice_matches_initialize_once() {
        let store = store();
        let projects = store.list_projects().unwrap();
        let categories = store.list_categories().unwrap();

        store.initialize().unwrap();

        assert_eq!(store.list_projects().unwrap(), projects);
        assert_eq!(store.list_categories().unwrap(), categories);
        assert_eq!(projects.len(), SEED_PROJECTS.len());
        assert_eq!(categories.len(), SEED_CATEGORIES.len());
        let work = project(&store, "Work");
        assert_eq!(
            names(&store.list_categories_for_project(work.id).unwrap()),
            vec!["Urgent", "Important"]
        );
    }

    #[test]
    fn seeded_projects_offer_their_starter_categories() {
        let store = store();
        for (project_name, expected) in SEED_ASSOCIATIONS {
            let project = project(&store, project_name);
            let offered = store.list_categories_for_project(project.id).unwrap();
            assert_eq!(names(&offered), expected.to_vec(), "{project_name}");
        }
    }

    #[test]
    fn new_note_gets_a_fresh_unique_id() {
        let store = store();
        let work = project(&store, "Work");

        let first = store.save_note(&NoteDraft::new("a"), work.id, None).unwrap();
        let second = store.save_note(&NoteDraft::new("b"), work.id, None).unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[test]
    fn saved_note_round_trips_through_list() {
        let store = store();
        let work = project(&store, "Work");
        let urgent = category(&store, "Urgent");

        let mut draft = NoteDraft::new("Groceries");
        draft.body = "milk\neggs".to_string();
        draft.total_time = "1h 20m".to_string();
        let saved = store.save_note(&draft, work.id, Some(urgent.id)).unwrap();

        let notes = store.list_notes().unwrap();
        assert_eq!(notes, vec![saved.clone()]);
        let note = &notes[0];
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.body, "milk\neggs");
        assert_eq!(note.total_time, "1h 20m");
        assert_eq!(note.project, work);
        assert_eq!(note.category, Some(urgent));
    }

    #[test]
    fn resave_keeps_created_at_and_advances_updated_at() {
        let store = store();
        let work = project(&store, "Work");
        let personal = project(&store, "Personal");
        let optional = category(&store, "Optional");

        let first = store.save_note(&NoteDraft::new("draft"), work.id, None).unwrap();
        thread::sleep(Duration::from_millis(5));

        let mut draft = NoteDraft::from(&first);
        draft.title = "final".to_string();
        let second = store
            .save_note(&draft, personal.id, Some(optional.id))
            .unwrap();
        thread::sleep(Duration::from_millis(5));
        let third = store.save_note(&NoteDraft::from(&second), personal.id, None).unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(third.created_at, first.created_at);
        assert!(second.updated_at > first.updated_at);
        assert!(third.updated_at > second.updated_at);
        assert_eq!(second.title, "final");
        assert_eq!(second.project, personal);
        assert_eq!(third.category, None);
        assert_eq!(store.list_notes().unwrap().len(), 1);
    }

    #[test]
    fn delete_is_idempotent() {
        let store = store();
        let work = project(&store, "Work");
        let note = store.save_note(&NoteDraft::new("gone"), work.id, None).unwrap();

        store.delete_note("no-such-note").unwrap();
        store.delete_note(&note.id).unwrap();
        store.delete_note(&note.id).unwrap();

        assert!(store.list_notes().unwrap().is_empty());
        assert_eq!(store.get_note(&note.id).unwrap(), None);
    }

    #[test]
    fn list_keeps_storage_order_across_updates() {
        let store = store();
        let work = project(&store, "Work");
        let ids: Vec<String> = ["one", "two", "three"]
            .iter()
            .map(|title| store.save_note(&NoteDraft::new(*title), work.id, None).unwrap().id)
            .collect();

        let first = store.get_note(&ids[0]).unwrap().unwrap();
        store.save_note(&NoteDraft::from(&first), work.id, None).unwrap();

        let listed: Vec<String> = store.list_notes().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(listed, ids);
        let again: Vec<String> = store.list_notes().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(again, listed);
    }

    #[test]
    fn categories_never_associated_stay_hidden() {
        let store = store();
        assert!(store.save_project("Garden", Some("Outdoor work")).unwrap());
        let garden = project(&store, "Garden");
        assert!(store.list_categories_for_project(garden.id).unwrap().is_empty());

        store.save_category("Seasonal").unwrap();
        let seasonal = category(&store, "Seasonal");
        let urgent = category(&store, "Urgent");
        store
            .associate_categories_with_project(garden.id, &[seasonal.id, urgent.id])
            .unwrap();
        store
            .associate_categories_with_project(garden.id, &[seasonal.id])
            .unwrap();

        let offered = store.list_categories_for_project(garden.id).unwrap();
        assert_eq!(names(&offered), vec!["Urgent", "Seasonal"]);

        let offered_ids: HashSet<i64> = offered.iter().map(|c| c.id).collect();
        for other in store.list_categories().unwrap() {
            if !offered_ids.contains(&other.id) {
                assert_ne!(other.name, "Seasonal");
            }
        }
        for (project_name, _) in SEED_ASSOCIATIONS {
            let seeded = project(&store, project_name);
            let offered = store.list_categories_for_project(seeded.id).unwrap();
            assert!(!offered.iter().any(|c| c.id == seasonal.id));
        }
    }

    #[test]
    fn save_rejects_category_outside_project() {
        let store = store();
        let hobbies = project(&store, "Hobbies");
        let urgent = category(&store, "Urgent");

        let err = store
            .save_note(&NoteDraft::new("x"), hobbies.id, Some(urgent.id))
            .unwrap_err();

        assert!(matches!(err, NotesError::CategoryNotInProject { .. }));
        assert!(store.list_notes().unwrap().is_empty());
    }

    #[test]
    fn save_rejects_unknown_project() {
        let store = store();
        let err = store.save_note(&NoteDraft::new("x"), 999, None).unwrap_err();
        assert!(matches!(err, NotesError::ProjectNotFound { id: 999 }));
    }

    #[test]
    fn save_project_never_overwrites() {
        let store = store();
        let before = project(&store, "Work");

        assert!(!store.save_project("Work", Some("changed")).unwrap());

        assert_eq!(project(&store, "Work"), before);
        assert_eq!(store.list_projects().unwrap().len(), SEED_PROJECTS.len());
    }

    #[test]
    fn missing_lookups_return_none() {
        let store = store();
        assert_eq!(store.get_project_by_id(0).unwrap(), None);
        assert_eq!(store.get_project_by_name("Nope").unwrap(), None);
        assert_eq!(store.get_category_by_name("Nope").unwrap(), None);
        assert_eq!(store.get_note("nope").unwrap(), None);

        let work = project(&store, "Work");
        assert_eq!(store.get_project_by_id(work.id).unwrap(), Some(work));
    }

    #[test]
    fn filtered_lists_use_project_and_day() {
        let store = store();
        let work = project(&store, "Work");
        let hobbies = project(&store, "Hobbies");
        let a = store.save_note(&NoteDraft::new("a"), work.id, None).unwrap();
        let b = store.save_note(&NoteDraft::new("b"), hobbies.id, None).unwrap();

        assert_eq!(store.list_notes_by_project(work.id).unwrap(), vec![a.clone()]);
        assert_eq!(store.list_notes_by_project(hobbies.id).unwrap(), vec![b.clone()]);

        let today = a.created_at.date_naive();
        assert_eq!(store.list_notes_by_date(today).unwrap(), vec![a, b]);
        let yesterday = today.pred_opt().unwrap();
        assert!(store.list_notes_by_date(yesterday).unwrap().is_empty());
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("notes.db");

        let id = {
            let store = NoteStore::open(&path).unwrap();
            store.initialize().unwrap();
            let work = store.get_project_by_name("Work").unwrap().unwrap();
            store.save_note(&NoteDraft::new("kept"), work.id, None).unwrap().id
        };

        let reopened = NoteStore::open(&path).unwrap();
        reopened.initialize().unwrap();
        let notes = reopened.list_notes().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, id);
        assert_eq!(reopened.list_projects().unwrap().len(), SEED_PROJECTS.len());
    }
}
