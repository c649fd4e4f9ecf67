use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".institute-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "institute.sqlite";

/// Ensure the database file exists, create any missing tables, and return a
/// live connection. The function also toggles `PRAGMA foreign_keys = ON` so
/// the cascade rules in our schema behave the same during tests and
/// production runs.
pub fn open_store() -> Result<Connection> {
    let db_path = db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(&db_path).context("failed to open SQLite database")?;
    initialize(&conn)?;
    Ok(conn)
}

/// Create the three tables if they do not exist yet. Safe to run on every
/// startup and against any connection, which is how the tests get in-memory
/// databases with the production schema.
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign keys")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS person (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL,
            name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            notes TEXT
        )",
        [],
    )
    .context("failed to create person table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS course (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT UNIQUE,
            title TEXT NOT NULL,
            duration TEXT,
            mode TEXT,
            teacher_id INTEGER REFERENCES person(id) ON DELETE SET NULL
        )",
        [],
    )
    .context("failed to create course table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS enrollment (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL REFERENCES person(id) ON DELETE CASCADE,
            course_id INTEGER NOT NULL REFERENCES course(id) ON DELETE CASCADE,
            UNIQUE(student_id, course_id)
        )",
        [],
    )
    .context("failed to create enrollment table")?;

    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        initialize(&conn).unwrap();
    }

    #[test]
    fn initialize_preserves_existing_rows() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn.execute(
            "INSERT INTO person (kind, name) VALUES (?1, ?2)",
            params!["student", "Alice"],
        )
        .unwrap();

        initialize(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM person", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
