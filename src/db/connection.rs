use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

/// Open (or create) the database file at `path` and make sure every table
/// exists. Parent directories are created on demand.
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open SQLite database {}", path.display()))?;
    ensure_schema(&conn)?;
    info!(path = %path.display(), "database ready");
    Ok(conn)
}

/// Throwaway database used by tests and previews.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the tables if they are missing. Safe to run on every start-up.
///
/// The join table declares its foreign keys but `PRAGMA foreign_keys` is left
/// off: deleting a character or armor keeps its join rows, and reads filter
/// them out by joining against the parent tables.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS characters (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            level INTEGER DEFAULT 1
        )",
        [],
    )
    .context("failed to create characters table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS armors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            bonus INTEGER DEFAULT 0
        )",
        [],
    )
    .context("failed to create armors table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS character_armor (
            character_id INTEGER,
            armor_id INTEGER,
            FOREIGN KEY(character_id) REFERENCES characters(id),
            FOREIGN KEY(armor_id) REFERENCES armors(id)
        )",
        [],
    )
    .context("failed to create character_armor table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS monsters (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            battle_power INTEGER DEFAULT 1
        )",
        [],
    )
    .context("failed to create monsters table")?;

    Ok(())
}
