use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::Character;

fn character_from_row(row: &Row<'_>) -> rusqlite::Result<Character> {
    Ok(Character {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        level: row.get(3)?,
    })
}

/// Every character name in insertion order. There is no ordering column, so
/// the primary key stands in for it.
pub fn fetch_character_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM characters ORDER BY id")
        .context("failed to prepare character list query")?;

    let names = stmt
        .query_map([], |row| row.get(0))
        .context("failed to load characters")?
        .collect::<Result<Vec<String>, _>>()
        .context("failed to collect characters")?;

    Ok(names)
}

/// Look a character up by name. Names are not unique in the schema; the first
/// inserted row wins.
pub fn fetch_character_by_name(conn: &Connection, name: &str) -> Result<Option<Character>> {
    conn.query_row(
        "SELECT id, name, description, level FROM characters
         WHERE name = ?1 ORDER BY id LIMIT 1",
        params![name],
        character_from_row,
    )
    .optional()
    .context("failed to load character")
}

/// Insert a new character and echo the stored row back.
pub fn create_character(
    conn: &Connection,
    name: &str,
    description: &str,
    level: i64,
) -> Result<Character> {
    conn.execute(
        "INSERT INTO characters (name, description, level) VALUES (?1, ?2, ?3)",
        params![name, description, level],
    )
    .context("failed to insert character")?;

    Ok(Character {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.to_string(),
        level,
    })
}

/// Overwrite the level of every character with this name. Returns the number
/// of rows touched so the caller can report a missing name.
pub fn update_character_level(conn: &Connection, name: &str, level: i64) -> Result<usize> {
    conn.execute(
        "UPDATE characters SET level = ?1 WHERE name = ?2",
        params![level, name],
    )
    .context("failed to update character level")
}

/// Delete every character with this name. Join rows are left behind.
pub fn delete_characters_by_name(conn: &Connection, name: &str) -> Result<usize> {
    conn.execute("DELETE FROM characters WHERE name = ?1", params![name])
        .context("failed to delete character")
}
