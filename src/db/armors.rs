use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Armor;

/// Armor names in insertion order.
pub fn fetch_armor_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM armors ORDER BY id")
        .context("failed to prepare armor list query")?;

    let names = stmt
        .query_map([], |row| row.get(0))
        .context("failed to load armor")?
        .collect::<Result<Vec<String>, _>>()
        .context("failed to collect armor")?;

    Ok(names)
}

/// First armor row carrying `name`, if any.
pub fn fetch_armor_by_name(conn: &Connection, name: &str) -> Result<Option<Armor>> {
    conn.query_row(
        "SELECT id, name, description, bonus FROM armors
         WHERE name = ?1 ORDER BY id LIMIT 1",
        params![name],
        |row| {
            Ok(Armor {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                bonus: row.get(3)?,
            })
        },
    )
    .optional()
    .context("failed to load armor")
}

pub fn create_armor(conn: &Connection, name: &str, description: &str, bonus: i64) -> Result<Armor> {
    conn.execute(
        "INSERT INTO armors (name, description, bonus) VALUES (?1, ?2, ?3)",
        params![name, description, bonus],
    )
    .context("failed to insert armor")?;

    Ok(Armor {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.to_string(),
        bonus,
    })
}

pub fn update_armor_bonus(conn: &Connection, name: &str, bonus: i64) -> Result<usize> {
    conn.execute(
        "UPDATE armors SET bonus = ?1 WHERE name = ?2",
        params![bonus, name],
    )
    .context("failed to update armor bonus")
}

/// Remove every armor row with this name. Characters that had it equipped keep
/// a dangling join row which no longer contributes any bonus.
pub fn delete_armors_by_name(conn: &Connection, name: &str) -> Result<usize> {
    conn.execute("DELETE FROM armors WHERE name = ?1", params![name])
        .context("failed to delete armor")
}
