use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Monster;

pub fn fetch_monster_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM monsters ORDER BY id")
        .context("failed to prepare monster list query")?;

    let names = stmt
        .query_map([], |row| row.get(0))
        .context("failed to load monsters")?
        .collect::<Result<Vec<String>, _>>()
        .context("failed to collect monsters")?;

    Ok(names)
}

pub fn fetch_monster_by_name(conn: &Connection, name: &str) -> Result<Option<Monster>> {
    conn.query_row(
        "SELECT id, name, description, battle_power FROM monsters
         WHERE name = ?1 ORDER BY id LIMIT 1",
        params![name],
        |row| {
            Ok(Monster {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                battle_power: row.get(3)?,
            })
        },
    )
    .optional()
    .context("failed to load monster")
}

pub fn create_monster(
    conn: &Connection,
    name: &str,
    description: &str,
    battle_power: i64,
) -> Result<Monster> {
    conn.execute(
        "INSERT INTO monsters (name, description, battle_power) VALUES (?1, ?2, ?3)",
        params![name, description, battle_power],
    )
    .context("failed to insert monster")?;

    Ok(Monster {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.to_string(),
        battle_power,
    })
}

pub fn update_monster_power(conn: &Connection, name: &str, battle_power: i64) -> Result<usize> {
    conn.execute(
        "UPDATE monsters SET battle_power = ?1 WHERE name = ?2",
        params![battle_power, name],
    )
    .context("failed to update monster battle power")
}

pub fn delete_monsters_by_name(conn: &Connection, name: &str) -> Result<usize> {
    conn.execute("DELETE FROM monsters WHERE name = ?1", params![name])
        .context("failed to delete monster")
}
