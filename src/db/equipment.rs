use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::EquippedArmor;

/// Armor linked to a character, one entry per join row in insertion order.
/// The inner join drops rows whose armor has since been deleted.
pub fn fetch_equipped_armor(conn: &Connection, character_id: i64) -> Result<Vec<EquippedArmor>> {
    let mut stmt = conn
        .prepare(
            "SELECT a.name, a.bonus
             FROM character_armor ca
             INNER JOIN armors a ON a.id = ca.armor_id
             WHERE ca.character_id = ?1
             ORDER BY ca.rowid",
        )
        .context("failed to prepare equipped armor query")?;

    let armor = stmt
        .query_map([character_id], |row| {
            Ok(EquippedArmor {
                name: row.get(0)?,
                bonus: row.get(1)?,
            })
        })
        .context("failed to iterate equipped armor")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect equipped armor")?;

    Ok(armor)
}

/// Sum of the bonuses of everything linked to the character; 0 when nothing
/// is equipped.
pub fn sum_equipped_bonus(conn: &Connection, character_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COALESCE(SUM(a.bonus), 0)
         FROM character_armor ca
         INNER JOIN armors a ON a.id = ca.armor_id
         WHERE ca.character_id = ?1",
        [character_id],
        |row| row.get(0),
    )
    .context("failed to sum equipped bonus")
}

/// Add a join row unconditionally, even if the pair already exists.
pub fn link_armor(conn: &Connection, character_id: i64, armor_id: i64) -> Result<usize> {
    conn.execute(
        "INSERT INTO character_armor (character_id, armor_id) VALUES (?1, ?2)",
        params![character_id, armor_id],
    )
    .context("failed to equip armor")
}

/// Add a join row only when the pair is not linked yet. The table has no
/// unique constraint, so the check lives in the statement.
pub fn link_armor_once(conn: &Connection, character_id: i64, armor_id: i64) -> Result<usize> {
    conn.execute(
        "INSERT INTO character_armor (character_id, armor_id)
         SELECT ?1, ?2
         WHERE NOT EXISTS (
             SELECT 1 FROM character_armor WHERE character_id = ?1 AND armor_id = ?2
         )",
        params![character_id, armor_id],
    )
    .context("failed to equip armor")
}

/// Remove every join row for the pair, duplicates included.
pub fn unlink_armor(conn: &Connection, character_id: i64, armor_id: i64) -> Result<usize> {
    conn.execute(
        "DELETE FROM character_armor WHERE character_id = ?1 AND armor_id = ?2",
        params![character_id, armor_id],
    )
    .context("failed to unequip armor")
}

/// Number of join rows for the pair.
pub fn count_links(conn: &Connection, character_id: i64, armor_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM character_armor WHERE character_id = ?1 AND armor_id = ?2",
        params![character_id, armor_id],
        |row| row.get(0),
    )
    .context("failed to count equipped pairs")
}
