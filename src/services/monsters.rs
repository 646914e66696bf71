use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::db::{
    create_monster, delete_monsters_by_name, fetch_monster_by_name, fetch_monster_names,
    update_monster_power,
};
use crate::error::{ServiceError, ServiceResult};
use crate::input::{
    parse_integer, parse_integer_or, require_description, require_name, require_selection,
};
use crate::models::{Monster, DEFAULT_MONSTER_POWER};

use super::filter_names;

/// CRUD and search for monsters. A monster's battle power is whatever was
/// stored; nothing is derived.
pub struct MonsterService<'a> {
    conn: &'a Connection,
}

impl<'a> MonsterService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn add(&self, name: &str, description: &str, battle_power: &str) -> ServiceResult<Monster> {
        let name = require_name("monster", name)
            .inspect_err(|_| warn!("rejected monster without a name"))?;
        let description = require_description("monster", description)
            .inspect_err(|_| warn!(name = %name, "rejected monster without a description"))?;
        let battle_power = parse_integer_or(battle_power, DEFAULT_MONSTER_POWER);

        let monster = create_monster(self.conn, &name, &description, battle_power)?;
        info!(id = monster.id, name = %monster.name, battle_power, "monster added");
        Ok(monster)
    }

    pub fn delete(&self, name: &str) -> ServiceResult<()> {
        let name = require_selection("monster to delete", name)?;
        if delete_monsters_by_name(self.conn, &name)? == 0 {
            return Err(ServiceError::not_found(format!("Monster '{name}' not found.")));
        }
        info!(name = %name, "monster deleted");
        Ok(())
    }

    pub fn get_by_name(&self, name: &str) -> ServiceResult<Option<Monster>> {
        debug!(name, "loading monster");
        Ok(fetch_monster_by_name(self.conn, name)?)
    }

    pub fn list_all(&self) -> ServiceResult<Vec<String>> {
        Ok(fetch_monster_names(self.conn)?)
    }

    pub fn search(&self, query: &str) -> ServiceResult<Vec<String>> {
        Ok(filter_names(self.list_all()?, query))
    }

    pub fn update_power(&self, name: &str, new_power: &str) -> ServiceResult<()> {
        let power = parse_integer("monster power", new_power)
            .inspect_err(|_| warn!(name, input = new_power, "rejected non-integer power"))?;
        let name = require_selection("monster", name)?;

        if update_monster_power(self.conn, &name, power)? == 0 {
            return Err(ServiceError::not_found(format!("Monster '{name}' not found.")));
        }
        info!(name = %name, battle_power = power, "monster power updated");
        Ok(())
    }

    /// Stored battle power of the named monster.
    pub fn battle_power(&self, name: &str) -> ServiceResult<i64> {
        fetch_monster_by_name(self.conn, name)?
            .map(|monster| monster.battle_power)
            .ok_or_else(|| ServiceError::not_found(format!("Monster '{name}' not found.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn test_add_get_update_delete() {
        let conn = open_in_memory().unwrap();
        let service = MonsterService::new(&conn);

        service.add("Dragon Lord", "Ancient wyrm", "18").unwrap();
        let goblin = service.add("Goblin", "Sneaky", "").unwrap();
        assert_eq!(goblin.battle_power, DEFAULT_MONSTER_POWER);

        let dragon = service.get_by_name("Dragon Lord").unwrap().unwrap();
        assert_eq!(dragon.description, "Ancient wyrm");
        assert_eq!(service.battle_power("Dragon Lord").unwrap(), 18);

        assert!(matches!(
            service.update_power("Dragon Lord", "huge"),
            Err(ServiceError::Validation(_))
        ));
        assert_eq!(service.battle_power("Dragon Lord").unwrap(), 18);
        service.update_power("Dragon Lord", "25").unwrap();
        assert_eq!(service.battle_power("Dragon Lord").unwrap(), 25);

        service.delete("Goblin").unwrap();
        assert!(service.get_by_name("Goblin").unwrap().is_none());
        assert!(matches!(
            service.battle_power("Goblin"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn test_search_matches_substring_any_case() {
        let conn = open_in_memory().unwrap();
        let service = MonsterService::new(&conn);
        service.add("Dragon Lord", "Ancient wyrm", "18").unwrap();
        service.add("Goblin", "Sneaky", "2").unwrap();

        assert_eq!(service.search("drag").unwrap(), vec!["Dragon Lord"]);
        assert_eq!(service.search("LIN").unwrap(), vec!["Goblin"]);
    }

    #[test]
    fn test_delete_removes_every_row_with_the_name() {
        let conn = open_in_memory().unwrap();
        let service = MonsterService::new(&conn);
        service.add("Rat", "Small", "1").unwrap();
        service.add("Rat", "Also small", "1").unwrap();

        service.delete("Rat").unwrap();
        assert!(service.list_all().unwrap().is_empty());
    }
}
