use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::db::{
    create_armor, delete_armors_by_name, fetch_armor_by_name, fetch_armor_names,
    update_armor_bonus,
};
use crate::error::{ServiceError, ServiceResult};
use crate::input::{
    parse_integer, parse_integer_or, require_description, require_name, require_selection,
};
use crate::models::{Armor, DEFAULT_BONUS};

use super::filter_names;

/// CRUD and search for armor.
pub struct ArmorService<'a> {
    conn: &'a Connection,
}

impl<'a> ArmorService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn add(&self, name: &str, description: &str, bonus: &str) -> ServiceResult<Armor> {
        let name = require_name("equipment", name)
            .inspect_err(|_| warn!("rejected armor without a name"))?;
        let description = require_description("equipment", description)
            .inspect_err(|_| warn!(name = %name, "rejected armor without a description"))?;
        let bonus = parse_integer_or(bonus, DEFAULT_BONUS);

        let armor = create_armor(self.conn, &name, &description, bonus)?;
        info!(id = armor.id, name = %armor.name, bonus, "armor added");
        Ok(armor)
    }

    pub fn delete(&self, name: &str) -> ServiceResult<()> {
        let name = require_selection("item to delete", name)?;
        if delete_armors_by_name(self.conn, &name)? == 0 {
            return Err(ServiceError::not_found(format!(
                "Equipment '{name}' not found."
            )));
        }
        info!(name = %name, "armor deleted");
        Ok(())
    }

    pub fn get_by_name(&self, name: &str) -> ServiceResult<Option<Armor>> {
        debug!(name, "loading armor");
        Ok(fetch_armor_by_name(self.conn, name)?)
    }

    pub fn list_all(&self) -> ServiceResult<Vec<String>> {
        Ok(fetch_armor_names(self.conn)?)
    }

    pub fn search(&self, query: &str) -> ServiceResult<Vec<String>> {
        Ok(filter_names(self.list_all()?, query))
    }

    /// Overwrite the bonus. Every character wearing the armor sees the new
    /// value on the next battle power computation.
    pub fn update_bonus(&self, name: &str, new_bonus: &str) -> ServiceResult<()> {
        let bonus = parse_integer("armor bonus", new_bonus)
            .inspect_err(|_| warn!(name, input = new_bonus, "rejected non-integer bonus"))?;
        let name = require_selection("item", name)?;

        if update_armor_bonus(self.conn, &name, bonus)? == 0 {
            return Err(ServiceError::not_found(format!(
                "Equipment '{name}' not found."
            )));
        }
        info!(name = %name, bonus, "armor bonus updated");
        Ok(())
    }

    pub(crate) fn require(&self, name: &str) -> ServiceResult<Armor> {
        fetch_armor_by_name(self.conn, name)?
            .ok_or_else(|| ServiceError::not_found(format!("Equipment '{name}' not found.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::services::CharacterService;

    #[test]
    fn test_add_get_delete() {
        let conn = open_in_memory().unwrap();
        let service = ArmorService::new(&conn);

        let plate = service.add("Plate Mail", "Full plate", "3").unwrap();
        assert_eq!(service.get_by_name("Plate Mail").unwrap(), Some(plate));

        let buckler = service.add("Buckler", "Small shield", "").unwrap();
        assert_eq!(buckler.bonus, DEFAULT_BONUS);

        service.delete("Plate Mail").unwrap();
        assert!(service.get_by_name("Plate Mail").unwrap().is_none());
        assert_eq!(service.list_all().unwrap(), vec!["Buckler"]);
        assert!(matches!(
            service.delete("Plate Mail"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn test_rejects_blank_description() {
        let conn = open_in_memory().unwrap();
        let service = ArmorService::new(&conn);
        assert!(matches!(
            service.add("Helm", "   ", "1"),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_update_bonus_flows_into_battle_power() {
        let conn = open_in_memory().unwrap();
        let armors = ArmorService::new(&conn);
        let characters = CharacterService::new(&conn);

        let helm = armors.add("Helm", "Iron helm", "1").unwrap();
        let aria = characters.add("Aria", "Ranger", "3").unwrap();
        crate::db::link_armor(&conn, aria.id, helm.id).unwrap();
        assert_eq!(characters.compute_battle_power("Aria").unwrap(), 4);

        armors.update_bonus("Helm", "-2").unwrap();
        assert_eq!(characters.compute_battle_power("Aria").unwrap(), 1);

        assert!(matches!(
            armors.update_bonus("Helm", "2.5"),
            Err(ServiceError::Validation(_))
        ));
        assert_eq!(armors.get_by_name("Helm").unwrap().unwrap().bonus, -2);
    }

    #[test]
    fn test_deleted_armor_stops_counting() {
        let conn = open_in_memory().unwrap();
        let armors = ArmorService::new(&conn);
        let characters = CharacterService::new(&conn);

        let helm = armors.add("Helm", "Iron helm", "5").unwrap();
        let aria = characters.add("Aria", "Ranger", "3").unwrap();
        crate::db::link_armor(&conn, aria.id, helm.id).unwrap();

        armors.delete("Helm").unwrap();
        assert_eq!(crate::db::count_links(&conn, aria.id, helm.id).unwrap(), 1);
        assert_eq!(characters.compute_battle_power("Aria").unwrap(), 3);
        assert!(characters.get_equipped_armor("Aria").unwrap().is_empty());
    }

    #[test]
    fn test_search() {
        let conn = open_in_memory().unwrap();
        let service = ArmorService::new(&conn);
        service.add("Dragonscale Vest", "Shiny", "4").unwrap();
        service.add("Leather", "Plain", "1").unwrap();
        assert_eq!(service.search("DRAG").unwrap(), vec!["Dragonscale Vest"]);
    }
}
