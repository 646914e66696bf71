use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::db::{
    create_character, delete_characters_by_name, fetch_character_by_name, fetch_character_names,
    fetch_equipped_armor, sum_equipped_bonus, update_character_level,
};
use crate::error::{ServiceError, ServiceResult};
use crate::input::{
    parse_integer, parse_integer_or, require_description, require_name, require_selection,
};
use crate::models::{Character, CharacterSheet, EquippedArmor, DEFAULT_LEVEL};

use super::{add_power, filter_names};

/// CRUD, search and battle power for player characters.
pub struct CharacterService<'a> {
    conn: &'a Connection,
}

impl<'a> CharacterService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Validate and insert a character. Level text that is not an integer
    /// falls back to the default level.
    pub fn add(&self, name: &str, description: &str, level: &str) -> ServiceResult<Character> {
        let name = require_name("character", name)
            .inspect_err(|_| warn!("rejected character without a name"))?;
        let description = require_description("character", description)
            .inspect_err(|_| warn!(name = %name, "rejected character without a description"))?;
        let level = parse_integer_or(level, DEFAULT_LEVEL);

        let character = create_character(self.conn, &name, &description, level)?;
        info!(id = character.id, name = %character.name, level, "character added");
        Ok(character)
    }

    pub fn delete(&self, name: &str) -> ServiceResult<()> {
        let name = require_selection("character to delete", name)?;
        let deleted = delete_characters_by_name(self.conn, &name)?;
        if deleted == 0 {
            return Err(ServiceError::not_found(format!(
                "Character '{name}' not found."
            )));
        }
        info!(name = %name, deleted, "character deleted");
        Ok(())
    }

    pub fn get_by_name(&self, name: &str) -> ServiceResult<Option<Character>> {
        debug!(name, "loading character");
        Ok(fetch_character_by_name(self.conn, name)?)
    }

    pub fn list_all(&self) -> ServiceResult<Vec<String>> {
        Ok(fetch_character_names(self.conn)?)
    }

    /// Case-insensitive substring match on the name.
    pub fn search(&self, query: &str) -> ServiceResult<Vec<String>> {
        Ok(filter_names(self.list_all()?, query))
    }

    pub fn update_level(&self, name: &str, new_level: &str) -> ServiceResult<()> {
        let level = parse_integer("character level", new_level).inspect_err(|_| {
            warn!(name, input = new_level, "rejected non-integer level");
        })?;
        let name = require_selection("character", name)?;

        if update_character_level(self.conn, &name, level)? == 0 {
            return Err(ServiceError::not_found(format!(
                "Character '{name}' not found."
            )));
        }
        info!(name = %name, level, "character level updated");
        Ok(())
    }

    /// Level plus the bonus of every equipped armor row.
    pub fn compute_battle_power(&self, name: &str) -> ServiceResult<i64> {
        let character = self.require(name)?;
        let bonus = sum_equipped_bonus(self.conn, character.id)?;
        add_power(character.level, bonus)
    }

    pub fn get_equipped_armor(&self, name: &str) -> ServiceResult<Vec<EquippedArmor>> {
        let character = self.require(name)?;
        Ok(fetch_equipped_armor(self.conn, character.id)?)
    }

    /// Record, equipment and battle power for the detail pane.
    pub fn sheet(&self, name: &str) -> ServiceResult<CharacterSheet> {
        let character = self.require(name)?;
        let equipped = fetch_equipped_armor(self.conn, character.id)?;
        let battle_power = equipped
            .iter()
            .try_fold(character.level, |total, armor| add_power(total, armor.bonus))?;
        Ok(CharacterSheet {
            character,
            equipped,
            battle_power,
        })
    }

    pub(crate) fn require(&self, name: &str) -> ServiceResult<Character> {
        fetch_character_by_name(self.conn, name)?
            .ok_or_else(|| ServiceError::not_found(format!("Character '{name}' not found.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_armor, link_armor, open_in_memory};

    #[test]
    fn test_add_then_get_round_trips_fields() {
        let conn = open_in_memory().unwrap();
        let service = CharacterService::new(&conn);

        service.add("Aria", "  Elven ranger\n", "5").unwrap();
        let character = service.get_by_name("Aria").unwrap().unwrap();
        assert_eq!(character.description, "Elven ranger");
        assert_eq!(character.level, 5);
    }

    #[test]
    fn test_add_defaults_unparsable_level() {
        let conn = open_in_memory().unwrap();
        let service = CharacterService::new(&conn);

        let character = service.add("Bram", "Dwarf", "lots").unwrap();
        assert_eq!(character.level, DEFAULT_LEVEL);
        let negative = service.add("Cyl", "Cursed", "-3").unwrap();
        assert_eq!(negative.level, -3);
    }

    #[test]
    fn test_add_rejects_missing_fields() {
        let conn = open_in_memory().unwrap();
        let service = CharacterService::new(&conn);

        assert!(matches!(
            service.add("", "Nameless", "1"),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.add("Ghost", "  \n", "1"),
            Err(ServiceError::Validation(_))
        ));
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let conn = open_in_memory().unwrap();
        let service = CharacterService::new(&conn);
        service.add("Aria", "Ranger", "1").unwrap();

        service.delete("Aria").unwrap();
        assert!(service.get_by_name("Aria").unwrap().is_none());
        assert!(matches!(service.delete("Aria"), Err(ServiceError::NotFound(_))));
        assert!(matches!(service.delete(""), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn test_list_keeps_insertion_order_and_search_ignores_case() {
        let conn = open_in_memory().unwrap();
        let service = CharacterService::new(&conn);
        for name in ["Zed", "Dragon Lord", "alda", "Snapdragon"] {
            service.add(name, "someone", "1").unwrap();
        }

        assert_eq!(
            service.list_all().unwrap(),
            vec!["Zed", "Dragon Lord", "alda", "Snapdragon"]
        );
        assert_eq!(
            service.search("drag").unwrap(),
            vec!["Dragon Lord", "Snapdragon"]
        );
        assert_eq!(service.search("").unwrap().len(), 4);
        assert!(service.search("orc").unwrap().is_empty());
    }

    #[test]
    fn test_update_level() {
        let conn = open_in_memory().unwrap();
        let service = CharacterService::new(&conn);
        service.add("Aria", "Ranger", "2").unwrap();

        let err = service.update_level("Aria", "ten").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(service.get_by_name("Aria").unwrap().unwrap().level, 2);

        service.update_level("Aria", "10").unwrap();
        assert_eq!(service.get_by_name("Aria").unwrap().unwrap().level, 10);

        assert!(matches!(
            service.update_level("Nobody", "4"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn test_battle_power_sums_equipped_bonuses() {
        let conn = open_in_memory().unwrap();
        let service = CharacterService::new(&conn);
        let aria = service.add("Aria", "Ranger", "4").unwrap();
        assert_eq!(service.compute_battle_power("Aria").unwrap(), 4);

        let helm = create_armor(&conn, "Helm", "Iron", 2).unwrap();
        let cloak = create_armor(&conn, "Cursed Cloak", "Heavy", -1).unwrap();
        link_armor(&conn, aria.id, helm.id).unwrap();
        link_armor(&conn, aria.id, cloak.id).unwrap();

        assert_eq!(service.compute_battle_power("Aria").unwrap(), 5);
        let equipped = service.get_equipped_armor("Aria").unwrap();
        assert_eq!(
            equipped,
            vec![
                EquippedArmor {
                    name: "Helm".into(),
                    bonus: 2
                },
                EquippedArmor {
                    name: "Cursed Cloak".into(),
                    bonus: -1
                },
            ]
        );

        let sheet = service.sheet("Aria").unwrap();
        assert_eq!(sheet.battle_power, 5);
        assert_eq!(sheet.equipment_summary(), "Helm, Cursed Cloak");

        assert!(matches!(
            service.compute_battle_power("Nobody"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn test_battle_power_past_i64_is_rejected() {
        let conn = open_in_memory().unwrap();
        let service = CharacterService::new(&conn);
        let max = service
            .add("Max", "Maxed out", "9223372036854775807")
            .unwrap();
        assert_eq!(max.level, i64::MAX);
        assert_eq!(service.compute_battle_power("Max").unwrap(), i64::MAX);

        let ring = create_armor(&conn, "Ring", "Shiny", 1).unwrap();
        link_armor(&conn, max.id, ring.id).unwrap();

        assert!(matches!(
            service.compute_battle_power("Max"),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.sheet("Max"),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_whitespace_name_is_kept_as_typed() {
        let conn = open_in_memory().unwrap();
        let service = CharacterService::new(&conn);
        let ghost = service.add(" ", "Invisible", "1").unwrap();
        assert_eq!(ghost.name, " ");
        assert!(service.get_by_name(" ").unwrap().is_some());
    }
}
