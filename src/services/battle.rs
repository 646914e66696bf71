use rusqlite::Connection;
use tracing::info;

use crate::error::ServiceResult;
use crate::input::{parse_integer, require_selection};
use crate::models::{BattleOutcome, BattleReport};

use super::{add_power, push_unique, CharacterService, MonsterService};

/// Characters and monsters lined up for the next battle.
#[derive(Debug, Default, Clone)]
pub struct BattleRoster {
    characters: Vec<String>,
    monsters: Vec<String>,
}

impl BattleRoster {
    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    pub fn monsters(&self) -> &[String] {
        &self.monsters
    }

    pub fn clear(&mut self) {
        self.characters.clear();
        self.monsters.clear();
    }

    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.characters.is_empty() {
            lines.push("Characters in Battle:".to_string());
            lines.extend(self.characters.iter().map(|name| format!(" - {name}")));
        }
        if !self.monsters.is_empty() {
            lines.push("Monsters in Battle:".to_string());
            lines.extend(self.monsters.iter().map(|name| format!(" - {name}")));
        }
        lines
    }
}

pub struct BattleService<'a> {
    conn: &'a Connection,
    roster: &'a mut BattleRoster,
}

impl<'a> BattleService<'a> {
    pub fn new(conn: &'a Connection, roster: &'a mut BattleRoster) -> Self {
        Self { conn, roster }
    }

    pub fn add_character_to_battle(&mut self, name: &str) -> ServiceResult<bool> {
        let name = require_selection("character to add", name)?;
        CharacterService::new(self.conn).require(&name)?;
        Ok(push_unique(&mut self.roster.characters, name))
    }

    pub fn add_monster_to_battle(&mut self, name: &str) -> ServiceResult<bool> {
        let name = require_selection("monster to add", name)?;
        MonsterService::new(self.conn).battle_power(&name)?;
        Ok(push_unique(&mut self.roster.monsters, name))
    }

    /// Parse both modifiers and resolve the battle. The roster is left as is so
    /// the same line-up can be re-rolled with different modifiers.
    pub fn resolve(
        &self,
        character_modifier: &str,
        monster_modifier: &str,
    ) -> ServiceResult<BattleReport> {
        let character_modifier = parse_integer("character modifier", character_modifier)?;
        let monster_modifier = parse_integer("monster modifier", monster_modifier)?;
        self.resolve_with(character_modifier, monster_modifier)
    }

    /// Resolve with already parsed modifiers.
    pub fn resolve_with(
        &self,
        character_modifier: i64,
        monster_modifier: i64,
    ) -> ServiceResult<BattleReport> {
        let characters = CharacterService::new(self.conn);
        let monsters = MonsterService::new(self.conn);

        let mut character_total = character_modifier;
        for name in &self.roster.characters {
            character_total = add_power(character_total, characters.compute_battle_power(name)?)?;
        }
        let mut monster_total = monster_modifier;
        for name in &self.roster.monsters {
            monster_total = add_power(monster_total, monsters.battle_power(name)?)?;
        }

        let report = BattleReport {
            outcome: BattleOutcome::from_totals(character_total, monster_total),
            character_total,
            monster_total,
        };
        info!(
            character_total,
            monster_total,
            outcome = %report.outcome,
            "battle resolved"
        );
        Ok(report)
    }

    pub fn clear_battle(&mut self) {
        self.roster.clear();
    }
}
