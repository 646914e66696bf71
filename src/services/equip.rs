use rusqlite::Connection;
use tracing::{info, warn};

use crate::config::EquipPolicy;
use crate::db::{link_armor, link_armor_once, unlink_armor};
use crate::error::{ServiceError, ServiceResult};
use crate::input::require_selection;

use super::{push_unique, ArmorService, CharacterService};

/// Characters and armor picked for the next equip/unequip. Lives for the
/// session only and keeps the order names were added in.
#[derive(Debug, Default, Clone)]
pub struct EquipSelection {
    characters: Vec<String>,
    armors: Vec<String>,
}

impl EquipSelection {
    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    pub fn armors(&self) -> &[String] {
        &self.armors
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.armors.is_empty()
    }

    pub fn clear(&mut self) {
        self.characters.clear();
        self.armors.clear();
    }

    /// Lines for the "equip list" panel.
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.characters.is_empty() {
            lines.push("Characters to Equip:".to_string());
            lines.extend(self.characters.iter().map(|name| format!(" - {name}")));
        }
        if !self.armors.is_empty() {
            lines.push("Equipment to Equip:".to_string());
            lines.extend(self.armors.iter().map(|name| format!(" - {name}")));
        }
        lines
    }
}

/// Equip/unequip workflow over an [`EquipSelection`].
pub struct EquipService<'a> {
    conn: &'a Connection,
    selection: &'a mut EquipSelection,
    policy: EquipPolicy,
}

impl<'a> EquipService<'a> {
    pub fn new(conn: &'a Connection, selection: &'a mut EquipSelection, policy: EquipPolicy) -> Self {
        Self {
            conn,
            selection,
            policy,
        }
    }

    /// Queue a character. Returns `false` when it was already queued.
    pub fn add_character_to_selection(&mut self, name: &str) -> ServiceResult<bool> {
        let name = require_selection("character to add", name)?;
        CharacterService::new(self.conn).require(&name)?;
        Ok(push_unique(&mut self.selection.characters, name))
    }

    /// Queue a piece of armor. Returns `false` when it was already queued.
    pub fn add_armor_to_selection(&mut self, name: &str) -> ServiceResult<bool> {
        let name = require_selection("item to add", name)?;
        ArmorService::new(self.conn).require(&name)?;
        Ok(push_unique(&mut self.selection.armors, name))
    }

    /// Link every selected character with every selected armor and return the
    /// number of join rows written. Under [`EquipPolicy::AllowDuplicates`] an
    /// already linked pair gets another row, so its bonus counts again.
    pub fn equip_all(&mut self) -> ServiceResult<usize> {
        let pairs = self.resolve_pairs("equip")?;

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(anyhow::Error::from)?;
        let mut inserted = 0;
        for &(character_id, armor_id) in &pairs {
            inserted += match self.policy {
                EquipPolicy::AllowDuplicates => link_armor(&tx, character_id, armor_id)?,
                EquipPolicy::UniquePairs => link_armor_once(&tx, character_id, armor_id)?,
            };
        }
        tx.commit().map_err(anyhow::Error::from)?;

        info!(
            characters = self.selection.characters.len(),
            armors = self.selection.armors.len(),
            inserted,
            policy = ?self.policy,
            "equipped selection"
        );
        self.selection.clear();
        Ok(inserted)
    }

    /// Remove every join row (duplicates too) for each selected pair and return
    /// how many rows went away.
    pub fn unequip_all(&mut self) -> ServiceResult<usize> {
        let pairs = self.resolve_pairs("unequip")?;

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(anyhow::Error::from)?;
        let mut removed = 0;
        for &(character_id, armor_id) in &pairs {
            removed += unlink_armor(&tx, character_id, armor_id)?;
        }
        tx.commit().map_err(anyhow::Error::from)?;

        info!(
            characters = self.selection.characters.len(),
            armors = self.selection.armors.len(),
            removed,
            "unequipped selection"
        );
        self.selection.clear();
        Ok(removed)
    }

    pub fn clear_selections(&mut self) {
        self.selection.clear();
    }

    /// Cartesian product of the selection as id pairs. Every name is resolved
    /// before anything is written.
    fn resolve_pairs(&self, action: &str) -> ServiceResult<Vec<(i64, i64)>> {
        if self.selection.characters.is_empty() || self.selection.armors.is_empty() {
            warn!(action, "nothing selected");
            return Err(ServiceError::validation(format!(
                "Please add both characters and equipment to {action}."
            )));
        }

        let characters = CharacterService::new(self.conn);
        let armors = ArmorService::new(self.conn);

        let character_ids = self
            .selection
            .characters
            .iter()
            .map(|name| characters.require(name).map(|character| character.id))
            .collect::<ServiceResult<Vec<_>>>()?;
        let armor_ids = self
            .selection
            .armors
            .iter()
            .map(|name| armors.require(name).map(|armor| armor.id))
            .collect::<ServiceResult<Vec<_>>>()?;

        Ok(character_ids
            .iter()
            .flat_map(|&character_id| armor_ids.iter().map(move |&armor_id| (character_id, armor_id)))
            .collect())
    }
}
