use anyhow::Result;
use rusqlite::Connection;

use crate::config::{AppConfig, EquipPolicy};
use crate::db::{open_database, open_in_memory};
use crate::services::{
    ArmorService, BattleRoster, BattleService, CharacterService, EquipSelection, EquipService,
    MonsterService,
};

/// Everything one run of the application works with: the open store plus the
/// equip selection and battle roster. Built once in `main` and handed to the
/// UI, which reaches the services through the accessors below.
pub struct Session {
    conn: Connection,
    policy: EquipPolicy,
    selection: EquipSelection,
    roster: BattleRoster,
}

impl Session {
    /// Open the configured database, creating the schema when needed.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let conn = open_database(&config.db_path)?;
        Ok(Self::with_connection(conn, config.equip_policy))
    }

    /// Session backed by a fresh in-memory database.
    pub fn in_memory(policy: EquipPolicy) -> Result<Self> {
        Ok(Self::with_connection(open_in_memory()?, policy))
    }

    fn with_connection(conn: Connection, policy: EquipPolicy) -> Self {
        Self {
            conn,
            policy,
            selection: EquipSelection::default(),
            roster: BattleRoster::default(),
        }
    }

    pub fn characters(&self) -> CharacterService<'_> {
        CharacterService::new(&self.conn)
    }

    pub fn armors(&self) -> ArmorService<'_> {
        ArmorService::new(&self.conn)
    }

    pub fn monsters(&self) -> MonsterService<'_> {
        MonsterService::new(&self.conn)
    }

    pub fn equip(&mut self) -> EquipService<'_> {
        EquipService::new(&self.conn, &mut self.selection, self.policy)
    }

    pub fn battle(&mut self) -> BattleService<'_> {
        BattleService::new(&self.conn, &mut self.roster)
    }

    pub fn equip_selection(&self) -> &EquipSelection {
        &self.selection
    }

    pub fn battle_roster(&self) -> &BattleRoster {
        &self.roster
    }

    pub fn equip_policy(&self) -> EquipPolicy {
        self.policy
    }

    /// Raw connection, for inspecting the store directly.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
