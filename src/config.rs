use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".tabletop-rpg-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "rpg_characters.sqlite";
/// Log file name stored next to the database.
const LOG_FILE_NAME: &str = "rpg-manager.log";

const DB_ENV: &str = "RPG_MANAGER_DB";
const LOG_ENV: &str = "RPG_MANAGER_LOG";
const EQUIP_POLICY_ENV: &str = "RPG_MANAGER_EQUIP_POLICY";

/// How `equip_all` treats a character/armor pair that is already linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EquipPolicy {
    /// Insert another join row; the bonus then counts twice.
    #[default]
    AllowDuplicates,
    /// Skip pairs that already have a join row.
    UniquePairs,
}

impl EquipPolicy {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "duplicates" | "allow-duplicates" => Ok(EquipPolicy::AllowDuplicates),
            "unique" | "unique-pairs" => Ok(EquipPolicy::UniquePairs),
            other => bail!("unknown equip policy '{other}' (expected 'duplicates' or 'unique')"),
        }
    }
}

/// Start-up settings, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub equip_policy: EquipPolicy,
}

impl AppConfig {
    /// Resolve paths under the user's home directory, letting environment
    /// variables override each piece.
    pub fn from_env() -> Result<Self> {
        let db_override = env::var_os(DB_ENV).map(PathBuf::from);
        let log_override = env::var_os(LOG_ENV).map(PathBuf::from);

        let data_dir = if db_override.is_some() && log_override.is_some() {
            None
        } else {
            Some(data_dir()?)
        };

        let db_path = match db_override {
            Some(path) => path,
            None => data_dir
                .as_ref()
                .map(|dir| dir.join(DB_FILE_NAME))
                .ok_or_else(|| anyhow!("could not resolve database path"))?,
        };
        let log_path = match log_override {
            Some(path) => path,
            None => data_dir
                .as_ref()
                .map(|dir| dir.join(LOG_FILE_NAME))
                .ok_or_else(|| anyhow!("could not resolve log path"))?,
        };

        let equip_policy = match env::var(EQUIP_POLICY_ENV) {
            Ok(raw) => EquipPolicy::parse(&raw)?,
            Err(_) => EquipPolicy::default(),
        };

        Ok(Self {
            db_path,
            log_path,
            equip_policy,
        })
    }
}

/// Resolve the application data directory inside the user's home.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equip_policy_parse() {
        assert_eq!(EquipPolicy::parse("").unwrap(), EquipPolicy::AllowDuplicates);
        assert_eq!(
            EquipPolicy::parse("Duplicates").unwrap(),
            EquipPolicy::AllowDuplicates
        );
        assert_eq!(EquipPolicy::parse(" unique ").unwrap(), EquipPolicy::UniquePairs);
        assert!(EquipPolicy::parse("sometimes").is_err());
    }
}
