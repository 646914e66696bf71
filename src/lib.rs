//! Core library surface for the tabletop RPG manager.
//!
//! Characters, armor and monsters live in an embedded SQLite store. The
//! services in [`services`] validate raw user input, equip armor onto
//! characters in bulk and resolve battles; [`Session`] ties them to one open
//! database, and [`ui`] puts a terminal interface on top.
pub mod config;
pub mod db;
pub mod error;
mod input;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod ui;

pub use config::{AppConfig, EquipPolicy};
pub use error::{ServiceError, ServiceResult};
pub use logging::init_file_logger;
pub use models::{
    Armor, BattleOutcome, BattleReport, Character, CharacterSheet, EquippedArmor, Monster,
};
pub use session::Session;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
