//! Persistence module split across logical submodules. Each function wraps one
//! query and returns `anyhow::Result` with a context message; the services
//! decide what a missing row means.

mod armors;
mod characters;
mod connection;
mod equipment;
mod monsters;

pub use armors::{
    create_armor, delete_armors_by_name, fetch_armor_by_name, fetch_armor_names,
    update_armor_bonus,
};
pub use characters::{
    create_character, delete_characters_by_name, fetch_character_by_name, fetch_character_names,
    update_character_level,
};
pub use connection::{ensure_schema, open_database, open_in_memory};
pub use equipment::{
    count_links, fetch_equipped_armor, link_armor, link_armor_once, sum_equipped_bonus,
    unlink_armor,
};
pub use monsters::{
    create_monster, delete_monsters_by_name, fetch_monster_by_name, fetch_monster_names,
    update_monster_power,
};
