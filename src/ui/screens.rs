use crate::models::{
    Armor, BattleReport, CharacterSheet, Monster, DEFAULT_BONUS, DEFAULT_LEVEL,
    DEFAULT_MONSTER_POWER,
};

/// Which record type a list, form or confirmation is about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum EntityKind {
    Character,
    Armor,
    Monster,
}

impl EntityKind {
    /// Label used in titles and status messages.
    pub(crate) fn noun(self) -> &'static str {
        match self {
            EntityKind::Character => "Character",
            EntityKind::Armor => "Equipment",
            EntityKind::Monster => "Monster",
        }
    }

    /// Name of the numeric attribute.
    pub(crate) fn value_label(self) -> &'static str {
        match self {
            EntityKind::Character => "Level",
            EntityKind::Armor => "Bonus",
            EntityKind::Monster => "Battle Power",
        }
    }

    pub(crate) fn default_value(self) -> i64 {
        match self {
            EntityKind::Character => DEFAULT_LEVEL,
            EntityKind::Armor => DEFAULT_BONUS,
            EntityKind::Monster => DEFAULT_MONSTER_POWER,
        }
    }
}

/// Name list for one record type plus its search filter and cursor.
pub(crate) struct EntityList {
    pub(crate) kind: EntityKind,
    pub(crate) names: Vec<String>,
    pub(crate) filter: Option<String>,
    pub(crate) selected: usize,
}

impl EntityList {
    pub(crate) fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            names: Vec::new(),
            filter: None,
            selected: 0,
        }
    }

    /// The query to pass to `search`; an absent filter matches everything.
    pub(crate) fn query(&self) -> &str {
        self.filter.as_deref().unwrap_or("")
    }

    /// Replace the names, keeping the cursor on `focus` when it is still
    /// listed.
    pub(crate) fn set_names(&mut self, names: Vec<String>, focus: Option<&str>) {
        self.names = names;
        if let Some(focus) = focus {
            if let Some(idx) = self.names.iter().position(|name| name == focus) {
                self.selected = idx;
                return;
            }
        }
        self.ensure_in_bounds();
    }

    pub(crate) fn current(&self) -> Option<&str> {
        self.names.get(self.selected).map(String::as_str)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.names.is_empty() {
            self.selected = 0;
            return;
        }
        let max = self.names.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, max) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.names.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        if self.names.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.names.len() {
            self.selected = self.names.len() - 1;
        }
    }
}

/// Loaded record for the detail pane of the current screen.
pub(crate) enum Detail {
    Empty,
    Character(CharacterSheet),
    Armor(Armor),
    Monster(Monster),
}

impl Detail {
    /// Current numeric attribute, used to seed the edit form.
    pub(crate) fn value(&self) -> Option<i64> {
        match self {
            Detail::Empty => None,
            Detail::Character(sheet) => Some(sheet.character.level),
            Detail::Armor(armor) => Some(armor.bonus),
            Detail::Monster(monster) => Some(monster.battle_power),
        }
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        match self {
            Detail::Empty => vec!["Nothing selected.".to_string()],
            Detail::Character(sheet) => vec![
                format!("Name: {}", sheet.character.name),
                format!("Level: {}", sheet.character.level),
                format!("Equipment: {}", sheet.equipment_summary()),
                format!("Battle Power: {}", sheet.battle_power),
                String::new(),
                sheet.character.description.clone(),
            ],
            Detail::Armor(armor) => vec![
                format!("Name: {}", armor.name),
                format!("Bonus: {}", armor.bonus),
                String::new(),
                armor.description.clone(),
            ],
            Detail::Monster(monster) => vec![
                format!("Name: {}", monster.name),
                format!("Battle Power: {}", monster.battle_power),
                String::new(),
                monster.description.clone(),
            ],
        }
    }
}

/// Modifier text and the last result on the battle screen.
pub(crate) struct BattleScreen {
    pub(crate) character_modifier: String,
    pub(crate) monster_modifier: String,
    pub(crate) last_report: Option<BattleReport>,
}

impl Default for BattleScreen {
    fn default() -> Self {
        Self {
            character_modifier: "0".to_string(),
            monster_modifier: "0".to_string(),
            last_report: None,
        }
    }
}
