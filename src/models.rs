//! Domain models that mirror the SQLite schema and get passed between the
//! services and the TUI. They stay plain data holders; the queries live in
//! `db` and the rules in `services`.

use std::fmt;

/// Default level for a character whose level input could not be parsed.
pub const DEFAULT_LEVEL: i64 = 1;
/// Default bonus for a piece of armor.
pub const DEFAULT_BONUS: i64 = 0;
/// Default stored battle power for a monster.
pub const DEFAULT_MONSTER_POWER: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A player character row.
pub struct Character {
    /// Primary key from the database. The UI looks characters up by name, but
    /// the join table is keyed by id.
    pub id: i64,
    pub name: String,
    pub description: String,
    /// May be negative.
    pub level: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A piece of armor (the UI calls it "equipment").
pub struct Armor {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub bonus: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A monster with a stored, not derived, battle power.
pub struct Monster {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub battle_power: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the character's equipment list. A pair that was equipped twice
/// shows up twice.
pub struct EquippedArmor {
    pub name: String,
    pub bonus: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything the character detail pane renders in one go.
pub struct CharacterSheet {
    pub character: Character,
    pub equipped: Vec<EquippedArmor>,
    pub battle_power: i64,
}

impl CharacterSheet {
    /// Comma-separated armor names, or the literal "None" when nothing is
    /// equipped.
    pub fn equipment_summary(&self) -> String {
        if self.equipped.is_empty() {
            "None".to_string()
        } else {
            self.equipped
                .iter()
                .map(|armor| armor.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    CharactersWin,
    MonstersWin,
    Draw,
}

impl BattleOutcome {
    /// Compare the two final totals.
    pub fn from_totals(characters: i64, monsters: i64) -> Self {
        match characters.cmp(&monsters) {
            std::cmp::Ordering::Greater => BattleOutcome::CharactersWin,
            std::cmp::Ordering::Less => BattleOutcome::MonstersWin,
            std::cmp::Ordering::Equal => BattleOutcome::Draw,
        }
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BattleOutcome::CharactersWin => "Characters Win!",
            BattleOutcome::MonstersWin => "Monsters Win!",
            BattleOutcome::Draw => "It's a Draw!",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of resolving a battle: the outcome plus both final totals
/// (modifiers included).
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub character_total: i64,
    pub monster_total: i64,
}

impl fmt::Display for BattleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Characters: {} Monsters: {}",
            self.outcome, self.character_total, self.monster_total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_totals() {
        assert_eq!(BattleOutcome::from_totals(20, 18), BattleOutcome::CharactersWin);
        assert_eq!(BattleOutcome::from_totals(3, 9), BattleOutcome::MonstersWin);
        assert_eq!(BattleOutcome::from_totals(10, 10), BattleOutcome::Draw);
    }

    #[test]
    fn test_equipment_summary() {
        let mut sheet = CharacterSheet {
            character: Character {
                id: 1,
                name: "Aria".into(),
                description: "Ranger".into(),
                level: 3,
            },
            equipped: Vec::new(),
            battle_power: 3,
        };
        assert_eq!(sheet.equipment_summary(), "None");

        sheet.equipped.push(EquippedArmor {
            name: "Helm".into(),
            bonus: 2,
        });
        sheet.equipped.push(EquippedArmor {
            name: "Shield".into(),
            bonus: 1,
        });
        assert_eq!(sheet.equipment_summary(), "Helm, Shield");
    }
}
