//! Domain services. Each one borrows the session's connection; the equip and
//! battle services also borrow their transient selection state.

mod armors;
mod battle;
mod characters;
mod equip;
mod monsters;

pub use armors::ArmorService;
pub use battle::{BattleRoster, BattleService};
pub use characters::CharacterService;
pub use equip::{EquipSelection, EquipService};
pub use monsters::MonsterService;

use crate::error::{ServiceError, ServiceResult};

/// Keep the names whose lowercase form contains the lowercase query. An empty
/// query keeps everything.
pub(crate) fn filter_names(names: Vec<String>, query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return names;
    }
    names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&query))
        .collect()
}

/// Add `amount` to a battle power total. Totals past the `i64` range are
/// rejected instead of wrapping.
pub(crate) fn add_power(total: i64, amount: i64) -> ServiceResult<i64> {
    total.checked_add(amount).ok_or_else(|| {
        ServiceError::validation("Battle power is too large to calculate.")
    })
}

/// Append `name` unless it is already present. Returns whether it was added.
pub(crate) fn push_unique(list: &mut Vec<String>, name: String) -> bool {
    if list.contains(&name) {
        false
    } else {
        list.push(name);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_names() {
        let names = vec!["Dragon Lord".to_string(), "Goblin".to_string()];
        assert_eq!(filter_names(names.clone(), "drag"), vec!["Dragon Lord"]);
        assert_eq!(filter_names(names.clone(), "O"), names);
        assert_eq!(filter_names(names.clone(), ""), names);
        assert!(filter_names(names, "troll").is_empty());
    }

    #[test]
    fn test_push_unique() {
        let mut list = Vec::new();
        assert!(push_unique(&mut list, "Aria".into()));
        assert!(!push_unique(&mut list, "Aria".into()));
        assert!(push_unique(&mut list, "aria".into()));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_add_power_rejects_overflow() {
        assert_eq!(add_power(4, -6).unwrap(), -2);
        assert!(matches!(
            add_power(i64::MAX, 1),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            add_power(i64::MIN, -1),
            Err(ServiceError::Validation(_))
        ));
    }
}
