use tabletop_rpg_manager::{AppConfig, BattleOutcome, EquipPolicy, ServiceError, Session};
use tempfile::TempDir;

fn session() -> Session {
    Session::in_memory(EquipPolicy::AllowDuplicates).unwrap()
}

fn link_rows(session: &Session) -> i64 {
    session
        .connection()
        .query_row("SELECT COUNT(*) FROM character_armor", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn test_crud_for_every_record_type() {
    let session = session();

    let aria = session.characters().add("Aria", "Ranger", "3").unwrap();
    assert_eq!(aria.level, 3);
    session.armors().add("Helm", "Iron helm", "2").unwrap();
    session.monsters().add("Goblin", "Small and mean", "4").unwrap();

    let fetched = session.characters().get_by_name("Aria").unwrap().unwrap();
    assert_eq!(fetched, aria);
    assert_eq!(session.armors().get_by_name("Helm").unwrap().unwrap().bonus, 2);
    assert_eq!(session.monsters().battle_power("Goblin").unwrap(), 4);

    session.characters().delete("Aria").unwrap();
    session.armors().delete("Helm").unwrap();
    session.monsters().delete("Goblin").unwrap();

    assert!(session.characters().list_all().unwrap().is_empty());
    assert!(session.armors().list_all().unwrap().is_empty());
    assert!(session.monsters().list_all().unwrap().is_empty());
    assert!(matches!(
        session.monsters().delete("Goblin"),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn test_cartesian_equip_then_unequip() {
    let mut session = session();
    for name in ["Aria", "Borin"] {
        session.characters().add(name, "Hero", "5").unwrap();
    }
    for (name, bonus) in [("Helm", "2"), ("Shield", "3")] {
        session.armors().add(name, "Gear", bonus).unwrap();
    }

    for _ in 0..2 {
        let mut equip = session.equip();
        equip.add_character_to_selection("Aria").unwrap();
        equip.add_character_to_selection("Borin").unwrap();
        equip.add_armor_to_selection("Helm").unwrap();
        equip.add_armor_to_selection("Shield").unwrap();
        assert_eq!(equip.equip_all().unwrap(), 4);
    }
    assert_eq!(link_rows(&session), 8);
    // Duplicated links stack: 5 + 2 * (2 + 3).
    assert_eq!(session.characters().compute_battle_power("Aria").unwrap(), 15);

    let mut equip = session.equip();
    equip.add_character_to_selection("Aria").unwrap();
    equip.add_character_to_selection("Borin").unwrap();
    equip.add_armor_to_selection("Helm").unwrap();
    equip.add_armor_to_selection("Shield").unwrap();
    assert_eq!(equip.unequip_all().unwrap(), 8);
    assert_eq!(link_rows(&session), 0);
    assert!(session.equip_selection().is_empty());
}

#[test]
fn test_unique_pairs_policy_skips_existing_links() {
    let mut session = Session::in_memory(EquipPolicy::UniquePairs).unwrap();
    session.characters().add("Aria", "Ranger", "5").unwrap();
    session.armors().add("Helm", "Iron", "2").unwrap();

    for expected in [1, 0] {
        let mut equip = session.equip();
        equip.add_character_to_selection("Aria").unwrap();
        equip.add_armor_to_selection("Helm").unwrap();
        assert_eq!(equip.equip_all().unwrap(), expected);
    }
    assert_eq!(link_rows(&session), 1);
    assert_eq!(session.characters().compute_battle_power("Aria").unwrap(), 7);
}

#[test]
fn test_battle_outcomes() {
    let mut session = session();
    session.characters().add("Aria", "Ranger", "10").unwrap();
    session.armors().add("Helm", "Iron", "5").unwrap();
    session.monsters().add("Dragon Lord", "Ancient", "18").unwrap();

    {
        let mut equip = session.equip();
        equip.add_character_to_selection("Aria").unwrap();
        equip.add_armor_to_selection("Helm").unwrap();
        equip.equip_all().unwrap();
    }

    let mut battle = session.battle();
    battle.add_character_to_battle("Aria").unwrap();
    battle.add_monster_to_battle("Dragon Lord").unwrap();

    let report = battle.resolve("5", "0").unwrap();
    assert_eq!(report.character_total, 20);
    assert_eq!(report.monster_total, 18);
    assert_eq!(report.outcome, BattleOutcome::CharactersWin);

    let report = battle.resolve("3", "0").unwrap();
    assert_eq!(report.outcome, BattleOutcome::Draw);

    assert!(matches!(
        battle.resolve("three", "0"),
        Err(ServiceError::Validation(_))
    ));
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let session = session();
    session.monsters().add("Dragon Lord", "Boss", "30").unwrap();
    session.monsters().add("Goblin", "Minion", "2").unwrap();
    session.monsters().add("Red Dragon", "Wyrm", "25").unwrap();

    assert_eq!(
        session.monsters().search("drag").unwrap(),
        vec!["Dragon Lord", "Red Dragon"]
    );
    assert_eq!(session.monsters().search("").unwrap().len(), 3);
    assert!(session.monsters().search("orc").unwrap().is_empty());
}

#[test]
fn test_non_integer_update_is_rejected() {
    let session = session();
    session.characters().add("Aria", "Ranger", "4").unwrap();

    let err = session.characters().update_level("Aria", "high").unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(session.characters().get_by_name("Aria").unwrap().unwrap().level, 4);

    session.characters().update_level("Aria", "9").unwrap();
    assert_eq!(session.characters().get_by_name("Aria").unwrap().unwrap().level, 9);
}

#[test]
fn test_store_persists_across_sessions() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        db_path: dir.path().join("data").join("rpg.sqlite"),
        log_path: dir.path().join("rpg.log"),
        equip_policy: EquipPolicy::default(),
    };

    {
        let mut session = Session::open(&config).unwrap();
        session.characters().add("Aria", "Ranger", "6").unwrap();
        session.armors().add("Helm", "Iron", "1").unwrap();
        let mut equip = session.equip();
        equip.add_character_to_selection("Aria").unwrap();
        equip.add_armor_to_selection("Helm").unwrap();
        equip.equip_all().unwrap();
    }

    let session = Session::open(&config).unwrap();
    assert_eq!(session.characters().list_all().unwrap(), vec!["Aria"]);
    assert_eq!(session.characters().compute_battle_power("Aria").unwrap(), 7);
    // Selections are per session.
    assert!(session.equip_selection().is_empty());
}
