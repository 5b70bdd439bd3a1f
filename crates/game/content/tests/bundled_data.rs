use std::path::PathBuf;

use battle_content::{ConfigLoader, RosterLoader};
use battle_core::{CharacterId, PcgRng, TurnBasedBattle};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../client/cli/data")
}

#[test]
fn bundled_roster_loads() {
    let config = ConfigLoader::load(&data_dir().join("battle.toml")).unwrap();
    assert_eq!(config.max_rounds, Some(200));

    let loaded = RosterLoader::load(&data_dir().join("roster.ron"), &config).unwrap();
    assert_eq!(loaded.roster.len(), 6);
    assert_eq!(loaded.move_sets.len(), 6);
    assert_eq!(loaded.roster.teams().len(), 2);

    // Swift Boots: 14 × 1.3 = 18, under the cap of 20
    assert_eq!(loaded.roster.get(CharacterId(2)).unwrap().speed(), 18);
    assert_eq!(loaded.roster.get(CharacterId(6)).unwrap().protect_limit(), 2);
}

#[test]
fn bundled_battle_finishes_deterministically() {
    let play = |seed: u64| {
        let config = ConfigLoader::load(&data_dir().join("battle.toml")).unwrap();
        let loaded = RosterLoader::load(&data_dir().join("roster.ron"), &config).unwrap();
        let mut battle =
            TurnBasedBattle::new(loaded.roster, loaded.move_sets, Box::new(PcgRng::new(seed)), config)
                .unwrap();
        let outcome = battle.run();
        let health: Vec<i32> = battle.roster().iter().map(|c| c.health()).collect();
        (outcome, health)
    };

    let (outcome, health) = play(42);
    assert!(outcome.rounds() >= 1 && outcome.rounds() <= 200);
    assert_eq!((outcome, health), play(42));
}
