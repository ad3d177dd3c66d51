//! Save-file round trips and migration of older documents.

use tempfile::TempDir;

use void_prospector::config::GameConfig;
use void_prospector::economy;
use void_prospector::error::ProspectorError;
use void_prospector::mineral::MineralType;
use void_prospector::player::{CargoItem, PlayerState, UpgradeKind};
use void_prospector::save::{load_player, parse_player_with_migration, write_player};

#[test]
fn written_player_loads_back_identically() {
    let config = GameConfig::default();
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("player.toml");

    let mut player = PlayerState::fresh(&config);
    player.credits = 1_234;
    player.energy = 42.5;
    player.total_discoveries = 17;
    player.sector_level = 3;
    player.sector_progress = 9;
    *player.upgrades.level_mut(UpgradeKind::ScannerRange) = 4;
    player.scanned_items.push(CargoItem {
        id: "ast_12_3".into(),
        mineral: MineralType::Iridium,
        position: [1500.0, -220.0],
        radius: 33.0,
    });

    write_player(&path, &player).expect("write save");
    let loaded = load_player(&path, &config).expect("load save");
    assert_eq!(loaded, player);
}

#[test]
fn missing_file_means_fresh_pilot() {
    let config = GameConfig::default();
    let tmp = TempDir::new().unwrap();
    let loaded = load_player(&tmp.path().join("player.toml"), &config).expect("fresh");
    assert_eq!(loaded, PlayerState::fresh(&config));
}

#[test]
fn partial_document_is_filled_in() {
    let config = GameConfig::default();
    let doc = r#"
credits = 800
energy = 60.0

[upgrades]
engine = 3
battery = 2
"#;
    let player = parse_player_with_migration(doc, &config).expect("migrates");
    assert_eq!(player.credits, 800);
    assert_eq!(player.energy, 60.0);
    assert_eq!(player.upgrades.engine, 3);
    assert_eq!(player.upgrades.scanner_speed, 1);
    assert_eq!(player.upgrades.solar_charging, 1);
    assert_eq!(
        player.max_energy,
        config.base_energy + config.energy_per_level
    );
    assert_eq!(player.sector_level, 1);
    assert_eq!(player.sector_progress, 0);
    assert_eq!(player.total_discoveries, 0);
    assert!(player.scanned_items.is_empty());
}

#[test]
fn out_of_range_energy_is_clamped() {
    let config = GameConfig::default();
    let doc = r#"
energy = 500.0
max_energy = 100.0
sector_level = 0
"#;
    let player = parse_player_with_migration(doc, &config).expect("migrates");
    assert_eq!(player.energy, 100.0);
    assert_eq!(player.sector_level, 1);
}

#[test]
fn absurd_upgrade_levels_load_without_overflow() {
    let config = GameConfig::default();
    let doc = r#"
credits = 4294967295
sector_level = 4294967295

[upgrades]
cargo_capacity = 4000000000
battery = 4294967295
"#;
    let mut player = parse_player_with_migration(doc, &config).expect("migrates");
    assert_eq!(player.upgrades.cargo_capacity, 4_000_000_000);
    assert_eq!(player.max_cargo(&config), u32::MAX as usize);
    assert!(!player.cargo_full(&config));

    let spent = economy::try_purchase(&mut player, UpgradeKind::Battery, &config);
    assert_eq!(spent, Some(u32::MAX));
    assert_eq!(player.upgrades.battery, u32::MAX);
    assert_eq!(player.credits, 0);

    let bonus = economy::advance_sector(&mut player, &config);
    assert_eq!(player.sector_level, u32::MAX);
    assert_eq!(player.credits, bonus);
}

#[test]
fn malformed_upgrades_are_rejected() {
    let config = GameConfig::default();
    let err = parse_player_with_migration("upgrades = 5\n", &config).unwrap_err();
    assert!(matches!(err, ProspectorError::Migration(_)));
}

#[test]
fn garbage_is_a_parse_error() {
    let config = GameConfig::default();
    let err = parse_player_with_migration("credits = = 3", &config).unwrap_err();
    assert!(matches!(err, ProspectorError::Parse(_)));
}
