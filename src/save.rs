use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::error::{ProspectorError, ProspectorResult};
use crate::player::{max_energy_for_battery, PlayerState};

const UPGRADE_FIELDS: [&str; 6] = [
    "engine",
    "scanner_speed",
    "scanner_range",
    "cargo_capacity",
    "battery",
    "solar_charging",
];

/// Location of the player save file.
#[derive(Resource, Debug, Clone)]
pub struct SavePath(pub PathBuf);

impl Default for SavePath {
    fn default() -> Self {
        Self(save_dir().join("player.toml"))
    }
}

fn save_dir() -> PathBuf {
    PathBuf::from("saves")
}

/// Load the player from `path`.
///
/// A missing file is not an error: it yields a fresh player.
pub fn load_player(path: &Path, config: &GameConfig) -> ProspectorResult<PlayerState> {
    if !path.exists() {
        return Ok(PlayerState::fresh(config));
    }
    let contents = fs::read_to_string(path).map_err(|source| ProspectorError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_player_with_migration(&contents, config)
}

/// Decode a save document, filling in anything older builds did not write.
pub fn parse_player_with_migration(
    contents: &str,
    config: &GameConfig,
) -> ProspectorResult<PlayerState> {
    let mut value: toml::Value = toml::from_str(contents)?;
    migrate_player_value(&mut value, config)?;

    let mut player: PlayerState = value.try_into()?;
    player.max_energy = player.max_energy.max(0.0);
    player.energy = player.energy.clamp(0.0, player.max_energy);
    player.sector_level = player.sector_level.max(1);
    Ok(player)
}

/// Additive migration: only inserts missing keys, never rewrites present ones
/// (except `upgrades.battery` for saves that predate energy entirely).
fn migrate_player_value(value: &mut toml::Value, config: &GameConfig) -> ProspectorResult<()> {
    let table = value
        .as_table_mut()
        .ok_or_else(|| ProspectorError::Migration("save root must be a TOML table".into()))?;

    let predates_energy = !table.contains_key("energy");

    let upgrades = table
        .entry("upgrades")
        .or_insert_with(|| toml::Value::Table(toml::map::Map::new()))
        .as_table_mut()
        .ok_or_else(|| ProspectorError::Migration("`upgrades` must be a table".into()))?;
    for field in UPGRADE_FIELDS {
        if !upgrades.contains_key(field) {
            upgrades.insert(field.to_string(), toml::Value::Integer(1));
        }
    }
    if predates_energy {
        upgrades.insert("battery".to_string(), toml::Value::Integer(1));
    }
    let battery = upgrades
        .get("battery")
        .and_then(toml::Value::as_integer)
        .unwrap_or(1)
        .max(1) as u32;

    if predates_energy {
        let base = toml::Value::Float(config.base_energy as f64);
        table.insert("energy".to_string(), base.clone());
        table.insert("max_energy".to_string(), base);
    } else if !table.contains_key("max_energy") {
        table.insert(
            "max_energy".to_string(),
            toml::Value::Float(max_energy_for_battery(battery, config) as f64),
        );
    }

    if !table.contains_key("sector_level") {
        table.insert("sector_level".to_string(), toml::Value::Integer(1));
        table.insert("sector_progress".to_string(), toml::Value::Integer(0));
    }
    for field in ["credits", "total_discoveries", "sector_progress"] {
        if !table.contains_key(field) {
            table.insert(field.to_string(), toml::Value::Integer(0));
        }
    }
    if !table.contains_key("scanned_items") {
        table.insert("scanned_items".to_string(), toml::Value::Array(Vec::new()));
    }

    Ok(())
}

/// Serialize `player` to `path`, creating parent directories as needed.
pub fn write_player(path: &Path, player: &PlayerState) -> ProspectorResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ProspectorError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let serialized = toml::to_string_pretty(player)?;
    fs::write(path, serialized).map_err(|source| ProspectorError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Startup system: replace the default player with the saved one.
///
/// A corrupt save is reported and a fresh player is used instead.
pub fn load_player_system(
    mut player: ResMut<PlayerState>,
    path: Res<SavePath>,
    config: Res<GameConfig>,
) {
    match load_player(&path.0, &config) {
        Ok(loaded) => {
            info!(
                "Loaded pilot from {}: {} CR, sector {}",
                path.0.display(),
                loaded.credits,
                loaded.sector_level
            );
            *player = loaded;
        }
        Err(err) => {
            warn!("Failed to load {}: {err}; starting fresh", path.0.display());
            *player = PlayerState::fresh(&config);
        }
    }
}

/// Write the player whenever it changes.
pub fn autosave_player_system(player: Res<PlayerState>, path: Res<SavePath>) {
    if !player.is_changed() || player.is_added() {
        return;
    }
    if let Err(err) = write_player(&path.0, &player) {
        error!("Failed to save pilot to {}: {err}", path.0.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_energy_save_gets_base_cell() {
        let config = GameConfig::default();
        let toml = r#"
credits = 320
total_discoveries = 4

[upgrades]
engine = 3
battery = 5
"#;
        let p = parse_player_with_migration(toml, &config).expect("migrates");
        assert_eq!(p.credits, 320);
        assert_eq!(p.energy, config.base_energy);
        assert_eq!(p.max_energy, config.base_energy);
        assert_eq!(p.upgrades.battery, 1);
        assert_eq!(p.upgrades.engine, 3);
        assert_eq!(p.upgrades.solar_charging, 1);
        assert_eq!(p.sector_level, 1);
        assert_eq!(p.sector_progress, 0);
        assert!(p.scanned_items.is_empty());
    }

    #[test]
    fn present_fields_are_kept() {
        let config = GameConfig::default();
        let toml = r#"
credits = 10
energy = 42.5
max_energy = 150.0
sector_level = 3
sector_progress = 17

[upgrades]
battery = 3
"#;
        let p = parse_player_with_migration(toml, &config).expect("migrates");
        assert_eq!(p.energy, 42.5);
        assert_eq!(p.max_energy, 150.0);
        assert_eq!(p.upgrades.battery, 3);
        assert_eq!(p.sector_level, 3);
        assert_eq!(p.sector_progress, 17);
        assert_eq!(p.total_discoveries, 0);
    }

    #[test]
    fn missing_max_energy_follows_battery_level() {
        let config = GameConfig::default();
        let toml = "energy = 10.0\n[upgrades]\nbattery = 3\n";
        let p = parse_player_with_migration(toml, &config).expect("migrates");
        assert_eq!(p.max_energy, 150.0);
        assert_eq!(p.energy, 10.0);
    }

    #[test]
    fn energy_above_capacity_is_clamped() {
        let config = GameConfig::default();
        let toml = "energy = 500.0\nmax_energy = 100.0\n";
        let p = parse_player_with_migration(toml, &config).expect("migrates");
        assert_eq!(p.energy, 100.0);
    }

    #[test]
    fn non_table_upgrades_is_a_migration_error() {
        let config = GameConfig::default();
        let err = parse_player_with_migration("upgrades = 3\n", &config).unwrap_err();
        assert!(matches!(err, ProspectorError::Migration(_)));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let config = GameConfig::default();
        let err = parse_player_with_migration("credits = [", &config).unwrap_err();
        assert!(matches!(err, ProspectorError::Parse(_)));
    }
}
