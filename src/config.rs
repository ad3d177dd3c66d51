//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the constants in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the constants you care about.
//!
//! ## Usage
//!
//! The simulation core never reads globals: every tuning value reaches it
//! through a `&GameConfig`.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{validate_friction, validate_zoom_range, ProspectorResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ────────────────────────────────────────────────────────────────
    pub world_radius: f32,
    pub station_radius: f32,
    pub spawn_buffer: f32,
    pub objects_per_sector: u32,

    // ── Ship: Movement ───────────────────────────────────────────────────────
    pub base_speed: f32,
    pub boost_multiplier: f32,
    pub friction: f32,

    // ── Ship: Energy ─────────────────────────────────────────────────────────
    pub base_energy: f32,
    pub energy_per_level: f32,
    pub thrust_drain: f32,
    pub idle_drain: f32,
    pub scan_drain: f32,
    pub base_solar_recharge: f32,
    pub solar_recharge_per_level: f32,

    // ── Scanner ──────────────────────────────────────────────────────────────
    pub base_scan_range: f32,
    pub base_scan_speed: f32,
    pub scan_cone_cos: f32,
    pub scan_decay: f32,

    // ── Cargo ────────────────────────────────────────────────────────────────
    pub base_cargo: u32,
    pub cargo_per_level: u32,

    // ── Docking ──────────────────────────────────────────────────────────────
    pub dock_range_margin: f32,
    pub dock_max_speed: f32,

    // ── Camera ───────────────────────────────────────────────────────────────
    pub camera_lerp: f32,
    pub zoom_lerp: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_sensitivity: f32,

    // ── Publication ──────────────────────────────────────────────────────────
    pub publish_interval_frames: u64,

    // ── Economy ──────────────────────────────────────────────────────────────
    pub tow_cost: u32,
    pub sector_bonus_unit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // World
            world_radius: WORLD_RADIUS,
            station_radius: STATION_RADIUS,
            spawn_buffer: SPAWN_BUFFER,
            objects_per_sector: MAX_ASTEROIDS,
            // Movement
            base_speed: BASE_SPEED,
            boost_multiplier: BOOST_MULTIPLIER,
            friction: FRICTION,
            // Energy
            base_energy: BASE_ENERGY,
            energy_per_level: ENERGY_PER_LEVEL,
            thrust_drain: THRUST_DRAIN,
            idle_drain: IDLE_DRAIN,
            scan_drain: SCAN_DRAIN,
            base_solar_recharge: BASE_SOLAR_RECHARGE,
            solar_recharge_per_level: SOLAR_RECHARGE_PER_LEVEL,
            // Scanner
            base_scan_range: BASE_SCAN_RANGE,
            base_scan_speed: BASE_SCAN_SPEED,
            scan_cone_cos: SCAN_CONE_COS,
            scan_decay: SCAN_DECAY,
            // Cargo
            base_cargo: BASE_CARGO,
            cargo_per_level: CARGO_PER_LEVEL,
            // Docking
            dock_range_margin: DOCK_RANGE_MARGIN,
            dock_max_speed: DOCK_MAX_SPEED,
            // Camera
            camera_lerp: CAMERA_LERP,
            zoom_lerp: ZOOM_LERP,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            // Publication
            publish_interval_frames: PUBLISH_INTERVAL_FRAMES,
            // Economy
            tow_cost: TOW_COST,
            sector_bonus_unit: SECTOR_BONUS_UNIT,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) TOML document and validate the result.
    pub fn from_toml_str(contents: &str) -> ProspectorResult<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the per-frame invariants.
    pub fn validate(&self) -> ProspectorResult<()> {
        validate_friction(self.friction)?;
        validate_zoom_range(self.zoom_min, self.zoom_max)?;
        Ok(())
    }

    /// Distance from the station centre inside which docking is allowed.
    #[inline]
    pub fn dock_radius(&self) -> f32 {
        self.station_radius + self.dock_range_margin
    }

    /// Where a docked ship is parked.
    #[inline]
    pub fn dock_point(&self) -> Vec2 {
        Vec2::new(0.0, self.station_radius - DOCK_INSET)
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// A missing file keeps the compiled defaults; a malformed or out-of-range
/// file is reported and ignored.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match GameConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded game config from {path}");
            }
            Err(e) => {
                warn!("Failed to load {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {path} found; using compiled defaults");
        }
    }
}
