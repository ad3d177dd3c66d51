//! Persistent player progress and the ship stats derived from it.
//!
//! [`PlayerState`] is the observable snapshot shared with the HUD, the
//! station economy and the save file.  The simulation keeps its own
//! authoritative energy value and writes it back here only at publish points
//! (see [`crate::simulation`]).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::constants::{
    ENGINE_BASE_FACTOR, ENGINE_FACTOR_PER_LEVEL, NOMINAL_FRAME_SECS, SCANNER_LEVEL_STEP,
    THRUST_TO_ACCEL,
};
use crate::mineral::MineralType;

/// A scanned object held in the cargo buffer until sold.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CargoItem {
    pub id: String,
    pub mineral: MineralType,
    pub position: [f32; 2],
    pub radius: f32,
}

/// Upgrade categories sold at the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    Engine,
    ScannerSpeed,
    ScannerRange,
    CargoCapacity,
    Battery,
    SolarCharging,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::Engine,
        UpgradeKind::ScannerSpeed,
        UpgradeKind::Battery,
        UpgradeKind::ScannerRange,
        UpgradeKind::CargoCapacity,
        UpgradeKind::SolarCharging,
    ];

    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            UpgradeKind::Engine => "Ion Thrusters",
            UpgradeKind::ScannerSpeed => "Analysis Cores",
            UpgradeKind::ScannerRange => "Long-Range Sensors",
            UpgradeKind::CargoCapacity => "Data Banks",
            UpgradeKind::Battery => "Energy Cells",
            UpgradeKind::SolarCharging => "Solar Array",
        }
    }
}

/// Upgrade levels; every category starts at level 1.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upgrades {
    pub engine: u32,
    pub scanner_speed: u32,
    pub scanner_range: u32,
    pub cargo_capacity: u32,
    pub battery: u32,
    pub solar_charging: u32,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self {
            engine: 1,
            scanner_speed: 1,
            scanner_range: 1,
            cargo_capacity: 1,
            battery: 1,
            solar_charging: 1,
        }
    }
}

impl Upgrades {
    #[inline]
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Engine => self.engine,
            UpgradeKind::ScannerSpeed => self.scanner_speed,
            UpgradeKind::ScannerRange => self.scanner_range,
            UpgradeKind::CargoCapacity => self.cargo_capacity,
            UpgradeKind::Battery => self.battery,
            UpgradeKind::SolarCharging => self.solar_charging,
        }
    }

    pub fn level_mut(&mut self, kind: UpgradeKind) -> &mut u32 {
        match kind {
            UpgradeKind::Engine => &mut self.engine,
            UpgradeKind::ScannerSpeed => &mut self.scanner_speed,
            UpgradeKind::ScannerRange => &mut self.scanner_range,
            UpgradeKind::CargoCapacity => &mut self.cargo_capacity,
            UpgradeKind::Battery => &mut self.battery,
            UpgradeKind::SolarCharging => &mut self.solar_charging,
        }
    }
}

/// Everything that survives between sectors and sessions.
#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub credits: u32,
    pub energy: f32,
    pub max_energy: f32,
    pub total_discoveries: u32,
    pub sector_level: u32,
    pub sector_progress: u32,
    pub upgrades: Upgrades,
    /// Cargo buffer, oldest first.
    pub scanned_items: Vec<CargoItem>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::fresh(&GameConfig::default())
    }
}

impl PlayerState {
    /// Brand-new pilot: no credits, full base energy, level-1 upgrades.
    pub fn fresh(config: &GameConfig) -> Self {
        Self {
            credits: 0,
            energy: config.base_energy,
            max_energy: config.base_energy,
            total_discoveries: 0,
            sector_level: 1,
            sector_progress: 0,
            upgrades: Upgrades::default(),
            scanned_items: Vec::new(),
        }
    }

    /// Cargo slots available at the current capacity level.
    #[inline]
    pub fn max_cargo(&self, config: &GameConfig) -> usize {
        let extra = self.upgrades.cargo_capacity.saturating_mul(config.cargo_per_level);
        config.base_cargo.saturating_add(extra) as usize
    }

    #[inline]
    pub fn cargo_full(&self, config: &GameConfig) -> bool {
        self.scanned_items.len() >= self.max_cargo(config)
    }

    /// Thrust power before boost.
    #[inline]
    pub fn thrust_power(&self, config: &GameConfig) -> f32 {
        config.base_speed
            * (ENGINE_BASE_FACTOR + self.upgrades.engine as f32 * ENGINE_FACTOR_PER_LEVEL)
    }

    /// Velocity gained per thrusting frame.
    #[inline]
    pub fn thrust_accel(&self, config: &GameConfig, boosting: bool) -> f32 {
        let boost = if boosting { config.boost_multiplier } else { 1.0 };
        self.thrust_power(config) * boost * THRUST_TO_ACCEL
    }

    #[inline]
    pub fn scan_range(&self, config: &GameConfig) -> f32 {
        config.base_scan_range * (1.0 + self.upgrades.scanner_range as f32 * SCANNER_LEVEL_STEP)
    }

    /// Scan speed in percent per second.
    #[inline]
    pub fn scan_speed(&self, config: &GameConfig) -> f32 {
        config.base_scan_speed * (1.0 + self.upgrades.scanner_speed as f32 * SCANNER_LEVEL_STEP)
    }

    /// Scan progress gained per frame with the trigger held.
    #[inline]
    pub fn scan_rate_per_frame(&self, config: &GameConfig) -> f32 {
        NOMINAL_FRAME_SECS * 60.0 * (self.scan_speed(config) / 100.0)
    }

    /// Solar recharge per frame.
    #[inline]
    pub fn solar_rate(&self, config: &GameConfig) -> f32 {
        config.base_solar_recharge
            + self.upgrades.solar_charging as f32 * config.solar_recharge_per_level
    }

    /// Cargo value if sold now.
    pub fn cargo_value(&self) -> u32 {
        self.scanned_items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.mineral.value()))
    }
}

/// Energy capacity for a battery level (level 1 is the base cell).
#[inline]
pub fn max_energy_for_battery(level: u32, config: &GameConfig) -> f32 {
    config.base_energy + level.saturating_sub(1) as f32 * config.energy_per_level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_player_matches_base_stats() {
        let config = GameConfig::default();
        let p = PlayerState::fresh(&config);
        assert_eq!(p.energy, config.base_energy);
        assert_eq!(p.max_energy, config.base_energy);
        assert_eq!(p.sector_level, 1);
        assert_eq!(p.upgrades, Upgrades::default());
        assert_eq!(p.max_cargo(&config), 7);
    }

    #[test]
    fn scanner_upgrades_scale_range_and_speed() {
        let config = GameConfig::default();
        let mut p = PlayerState::fresh(&config);
        let r1 = p.scan_range(&config);
        let s1 = p.scan_speed(&config);
        p.upgrades.scanner_range = 2;
        p.upgrades.scanner_speed = 2;
        assert!((r1 - 360.0).abs() < 1e-3);
        assert!((p.scan_range(&config) - 420.0).abs() < 1e-3);
        assert!(p.scan_speed(&config) > s1);
    }

    #[test]
    fn boost_multiplies_thrust() {
        let config = GameConfig::default();
        let p = PlayerState::fresh(&config);
        let plain = p.thrust_accel(&config, false);
        let boosted = p.thrust_accel(&config, true);
        assert!((plain - 0.06).abs() < 1e-6);
        assert!((boosted / plain - config.boost_multiplier).abs() < 1e-5);
    }

    #[test]
    fn battery_capacity_curve() {
        let config = GameConfig::default();
        assert_eq!(max_energy_for_battery(1, &config), 100.0);
        assert_eq!(max_energy_for_battery(2, &config), 125.0);
        assert_eq!(max_energy_for_battery(4, &config), 175.0);
    }

    #[test]
    fn level_mut_targets_the_named_field() {
        let mut u = Upgrades::default();
        *u.level_mut(UpgradeKind::CargoCapacity) += 2;
        assert_eq!(u.cargo_capacity, 3);
        assert_eq!(u.level(UpgradeKind::CargoCapacity), 3);
        assert_eq!(u.engine, 1);
    }
}
