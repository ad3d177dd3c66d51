//! Station economy: upgrade pricing, purchases, cargo sales and the
//! between-flight transactions (tow rescue, sector hyperjump, new game).
//!
//! Every operation mutates a [`PlayerState`] in place and is atomic: either
//! the whole change applies or nothing does.  Refusals (not enough credits,
//! nothing to sell) return `None` and leave the player untouched.

use crate::config::GameConfig;
use crate::constants::{
    BATTERY_COST_BASE, CARGO_COST_BASE, ENGINE_COST_BASE, SCANNER_RANGE_COST_BASE,
    SCANNER_SPEED_COST_BASE, SOLAR_COST_BASE,
};
use crate::player::{max_energy_for_battery, PlayerState, UpgradeKind};

/// Base of the cost curve for `kind`.
#[inline]
pub fn cost_base(kind: UpgradeKind) -> u32 {
    match kind {
        UpgradeKind::Engine => ENGINE_COST_BASE,
        UpgradeKind::ScannerSpeed => SCANNER_SPEED_COST_BASE,
        UpgradeKind::ScannerRange => SCANNER_RANGE_COST_BASE,
        UpgradeKind::CargoCapacity => CARGO_COST_BASE,
        UpgradeKind::Battery => BATTERY_COST_BASE,
        UpgradeKind::SolarCharging => SOLAR_COST_BASE,
    }
}

/// Price of the next level when currently at `level`: `base * 2^level`.
///
/// Saturates instead of overflowing for absurd levels.
#[inline]
pub fn upgrade_cost(kind: UpgradeKind, level: u32) -> u32 {
    let factor = 1u32.checked_shl(level).unwrap_or(u32::MAX);
    cost_base(kind).saturating_mul(factor)
}

/// Price of the next `kind` upgrade for this player.
#[inline]
pub fn next_cost(player: &PlayerState, kind: UpgradeKind) -> u32 {
    upgrade_cost(kind, player.upgrades.level(kind))
}

#[inline]
pub fn can_afford(player: &PlayerState, kind: UpgradeKind) -> bool {
    player.credits >= next_cost(player, kind)
}

/// Buy one level of `kind`.  Returns the credits spent, or `None` when the
/// player cannot afford it.
///
/// Battery purchases immediately raise the energy capacity and refill the
/// cell as a purchase bonus.
pub fn try_purchase(
    player: &mut PlayerState,
    kind: UpgradeKind,
    config: &GameConfig,
) -> Option<u32> {
    let cost = next_cost(player, kind);
    if player.credits < cost {
        return None;
    }
    player.credits -= cost;
    let level = player.upgrades.level_mut(kind);
    *level = level.saturating_add(1);
    if kind == UpgradeKind::Battery {
        player.max_energy = max_energy_for_battery(*level, config);
        player.energy = player.max_energy;
    }
    Some(cost)
}

/// Sell the entire cargo buffer.  Returns the credits earned (zero for an
/// empty buffer).
pub fn sell_cargo(player: &mut PlayerState) -> u32 {
    let total = player.cargo_value();
    player.credits = player.credits.saturating_add(total);
    player.scanned_items.clear();
    total
}

/// Completion bonus awarded when a sector is fully mapped.
#[inline]
pub fn sector_bonus(config: &GameConfig) -> u32 {
    config.sector_bonus_unit.saturating_mul(config.objects_per_sector)
}

/// Hyperjump to the next sector: bonus credits, level + 1, progress reset,
/// free recharge.  Returns the bonus paid.
pub fn advance_sector(player: &mut PlayerState, config: &GameConfig) -> u32 {
    let bonus = sector_bonus(config);
    player.credits = player.credits.saturating_add(bonus);
    player.sector_level = player.sector_level.saturating_add(1);
    player.sector_progress = 0;
    player.energy = player.max_energy;
    bonus
}

/// Emergency tow back to the station after running dry.
///
/// Charges `tow_cost` and refills the cell.  Returns `None` when the pilot
/// cannot pay, which is the game-over branch.
pub fn request_tow(player: &mut PlayerState, config: &GameConfig) -> Option<u32> {
    if player.credits < config.tow_cost {
        return None;
    }
    player.credits -= config.tow_cost;
    player.energy = player.max_energy;
    Some(config.tow_cost)
}

/// Launch from the menu: a pilot who quit with an empty cell starts full.
pub fn prepare_launch(player: &mut PlayerState) {
    if player.energy <= 0.0 {
        player.energy = player.max_energy;
    }
}

/// Wipe all progress.
pub fn new_game(player: &mut PlayerState, config: &GameConfig) {
    *player = PlayerState::fresh(config);
}
