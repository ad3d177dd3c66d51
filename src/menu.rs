//! Full-screen overlays for every non-flight state.
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                      | Schedule                   | Purpose                          |
//! |-----------------------------|----------------------------|----------------------------------|
//! | `setup_main_menu`           | `OnEnter(MainMenu)`        | Title card and key hints         |
//! | `setup_station`             | `OnEnter(Station)`         | Cargo, credits and upgrade list  |
//! | `refresh_station_system`    | `Update / in Station`      | Re-price after a sale or purchase |
//! | `setup_sector_cleared`      | `OnEnter(SectorCleared)`   | Bonus and hyperjump prompt       |
//! | `setup_game_over`           | `OnEnter(GameOver)`        | Tow offer and reboot prompt      |
//! | `quit_button_system`        | `Update / in MainMenu`     | Quit button hover and press      |
//! | `despawn_overlay::<M>`      | `OnExit(*)`                | Despawn the matching overlay     |
//!
//! Key handling for these states lives in [`crate::app`]; the overlays are
//! display only, apart from the Quit button.

use bevy::prelude::*;

use crate::app::GameState;
use crate::config::GameConfig;
use crate::economy;
use crate::player::{PlayerState, UpgradeKind};

mod common;
mod screens;
mod station;

use common::*;

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the main-menu overlay.
#[derive(Component)]
pub struct MainMenuRoot;

/// Tags the "Quit" button on the main menu.
#[derive(Component)]
pub struct MenuQuitButton;

/// Root node of the station overlay.
#[derive(Component)]
pub struct StationRoot;

/// Credits and cargo summary line in the station overlay.
#[derive(Component)]
pub struct StationSummaryText;

/// One upgrade row; the index is into [`UpgradeKind::ALL`].
#[derive(Component)]
pub struct StationUpgradeText(pub usize);

/// Root node of the sector-cleared overlay.
#[derive(Component)]
pub struct SectorClearedRoot;

/// Root node of the game-over overlay.
#[derive(Component)]
pub struct GameOverRoot;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Spawns and despawns the overlays as `GameState` changes.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::MainMenu), screens::setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), despawn_overlay::<MainMenuRoot>)
            .add_systems(OnEnter(GameState::Station), station::setup_station)
            .add_systems(OnExit(GameState::Station), despawn_overlay::<StationRoot>)
            .add_systems(
                OnEnter(GameState::SectorCleared),
                screens::setup_sector_cleared,
            )
            .add_systems(
                OnExit(GameState::SectorCleared),
                despawn_overlay::<SectorClearedRoot>,
            )
            .add_systems(OnEnter(GameState::GameOver), screens::setup_game_over)
            .add_systems(OnExit(GameState::GameOver), despawn_overlay::<GameOverRoot>)
            .add_systems(
                Update,
                (
                    station::refresh_station_system.run_if(in_state(GameState::Station)),
                    screens::quit_button_system.run_if(in_state(GameState::MainMenu)),
                ),
            );
    }
}

/// Recursively despawn every overlay tagged with `M`.
pub fn despawn_overlay<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
