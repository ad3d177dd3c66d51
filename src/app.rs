//! Application state machine and the gameplay plugin.
//!
//! ## States
//!
//! | State           | Description                                   |
//! |-----------------|-----------------------------------------------|
//! | `MainMenu`      | Title screen; `Space` launches                |
//! | `Playing`       | Flight; the simulation ticks every frame      |
//! | `Station`       | Docked; sell cargo, buy upgrades, launch      |
//! | `SectorCleared` | Every object mapped; `Space` hyperjumps       |
//! | `GameOver`      | Stranded without charge; tow or reboot        |
//!
//! ## Frame pipeline (`Update`, chained)
//!
//! `collect_input_system` → `apply_input_system` → `simulation_tick_system`
//! (only while `Playing`) → `audio_sink_system` → `autosave_player_system`.
//! Drawing lives in [`crate::render::ViewPlugin`], which orders itself after
//! this chain.

use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};

use crate::audio::{audio_sink_system, silence_audio_system, AudioChannels, AudioEvent};
use crate::config::{load_game_config, GameConfig};
use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::economy;
use crate::input::{apply_input_system, collect_input_system, InputQueue, InputState};
use crate::player::{PlayerState, UpgradeKind};
use crate::save::{autosave_player_system, load_player_system, SavePath};
use crate::simulation::Simulation;

/// Top-level application state machine.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    Station,
    SectorCleared,
    GameOver,
}

/// Ordering label for the gameplay chain; rendering runs after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameplaySet;

/// Digit keys mapped onto the station's upgrade list.
const UPGRADE_KEYS: [KeyCode; 6] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
];

/// Registers `GameState`, resources, persistence and every gameplay system.
///
/// Windowless: it needs only `MinimalPlugins`, `StatesPlugin` and
/// `InputPlugin`, which keeps it usable from headless tests.
pub struct ProspectorPlugin;

impl Plugin for ProspectorPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameConfig>()
            .init_resource::<PlayerState>()
            .init_resource::<SavePath>()
            .init_resource::<Simulation>()
            .init_resource::<InputQueue>()
            .init_resource::<InputState>()
            .init_resource::<AudioChannels>()
            .add_message::<AudioEvent>()
            // Normally registered by WindowPlugin; headless apps have none.
            .add_message::<CursorMoved>()
            .add_systems(
                Startup,
                (load_game_config, load_player_system, init_simulation_system).chain(),
            )
            .add_systems(
                Update,
                (
                    collect_input_system,
                    apply_input_system,
                    simulation_tick_system.run_if(in_state(GameState::Playing)),
                    audio_sink_system,
                    autosave_player_system,
                )
                    .chain()
                    .in_set(GameplaySet),
            )
            .add_systems(
                Update,
                (
                    main_menu_keys_system.run_if(in_state(GameState::MainMenu)),
                    station_keys_system.run_if(in_state(GameState::Station)),
                    sector_cleared_keys_system.run_if(in_state(GameState::SectorCleared)),
                    game_over_keys_system.run_if(in_state(GameState::GameOver)),
                )
                    .before(GameplaySet),
            )
            .add_systems(OnEnter(GameState::Playing), begin_flight_system)
            .add_systems(
                OnExit(GameState::Playing),
                (end_flight_system, silence_audio_system),
            )
            .add_systems(OnEnter(GameState::Station), enter_station_system);
    }
}

/// Logical window size, or the startup size when no window exists.
pub fn screen_size(windows: &Query<&Window, With<PrimaryWindow>>) -> Vec2 {
    windows
        .single()
        .map(|w| w.size())
        .unwrap_or(Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32))
}

fn init_simulation_system(
    mut sim: ResMut<Simulation>,
    player: Res<PlayerState>,
    config: Res<GameConfig>,
) {
    *sim = Simulation::new(&mut rand::thread_rng(), &player, &config);
    info!(
        "Generated sector {} with {} objects",
        player.sector_level,
        sim.objects.len()
    );
}

/// Run one simulation frame and turn its report into messages and state
/// changes.
///
/// `PlayerState` is handed to the core without change detection; it is only
/// flagged changed on frames where the core actually published, so the HUD
/// and autosave react at publication cadence rather than every frame.
pub fn simulation_tick_system(
    mut sim: ResMut<Simulation>,
    mut player: ResMut<PlayerState>,
    input: Res<InputState>,
    config: Res<GameConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut audio: MessageWriter<AudioEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let screen = screen_size(&windows);
    let report = sim.tick(
        &input,
        player.bypass_change_detection(),
        &config,
        screen,
        &mut rand::thread_rng(),
    );

    if report.published {
        player.set_changed();
    }
    audio.write_batch(report.audio);

    if let Some(mineral) = report.scan_completed {
        info!(
            "Scan complete: {} ({} CR), cargo {}/{}",
            mineral.label(),
            mineral.value(),
            player.scanned_items.len(),
            player.max_cargo(&config)
        );
    }

    if report.sector_cleared {
        info!("Sector {} fully mapped", player.sector_level);
        next_state.set(GameState::SectorCleared);
    } else if report.docked {
        info!("Docked at station");
        next_state.set(GameState::Station);
    } else if sim.is_stranded(&config) {
        warn!("Energy depleted; drone stranded");
        next_state.set(GameState::GameOver);
    }
}

/// Resume flight with whatever charge the station left in the cell, picking
/// up movement keys that were held through the station screen.
fn begin_flight_system(
    mut sim: ResMut<Simulation>,
    player: Res<PlayerState>,
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<InputState>,
) {
    sim.sync_energy(&player);
    sim.launch();
    input.resume_held(keys.get_pressed().copied());
}

/// Publish the final charge and release any keys still held.
fn end_flight_system(
    sim: Res<Simulation>,
    mut player: ResMut<PlayerState>,
    mut input: ResMut<InputState>,
) {
    if player.energy != sim.ship.energy {
        player.energy = sim.ship.energy;
    }
    input.release_all();
}

fn enter_station_system(mut sim: ResMut<Simulation>, config: Res<GameConfig>) {
    sim.enter_station(&config);
}

fn main_menu_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut player: ResMut<PlayerState>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Space) {
        economy::prepare_launch(&mut player);
        next_state.set(GameState::Playing);
    }
}

fn station_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut player: ResMut<PlayerState>,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Enter) && !player.scanned_items.is_empty() {
        let earned = economy::sell_cargo(&mut player);
        info!("Sold cargo for {earned} CR");
    }

    for (key, kind) in UPGRADE_KEYS.into_iter().zip(UpgradeKind::ALL) {
        if !keys.just_pressed(key) {
            continue;
        }
        if !economy::can_afford(&player, kind) {
            debug!(
                "Cannot afford {} ({} CR)",
                kind.label(),
                economy::next_cost(&player, kind)
            );
            continue;
        }
        if let Some(cost) = economy::try_purchase(&mut player, kind, &config) {
            info!(
                "Bought {} level {} for {cost} CR",
                kind.label(),
                player.upgrades.level(kind)
            );
        }
    }

    if keys.just_pressed(KeyCode::Space) {
        next_state.set(GameState::Playing);
    }
}

fn sector_cleared_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut player: ResMut<PlayerState>,
    mut sim: ResMut<Simulation>,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !keys.just_pressed(KeyCode::Space) {
        return;
    }
    let bonus = economy::advance_sector(&mut player, &config);
    sim.reset_world(&mut rand::thread_rng(), &player, &config);
    info!(
        "Hyperjump to sector {} (bonus {bonus} CR)",
        player.sector_level
    );
    next_state.set(GameState::Playing);
}

fn game_over_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut player: ResMut<PlayerState>,
    mut sim: ResMut<Simulation>,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::KeyT) {
        match economy::request_tow(&mut player, &config) {
            Some(cost) => {
                info!("Towed back to station for {cost} CR");
                sim.enter_station(&config);
                sim.sync_energy(&player);
                next_state.set(GameState::Station);
            }
            None => warn!(
                "Tow refused: {} CR needed, {} available",
                config.tow_cost, player.credits
            ),
        }
    } else if keys.just_pressed(KeyCode::KeyR) {
        economy::new_game(&mut player, &config);
        sim.reset_world(&mut rand::thread_rng(), &player, &config);
        info!("System rebooted; progress wiped");
        next_state.set(GameState::Playing);
    }
}
