//! Headless tests for the [`GameState`] machine driven by [`ProspectorPlugin`].
//!
//! These tests use [`MinimalPlugins`] plus the state and input plugins: no
//! window, no rendering.  The save file is redirected to a per-test temporary
//! directory.
//!
//! Covered scenarios:
//! 1. Startup lands in `MainMenu` with a generated sector.
//! 2. `Space` on the menu launches into `Playing`.
//! 3. Docking during flight transitions to `Station` and parks the ship.
//! 4. Running dry far from the station transitions to `GameOver`.
//! 5. A tow from `GameOver` returns to `Station` and charges the fee.
//! 6. `Space` on `SectorCleared` hyperjumps into a fresh sector.
//! 7. Station purchases go through the digit keys.
//! 8. A movement key held through the station re-engages on relaunch.

use bevy::ecs::message::Messages;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::{ButtonState, InputPlugin};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use tempfile::TempDir;

use void_prospector::app::{GameState, ProspectorPlugin};
use void_prospector::config::GameConfig;
use void_prospector::economy;
use void_prospector::input::InputState;
use void_prospector::player::{PlayerState, UpgradeKind};
use void_prospector::save::SavePath;
use void_prospector::simulation::{FlightPhase, Simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a headless app and run the first frame (startup + `MainMenu`).
///
/// Keep the returned [`TempDir`] alive for as long as the app runs: the
/// autosave writes into it.
fn headless_app() -> (App, TempDir) {
    let tmp = TempDir::new().unwrap();

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, InputPlugin))
        .add_plugins(ProspectorPlugin)
        .insert_resource(SavePath(tmp.path().join("player.toml")));
    app.update();
    (app, tmp)
}

fn state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

fn go_to(app: &mut App, next: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(next);
}

fn send_key(app: &mut App, key: KeyCode, logical: Key, state: ButtonState) {
    app.world_mut()
        .resource_mut::<Messages<KeyboardInput>>()
        .write(KeyboardInput {
            key_code: key,
            logical_key: logical,
            state,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        });
    app.update();
}

/// Press and release `key`, letting the handler and the transition run.
fn tap(app: &mut App, key: KeyCode, logical: Key) {
    send_key(app, key, logical.clone(), ButtonState::Pressed);
    send_key(app, key, logical, ButtonState::Released);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn startup_lands_in_main_menu_with_a_sector() {
    let (app, _tmp) = headless_app();
    assert_eq!(state(&app), GameState::MainMenu);

    let config = app.world().resource::<GameConfig>();
    let sim = app.world().resource::<Simulation>();
    assert_eq!(sim.objects.len(), config.objects_per_sector as usize);
    assert!(sim.objects.iter().all(|o| o.id.ends_with("_1")));
}

#[test]
fn space_launches_from_the_menu() {
    let (mut app, _tmp) = headless_app();
    tap(&mut app, KeyCode::Space, Key::Space);
    assert_eq!(state(&app), GameState::Playing);
    assert_eq!(
        app.world().resource::<Simulation>().phase,
        FlightPhase::Flying
    );
}

#[test]
fn docking_enters_the_station() {
    let (mut app, _tmp) = headless_app();
    app.world_mut().resource_mut::<PlayerState>().energy = 20.0;
    app.world_mut().resource_mut::<InputState>().dock = true;
    go_to(&mut app, GameState::Playing);

    app.update(); // enter Playing; the tick docks
    app.update(); // transition to Station

    assert_eq!(state(&app), GameState::Station);
    let config = app.world().resource::<GameConfig>().clone();
    let sim = app.world().resource::<Simulation>();
    assert_eq!(sim.phase, FlightPhase::Docked);
    assert_eq!(sim.ship.position, config.dock_point());
    assert_eq!(sim.ship.velocity, Vec2::ZERO);

    let player = app.world().resource::<PlayerState>();
    assert_eq!(player.energy, player.max_energy);
    assert!(!app.world().resource::<InputState>().dock);
}

#[test]
fn running_dry_in_deep_space_is_game_over() {
    let (mut app, _tmp) = headless_app();
    app.world_mut().resource_mut::<PlayerState>().energy = 0.0;
    app.world_mut().resource_mut::<Simulation>().ship.position = Vec2::new(3_000.0, 0.0);
    go_to(&mut app, GameState::Playing);

    app.update();
    app.update();

    assert_eq!(state(&app), GameState::GameOver);
    assert_eq!(app.world().resource::<PlayerState>().energy, 0.0);
}

#[test]
fn tow_returns_to_station_for_a_fee() {
    let (mut app, _tmp) = headless_app();
    let tow_cost = app.world().resource::<GameConfig>().tow_cost;
    {
        let mut player = app.world_mut().resource_mut::<PlayerState>();
        player.energy = 0.0;
        player.credits = tow_cost + 50;
    }
    app.world_mut().resource_mut::<Simulation>().ship.position = Vec2::new(3_000.0, 0.0);
    go_to(&mut app, GameState::Playing);
    app.update();
    app.update();
    assert_eq!(state(&app), GameState::GameOver);

    tap(&mut app, KeyCode::KeyT, Key::Character("t".into()));

    assert_eq!(state(&app), GameState::Station);
    let player = app.world().resource::<PlayerState>();
    assert_eq!(player.credits, 50);
    assert_eq!(player.energy, player.max_energy);
    let sim = app.world().resource::<Simulation>();
    assert_eq!(sim.phase, FlightPhase::Docked);
    assert_eq!(sim.ship.energy, player.max_energy);
}

#[test]
fn hyperjump_generates_the_next_sector() {
    let (mut app, _tmp) = headless_app();
    go_to(&mut app, GameState::SectorCleared);
    app.update();
    assert_eq!(state(&app), GameState::SectorCleared);

    let bonus = economy::sector_bonus(app.world().resource::<GameConfig>());
    tap(&mut app, KeyCode::Space, Key::Space);

    assert_eq!(state(&app), GameState::Playing);
    let player = app.world().resource::<PlayerState>();
    assert_eq!(player.sector_level, 2);
    assert_eq!(player.sector_progress, 0);
    assert_eq!(player.credits, bonus);
    let sim = app.world().resource::<Simulation>();
    assert!(sim.objects.iter().all(|o| o.id.ends_with("_2") && !o.scanned));
}

#[test]
fn digit_keys_buy_upgrades_at_the_station() {
    let (mut app, _tmp) = headless_app();
    let price = economy::next_cost(
        app.world().resource::<PlayerState>(),
        UpgradeKind::Engine,
    );
    app.world_mut().resource_mut::<PlayerState>().credits = price;
    go_to(&mut app, GameState::Station);
    app.update();

    tap(&mut app, KeyCode::Digit1, Key::Character("1".into()));

    let player = app.world().resource::<PlayerState>();
    assert_eq!(player.upgrades.engine, 2);
    assert_eq!(player.credits, 0);
    assert_eq!(state(&app), GameState::Station);
}

#[test]
fn movement_key_held_through_the_station_resumes_on_launch() {
    let (mut app, _tmp) = headless_app();
    go_to(&mut app, GameState::Playing);
    app.update();

    send_key(&mut app, KeyCode::KeyW, Key::Character("w".into()), ButtonState::Pressed);
    assert!(app.world().resource::<InputState>().up);

    go_to(&mut app, GameState::Station);
    app.update();
    assert_eq!(state(&app), GameState::Station);
    assert!(!app.world().resource::<InputState>().up);

    tap(&mut app, KeyCode::Space, Key::Space);
    assert_eq!(state(&app), GameState::Playing);
    let input = app.world().resource::<InputState>();
    assert!(input.up);
    assert!(!input.dock);
}
