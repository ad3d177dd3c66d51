use bevy::prelude::*;
use bevy::window::WindowResolution;

use void_prospector::app::ProspectorPlugin;
use void_prospector::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use void_prospector::menu::MenuPlugin;
use void_prospector::render::ViewPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Void Prospector".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(0x0f, 0x17, 0x2a)))
        // GameConfig starts at compiled defaults; load_game_config overlays
        // assets/game.toml (if present) before the first sector is generated.
        .add_plugins((ProspectorPlugin, ViewPlugin, MenuPlugin))
        .run();
}
