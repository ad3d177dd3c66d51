//! Rendering: gizmo drawing of the flight view and the Bevy UI HUD.
//!
//! ## Coordinate spaces
//!
//! Everything is laid out in window pixels (origin top-left, y down) through
//! [`Projection`] and [`MinimapProjection`], then mapped onto Bevy's canvas
//! (origin centre, y up) by [`to_canvas`] just before the gizmo call.  The
//! `Camera2d` itself never moves; the simulation's camera is applied by the
//! projection.
//!
//! ## Systems
//!
//! | System                    | Schedule | Purpose                                  |
//! |---------------------------|----------|------------------------------------------|
//! | `setup_hud`               | Startup  | Spawn the HUD text nodes                 |
//! | `draw_world_system`       | Update   | Grid, bounds, station, asteroids, FX, ship |
//! | `draw_minimap_system`     | Update   | Minimap frame, dots, viewport rectangle  |
//! | `hud_text_system`         | Update   | Refresh stats and status lines           |
//! | `sync_hud_visibility_system` | Update | Hide the HUD on the main menu           |
//!
//! All of them are registered by [`ViewPlugin`], after the gameplay chain.

use bevy::color::Alpha;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::app::{screen_size, GameState, GameplaySet};
use crate::camera::{MinimapProjection, Projection};
use crate::config::GameConfig;
use crate::constants::{GRID_SIZE, HUD_FONT_SIZE, LOW_ENERGY_WARNING};
use crate::input::InputState;
use crate::math::rotate;
use crate::player::PlayerState;
use crate::simulation::Simulation;

/// Camera, gizmo drawing and HUD.  Requires a window; headless apps skip it.
pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_camera, setup_hud))
            .add_systems(
                Update,
                (
                    (draw_world_system, draw_minimap_system)
                        .run_if(not(in_state(GameState::MainMenu))),
                    hud_text_system,
                    sync_hud_visibility_system,
                )
                    .after(GameplaySet),
            );
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

// ── Palette ───────────────────────────────────────────────────────────────────

fn grid_color() -> Color {
    Color::srgb_u8(0x1e, 0x29, 0x3b).with_alpha(0.6)
}
fn bounds_color() -> Color {
    Color::srgb_u8(0xef, 0x44, 0x44)
}
fn truss_color() -> Color {
    Color::srgb_u8(0x33, 0x41, 0x55)
}
fn station_color() -> Color {
    Color::srgb_u8(0xf9, 0x73, 0x16)
}
fn hub_color() -> Color {
    Color::srgb_u8(0x94, 0xa3, 0xb8)
}
fn teal() -> Color {
    Color::srgb_u8(0x2d, 0xd4, 0xbf)
}
fn unscanned_color() -> Color {
    Color::srgb_u8(0x7c, 0x3a, 0xed)
}
fn hull_color() -> Color {
    Color::srgb_u8(0xe2, 0xe8, 0xf0)
}
fn dead_lens_color() -> Color {
    Color::srgb_u8(0x33, 0x41, 0x55)
}
fn lens_color() -> Color {
    Color::srgb_u8(0x0e, 0xa5, 0xe9)
}
fn hud_text_color() -> Color {
    Color::srgb_u8(0xcc, 0xfb, 0xf1)
}
fn warning_color() -> Color {
    Color::srgb_u8(0xf8, 0x71, 0x71)
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Window pixels (top-left origin, y down) → Bevy 2D canvas (centre origin,
/// y up).
#[inline]
pub fn to_canvas(point: Vec2, screen: Vec2) -> Vec2 {
    Vec2::new(point.x - screen.x / 2.0, screen.y / 2.0 - point.y)
}

/// Sample an arc in window space starting at `start` radians and sweeping
/// `sweep` radians (positive is clockwise on screen, since y points down).
pub fn arc_points(center: Vec2, radius: f32, start: f32, sweep: f32, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let a = start + sweep * i as f32 / segments as f32;
            center + Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect()
}

/// World-space grid lines covering the visible area, snapped to `GRID_SIZE`.
pub fn grid_lines(projection: &Projection) -> Vec<(Vec2, Vec2)> {
    let rect = projection.visible_world_rect(0.0);
    let start = (rect.min / GRID_SIZE).floor() * GRID_SIZE;
    let end = (rect.max / GRID_SIZE).ceil() * GRID_SIZE;

    let mut lines = Vec::new();
    let mut x = start.x;
    while x <= end.x {
        lines.push((Vec2::new(x, start.y), Vec2::new(x, end.y)));
        x += GRID_SIZE;
    }
    let mut y = start.y;
    while y <= end.y {
        lines.push((Vec2::new(start.x, y), Vec2::new(end.x, y)));
        y += GRID_SIZE;
    }
    lines
}

/// Drone hull in local space, nose along +x.
const HULL: [Vec2; 5] = [
    Vec2::new(25.0, 0.0),
    Vec2::new(-10.0, 15.0),
    Vec2::new(-20.0, 8.0),
    Vec2::new(-20.0, -8.0),
    Vec2::new(-10.0, -15.0),
];

/// Thin wrapper that takes window-space points.
struct Painter<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    screen: Vec2,
}

impl Painter<'_, '_, '_> {
    fn line(&mut self, a: Vec2, b: Vec2, color: Color) {
        let (a, b) = (to_canvas(a, self.screen), to_canvas(b, self.screen));
        self.gizmos.line_2d(a, b, color);
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.gizmos
            .circle_2d(to_canvas(center, self.screen), radius, color);
    }

    fn strip(&mut self, points: impl IntoIterator<Item = Vec2>, color: Color) {
        let screen = self.screen;
        self.gizmos
            .linestrip_2d(points.into_iter().map(|p| to_canvas(p, screen)), color);
    }

    fn closed(&mut self, points: &[Vec2], color: Color) {
        if let Some(first) = points.first() {
            self.strip(points.iter().copied().chain(std::iter::once(*first)), color);
        }
    }

    fn rect(&mut self, rect: Rect, color: Color) {
        let screen = self.screen;
        self.gizmos
            .rect_2d(to_canvas(rect.center(), screen), rect.size(), color);
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

pub fn draw_world_system(
    mut gizmos: Gizmos,
    sim: Res<Simulation>,
    input: Res<InputState>,
    config: Res<GameConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let screen = screen_size(&windows);
    let projection = sim.projection(screen);
    let mut painter = Painter {
        gizmos: &mut gizmos,
        screen,
    };

    for (a, b) in grid_lines(&projection) {
        painter.line(
            projection.world_to_screen(a),
            projection.world_to_screen(b),
            grid_color(),
        );
    }
    painter.circle(
        projection.world_to_screen(Vec2::ZERO),
        projection.scale(config.world_radius),
        bounds_color(),
    );

    draw_station(&mut painter, &projection, &sim, &config);

    for obj in sim.visible_objects(&projection) {
        let outline: Vec<Vec2> = obj
            .world_vertices()
            .map(|v| projection.world_to_screen(v))
            .collect();
        let color = if obj.scanned {
            obj.mineral.color()
        } else {
            unscanned_color()
        };
        painter.closed(&outline, color);
        if obj.scanned {
            painter.circle(
                projection.world_to_screen(obj.position),
                projection.scale(5.0),
                teal(),
            );
        }
    }

    for p in sim.particles.iter() {
        painter.circle(
            projection.world_to_screen(p.position),
            projection.scale(p.size),
            p.color.color().with_alpha(p.life.clamp(0.0, 1.0)),
        );
    }

    draw_drone(&mut painter, &projection, &sim, &input);
    draw_scan_fx(&mut painter, &projection, &sim);
}

fn draw_station(painter: &mut Painter, projection: &Projection, sim: &Simulation, config: &GameConfig) {
    let r = config.station_radius;
    let center = projection.world_to_screen(Vec2::ZERO);
    painter.circle(center, projection.scale(r - 10.0), truss_color());
    painter.circle(center, projection.scale(r * 0.8), station_color());
    painter.circle(center, projection.scale(r * 0.5), hub_color());
    painter.circle(center, projection.scale(r * 0.3), truss_color());

    // Habitat pods ride the slowly turning ring.
    let spin = sim.frame as f32 * 0.0016;
    for i in 0..3 {
        let angle = spin + TAU / 3.0 * i as f32;
        let pod = [
            Vec2::new(r * 0.8 - 20.0, -15.0),
            Vec2::new(r * 0.8 + 40.0, -15.0),
            Vec2::new(r * 0.8 + 40.0, 15.0),
            Vec2::new(r * 0.8 - 20.0, 15.0),
        ]
        .map(|v| projection.world_to_screen(rotate(v, angle)));
        painter.closed(&pod, station_color());
        painter.line(
            projection.world_to_screen(rotate(Vec2::new(r * 0.5, 0.0), angle)),
            pod[0].lerp(pod[3], 0.5),
            hub_color(),
        );
    }

    // Sequential docking lights.
    let active = (sim.frame / 9) % 8;
    for i in 0..8u64 {
        let angle = TAU / 8.0 * i as f32;
        let at = projection.world_to_screen(rotate(Vec2::new(r * 0.25, 0.0), angle));
        let color = if i == active {
            teal()
        } else {
            teal().with_alpha(0.3)
        };
        painter.circle(at, projection.scale(3.0), color);
    }
}

fn draw_drone(painter: &mut Painter, projection: &Projection, sim: &Simulation, input: &InputState) {
    let ship = sim.ship;
    let local_to_screen =
        |v: Vec2| projection.world_to_screen(ship.position + rotate(v, ship.angle));
    let powered = ship.energy > 0.0;

    if powered && input.is_thrusting() {
        let flame = [
            Vec2::new(-20.0, -6.0),
            Vec2::new(-45.0, 0.0),
            Vec2::new(-20.0, 6.0),
        ]
        .map(local_to_screen);
        painter.strip(flame, station_color());
    }

    let hull = HULL.map(local_to_screen);
    painter.closed(&hull, hull_color());
    painter.line(
        local_to_screen(Vec2::new(15.0, 0.0)),
        local_to_screen(Vec2::new(-15.0, 0.0)),
        hub_color(),
    );

    let lens = if powered { lens_color() } else { dead_lens_color() };
    painter.circle(local_to_screen(Vec2::new(5.0, 0.0)), projection.scale(4.0), lens);
}

fn draw_scan_fx(painter: &mut Painter, projection: &Projection, sim: &Simulation) {
    if sim.ship.energy <= 0.0 {
        return;
    }
    let Some(target) = sim.scan_target() else {
        return;
    };
    if target.scanned {
        return;
    }

    let ship = projection.world_to_screen(sim.ship.position);
    let reach = projection.scale(sim.ship.position.distance(target.position));
    let wedge = arc_points(ship, reach, sim.ship.angle - 0.2, 0.4, 8);
    painter.strip(
        std::iter::once(ship)
            .chain(wedge)
            .chain(std::iter::once(ship)),
        teal().with_alpha(0.4),
    );

    let progress = sim.scan_progress();
    if progress > 0.0 {
        let ring = arc_points(
            projection.world_to_screen(target.position),
            projection.scale(target.radius + 15.0),
            -FRAC_PI_2,
            TAU * progress,
            48,
        );
        painter.strip(ring, teal());
    }
}

// ── Minimap ───────────────────────────────────────────────────────────────────

pub fn draw_minimap_system(
    mut gizmos: Gizmos,
    sim: Res<Simulation>,
    config: Res<GameConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let screen = screen_size(&windows);
    let map = MinimapProjection::new(screen, config.world_radius);
    let mut painter = Painter {
        gizmos: &mut gizmos,
        screen,
    };

    painter.rect(map.rect(), truss_color());
    painter.circle(
        map.project(Vec2::ZERO),
        map.dot_radius(config.station_radius),
        station_color(),
    );

    for obj in &sim.objects {
        let at = map.project(obj.position);
        if !map.contains(at) {
            continue;
        }
        let color = if obj.scanned {
            teal()
        } else {
            Color::srgb_u8(0x47, 0x55, 0x69)
        };
        painter.circle(at, map.dot_radius(obj.radius), color);
    }

    let ship = map.project(sim.ship.position);
    if map.contains(ship) {
        painter.circle(ship, 3.0, Color::WHITE);
        painter.line(ship, ship + rotate(Vec2::X, sim.ship.angle) * 8.0, Color::WHITE);
    }

    let view = map.viewport_rect(&sim.projection(screen)).intersect(map.rect());
    if !view.is_empty() {
        painter.rect(view, Color::WHITE.with_alpha(0.5));
    }
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Root of the flight HUD (top-left stats block).
#[derive(Component)]
pub struct HudRoot;

/// The stats text node inside [`HudRoot`].
#[derive(Component)]
pub struct HudStatsText;

/// The status/prompt line inside [`HudRoot`].
#[derive(Component)]
pub struct HudStatusText;

pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            Visibility::Hidden,
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(hud_text_color()),
                HudStatsText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(warning_color()),
                HudStatusText,
            ));
        });
}

/// Stats block: credits, energy, cargo, sector progress, zoom.
pub fn hud_stats(player: &PlayerState, sim: &Simulation, config: &GameConfig) -> String {
    format!(
        "CREDITS  {} CR\nENERGY   {:.0} / {:.0}\nCARGO    {} / {}\nSECTOR   {}   MAPPED {} / {}\nZOOM     x{:.2}",
        player.credits,
        player.energy,
        player.max_energy,
        player.scanned_items.len(),
        player.max_cargo(config),
        player.sector_level,
        player.sector_progress,
        config.objects_per_sector,
        sim.camera.zoom,
    )
}

/// Highest-priority prompt for the pilot, if any.
pub fn hud_status(player: &PlayerState, sim: &Simulation, config: &GameConfig) -> String {
    if sim.ship.energy <= 0.0 {
        return "ENERGY DEPLETED".to_string();
    }
    if sim.can_dock(config) {
        return "PRESS [E] TO DOCK".to_string();
    }
    if let Some(target) = sim.scan_target() {
        if player.cargo_full(config) {
            return "CARGO FULL - RETURN TO STATION".to_string();
        }
        return format!(
            "TARGET {}   SCAN {:.0}%",
            target.id,
            sim.scan_progress() * 100.0
        );
    }
    if sim.ship.energy < LOW_ENERGY_WARNING {
        return "LOW ENERGY - RETURN TO STATION".to_string();
    }
    String::new()
}

pub fn hud_text_system(
    player: Res<PlayerState>,
    sim: Res<Simulation>,
    config: Res<GameConfig>,
    mut stats: Query<&mut Text, (With<HudStatsText>, Without<HudStatusText>)>,
    mut status: Query<&mut Text, (With<HudStatusText>, Without<HudStatsText>)>,
) {
    for mut text in stats.iter_mut() {
        *text = Text::new(hud_stats(&player, &sim, &config));
    }
    for mut text in status.iter_mut() {
        *text = Text::new(hud_status(&player, &sim, &config));
    }
}

pub fn sync_hud_visibility_system(
    state: Res<State<GameState>>,
    mut query: Query<&mut Visibility, With<HudRoot>>,
) {
    if !state.is_changed() {
        return;
    }
    let vis = if *state.get() == GameState::MainMenu {
        Visibility::Hidden
    } else {
        Visibility::Visible
    };
    for mut v in query.iter_mut() {
        *v = vis;
    }
}
