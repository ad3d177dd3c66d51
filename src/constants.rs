//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//!
//! ## Tuning guidance
//!
//! Per-frame rates assume a ~60 Hz display.  The simulation never scales them
//! by the real frame delta, so a faster display runs the game faster.
//! [`crate::config::GameConfig`] mirrors every constant and can override any
//! of them from `assets/game.toml`.

// ── World ─────────────────────────────────────────────────────────────────────

/// Radius of the playable field around the station (world units).
pub const WORLD_RADIUS: f32 = 5000.0;

/// Radius of the station hub at the world origin.
pub const STATION_RADIUS: f32 = 300.0;

/// Clearance between the station edge and the innermost spawned object.
pub const SPAWN_BUFFER: f32 = 200.0;

/// Number of scannable objects generated per sector.
///
/// Also the sector-completion threshold: clearing a sector means scanning
/// exactly this many objects.
pub const MAX_ASTEROIDS: u32 = 300;

/// Normalised distance above which objects belong to the outer rarity band.
pub const OUTER_BAND_EDGE: f32 = 0.8;

/// Normalised distance above which objects belong to the middle rarity band.
pub const MID_BAND_EDGE: f32 = 0.4;

/// Object radius range (world units).
pub const ASTEROID_RADIUS_MIN: f32 = 20.0;
pub const ASTEROID_RADIUS_MAX: f32 = 60.0;

/// Polygon side-count range; the upper bound is exclusive after flooring.
pub const ASTEROID_SIDES_MIN: f32 = 5.0;
pub const ASTEROID_SIDES_MAX: f32 = 9.0;

/// Maximum angular jitter applied to each polygon vertex (radians).
pub const VERTEX_ANGLE_JITTER: f32 = 0.2;

/// Radial scale range applied to each polygon vertex.
pub const VERTEX_RADIAL_MIN: f32 = 0.8;
pub const VERTEX_RADIAL_MAX: f32 = 1.2;

/// Ambient spin range for generated objects (radians per frame).
pub const ASTEROID_SPIN_RANGE: f32 = 0.02;

// ── Ship: Movement ────────────────────────────────────────────────────────────

/// Base thrust scale; multiplied by the engine upgrade factor.
pub const BASE_SPEED: f32 = 5.0;

/// Thrust multiplier while the boost modifier is held.
pub const BOOST_MULTIPLIER: f32 = 1.8;

/// Per-frame velocity damping.  Must stay below 1.0 or velocity diverges.
pub const FRICTION: f32 = 0.96;

/// Engine factor: `thrust = BASE_SPEED * (ENGINE_BASE_FACTOR + level * ENGINE_FACTOR_PER_LEVEL)`.
pub const ENGINE_BASE_FACTOR: f32 = 0.1;
pub const ENGINE_FACTOR_PER_LEVEL: f32 = 0.02;

/// Scale from thrust power to the per-frame velocity increment.
pub const THRUST_TO_ACCEL: f32 = 0.1;

// ── Ship: Energy ──────────────────────────────────────────────────────────────

/// Energy capacity at battery level 1.
pub const BASE_ENERGY: f32 = 100.0;

/// Extra capacity per battery level above 1.
pub const ENERGY_PER_LEVEL: f32 = 25.0;

/// Continuous drains (energy per frame).
pub const THRUST_DRAIN: f32 = 0.02;
pub const IDLE_DRAIN: f32 = 0.002;
pub const SCAN_DRAIN: f32 = 0.1;

/// Solar recharge: `BASE_SOLAR_RECHARGE + level * SOLAR_RECHARGE_PER_LEVEL` per frame.
///
/// At level 1 the panels do not quite cover the idle drain.
pub const BASE_SOLAR_RECHARGE: f32 = 0.0005;
pub const SOLAR_RECHARGE_PER_LEVEL: f32 = 0.001;

/// Energy below which the HUD warns the pilot to dock.
pub const LOW_ENERGY_WARNING: f32 = 20.0;

// ── Scanner ───────────────────────────────────────────────────────────────────

/// Scan range at level 0; each level adds 20 %.
pub const BASE_SCAN_RANGE: f32 = 300.0;

/// Scan speed (percent per second) at level 0; each level adds 20 %.
pub const BASE_SCAN_SPEED: f32 = 0.5;

/// Per-level multiplier step shared by scan range and scan speed.
pub const SCANNER_LEVEL_STEP: f32 = 0.2;

/// Minimum dot product between the aim and target directions (~18° half-angle).
pub const SCAN_CONE_COS: f32 = 0.95;

/// Nominal frame time used to turn the scan speed into per-frame progress.
pub const NOMINAL_FRAME_SECS: f32 = 0.016;

/// Progress lost per frame while the trigger is released.
pub const SCAN_DECAY: f32 = 0.05;

// ── Cargo ─────────────────────────────────────────────────────────────────────

/// Cargo slots: `BASE_CARGO + level * CARGO_PER_LEVEL`.
pub const BASE_CARGO: u32 = 5;
pub const CARGO_PER_LEVEL: u32 = 2;

// ── Docking ───────────────────────────────────────────────────────────────────

/// Extra distance past the station radius inside which docking is allowed.
pub const DOCK_RANGE_MARGIN: f32 = 50.0;

/// Ship speed must be below this to dock.
pub const DOCK_MAX_SPEED: f32 = 2.0;

/// Docked ships are parked this far inside the station rim.
pub const DOCK_INSET: f32 = 50.0;

/// Below this speed an unpowered ship outside dock range is stranded.
pub const DEAD_DRIFT_SPEED: f32 = 0.05;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Per-frame interpolation factor for camera follow and zoom smoothing.
pub const CAMERA_LERP: f32 = 0.1;
pub const ZOOM_LERP: f32 = 0.1;

/// Zoom clamp.
pub const ZOOM_MIN: f32 = 0.4;
pub const ZOOM_MAX: f32 = 2.5;

/// Zoom change per wheel pixel.
pub const ZOOM_SENSITIVITY: f32 = 0.001;

/// Wheel pixels reported per wheel "line" notch.
pub const WHEEL_PIXELS_PER_LINE: f32 = 100.0;

// ── Minimap ───────────────────────────────────────────────────────────────────

pub const MINIMAP_SIZE: f32 = 180.0;
pub const MINIMAP_MARGIN: f32 = 20.0;

/// The minimap covers `WORLD_RADIUS * MINIMAP_WORLD_SPAN` across.
pub const MINIMAP_WORLD_SPAN: f32 = 2.2;

/// Smallest dot radius drawn for an object on the minimap (pixels).
pub const MINIMAP_MIN_DOT: f32 = 1.5;

// ── Particles ─────────────────────────────────────────────────────────────────

/// Life lost per frame; particles start at 1.0.
pub const PARTICLE_DECAY: f32 = 0.02;

/// Chance per thrusting frame of emitting one exhaust particle.
pub const THRUST_PARTICLE_CHANCE: f64 = 0.5;

/// Distance behind the ship at which exhaust appears.
pub const THRUST_PARTICLE_OFFSET: f32 = 10.0;

/// Number of particles in a scan-complete burst.
pub const SCAN_BURST_COUNT: usize = 10;

/// Half-width of the burst velocity spread.
pub const SCAN_BURST_SPEED: f32 = 2.5;

// ── Publication ───────────────────────────────────────────────────────────────

/// Frames between energy publications to the observable player snapshot.
pub const PUBLISH_INTERVAL_FRAMES: u64 = 30;

// ── Economy ───────────────────────────────────────────────────────────────────

/// Upgrade cost curve bases: `cost = base * 2^level`.
pub const ENGINE_COST_BASE: u32 = 100;
pub const SCANNER_SPEED_COST_BASE: u32 = 150;
pub const SCANNER_RANGE_COST_BASE: u32 = 200;
pub const CARGO_COST_BASE: u32 = 300;
pub const BATTERY_COST_BASE: u32 = 250;
pub const SOLAR_COST_BASE: u32 = 200;

/// Credits charged for an emergency tow back to the station.
pub const TOW_COST: u32 = 500;

/// Completion bonus per object in a cleared sector.
pub const SECTOR_BONUS_UNIT: u32 = 10;

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Spacing of the background grid (world units).
pub const GRID_SIZE: f32 = 200.0;

/// Extra world-space margin kept around the viewport when culling objects.
pub const CULL_MARGIN: f32 = 100.0;

/// HUD font size.
pub const HUD_FONT_SIZE: f32 = 16.0;

/// Window size at startup.
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;
