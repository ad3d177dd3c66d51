//! The per-frame flight simulation.
//!
//! [`Simulation`] owns everything that changes at frame cadence: the ship,
//! the camera, the sector's objects, the particle pool and the scanner lock.
//! It is a Bevy [`Resource`] mutated only by the tick system, and it never
//! touches the ECS itself, so every rule can be exercised from a plain test.
//!
//! ## Frame order
//!
//! | Step | What |
//! |------|------|
//! | 1 | zoom eases toward the wheel target |
//! | 2 | solar recharge and idle drain (only with charge left) |
//! | 3 | thrust from the held direction keys (only with charge left) |
//! | 4–5 | friction, then Euler position step |
//! | 6 | docking check |
//! | 7 | camera follows the ship |
//! | 8 | aim from the ship toward the pointer in world space, using the updated camera |
//! | 9 | asteroid spin and the scanner state machine |
//! | 10 | particle update |
//! | 11 | publication of energy to [`PlayerState`] |
//!
//! The ship's energy lives here while flying.  [`PlayerState::energy`] is only
//! refreshed every `publish_interval_frames` frames and on discrete events
//! (dock, scan complete), which [`FrameReport::published`] flags so the host
//! can fire change detection only when something observable moved.

use bevy::prelude::*;
use rand::Rng;

use crate::audio::AudioEvent;
use crate::camera::{Camera, Projection};
use crate::config::GameConfig;
use crate::constants::{CULL_MARGIN, DEAD_DRIFT_SPEED, THRUST_PARTICLE_CHANCE};
use crate::input::InputState;
use crate::mineral::MineralType;
use crate::particles::ParticlePool;
use crate::player::PlayerState;
use crate::world::{generate_sector, ScannableObject};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ship {
    pub position: Vec2,
    /// World units per frame.
    pub velocity: Vec2,
    /// Heading toward the pointer (radians, y down).
    pub angle: f32,
    pub energy: f32,
}

/// Scanner lock on one object.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetLock {
    /// Index into [`Simulation::objects`]; stable for the sector's lifetime.
    pub object_index: usize,
    pub object_id: String,
    /// In `[0, 1)`; reaching 1 completes the scan and drops the lock.
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightPhase {
    #[default]
    Flying,
    Docked,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub audio: Vec<AudioEvent>,
    pub docked: bool,
    pub sector_cleared: bool,
    pub scan_completed: Option<MineralType>,
    /// `PlayerState` was written this frame.
    pub published: bool,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Simulation {
    pub ship: Ship,
    pub camera: Camera,
    /// Spawn order; the scanner prefers lower indices.
    pub objects: Vec<ScannableObject>,
    pub particles: ParticlePool,
    pub lock: Option<TargetLock>,
    pub phase: FlightPhase,
    pub frame: u64,
}

impl Simulation {
    /// Fresh sector for `player`, with the ship at the station.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, player: &PlayerState, config: &GameConfig) -> Self {
        let mut sim = Self::default();
        sim.reset_world(rng, player, config);
        sim.sync_energy(player);
        sim
    }

    /// Replace the sector and put the ship back at the origin.  Zoom and the
    /// frame counter carry over.
    pub fn reset_world<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        player: &PlayerState,
        config: &GameConfig,
    ) {
        self.objects = generate_sector(rng, config.objects_per_sector, player.sector_level, config);
        self.ship = Ship {
            energy: self.ship.energy,
            ..Ship::default()
        };
        self.camera.position = Vec2::ZERO;
        self.particles.clear();
        self.lock = None;
        self.phase = FlightPhase::Flying;
    }

    /// Pull the published energy back in, e.g. after the station refilled it.
    pub fn sync_energy(&mut self, player: &PlayerState) {
        self.ship.energy = player.energy.clamp(0.0, player.max_energy.max(0.0));
    }

    /// Park the ship at the dock without the range checks (tow rescue and
    /// station entry).
    pub fn enter_station(&mut self, config: &GameConfig) {
        self.ship.position = config.dock_point();
        self.ship.velocity = Vec2::ZERO;
        self.lock = None;
        self.phase = FlightPhase::Docked;
    }

    /// Leave the dock; docking is possible again from the next tick.
    pub fn launch(&mut self) {
        self.phase = FlightPhase::Flying;
    }

    #[inline]
    pub fn in_dock_range(&self, config: &GameConfig) -> bool {
        self.ship.position.length() < config.dock_radius()
    }

    #[inline]
    pub fn can_dock(&self, config: &GameConfig) -> bool {
        self.in_dock_range(config) && self.ship.velocity.length() < config.dock_max_speed
    }

    /// Dock: refill, stop and park.  Returns `false` (and changes nothing)
    /// when already docked.
    pub fn dock(&mut self, player: &mut PlayerState, config: &GameConfig) -> bool {
        if self.phase == FlightPhase::Docked {
            return false;
        }
        self.ship.energy = player.max_energy;
        player.energy = player.max_energy;
        self.enter_station(config);
        true
    }

    /// Out of charge, drifted to a halt and too far out to dock.
    pub fn is_stranded(&self, config: &GameConfig) -> bool {
        self.ship.energy <= 0.0
            && self.ship.velocity.length() < DEAD_DRIFT_SPEED
            && !self.in_dock_range(config)
    }

    #[inline]
    pub fn projection(&self, screen: Vec2) -> Projection {
        self.camera.projection(screen)
    }

    /// Objects whose centre lies within the viewport plus a culling margin.
    pub fn visible_objects(
        &self,
        projection: &Projection,
    ) -> impl Iterator<Item = &ScannableObject> + '_ {
        let rect = projection.visible_world_rect(CULL_MARGIN);
        self.objects.iter().filter(move |o| rect.contains(o.position))
    }

    pub fn scan_target(&self) -> Option<&ScannableObject> {
        self.lock
            .as_ref()
            .and_then(|lock| self.objects.get(lock.object_index))
    }

    #[inline]
    pub fn scan_progress(&self) -> f32 {
        self.lock.as_ref().map_or(0.0, |lock| lock.progress)
    }

    /// Advance one display frame.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        input: &InputState,
        player: &mut PlayerState,
        config: &GameConfig,
        screen: Vec2,
        rng: &mut R,
    ) -> FrameReport {
        self.frame += 1;
        let mut report = FrameReport::default();

        self.camera.approach_zoom(input.target_zoom, config.zoom_lerp);

        let max_energy = player.max_energy;
        if self.ship.energy > 0.0 {
            self.ship.energy = (self.ship.energy + player.solar_rate(config)).min(max_energy);
            self.ship.energy = (self.ship.energy - config.idle_drain).max(0.0);
        }

        let direction = if self.ship.energy > 0.0 {
            input.thrust_direction()
        } else {
            Vec2::ZERO
        };
        let thrusting = direction != Vec2::ZERO;
        report.audio.push(AudioEvent::Thrust(thrusting));
        if thrusting {
            self.ship.energy = (self.ship.energy - config.thrust_drain).max(0.0);
            self.ship.velocity += direction * player.thrust_accel(config, input.boost);
            if rng.gen_bool(THRUST_PARTICLE_CHANCE) {
                self.particles
                    .spawn_thrust(rng, self.ship.position, self.ship.velocity);
            }
        }

        self.ship.velocity *= config.friction;
        self.ship.position += self.ship.velocity;

        if input.dock && self.can_dock(config) && self.dock(player, config) {
            report.docked = true;
            report.published = true;
        }

        self.camera.follow(self.ship.position, config.camera_lerp);

        let aim = self.projection(screen).screen_to_world(input.pointer) - self.ship.position;
        self.ship.angle = aim.y.atan2(aim.x);

        for obj in &mut self.objects {
            obj.rotation += obj.rotation_speed;
        }
        self.update_scanner(input, player, config, aim, rng, &mut report);

        self.particles.update();

        if self.frame % config.publish_interval_frames.max(1) == 0 {
            report.published = true;
        }
        if report.published {
            player.energy = self.ship.energy;
        }

        report
    }

    fn update_scanner<R: Rng + ?Sized>(
        &mut self,
        input: &InputState,
        player: &mut PlayerState,
        config: &GameConfig,
        aim: Vec2,
        rng: &mut R,
        report: &mut FrameReport,
    ) {
        let idle = AudioEvent::Scan {
            active: false,
            progress: 0.0,
        };

        if self.ship.energy <= 0.0 {
            self.lock = None;
            report.audio.push(idle);
            return;
        }

        let aim_dir = aim.normalize_or_zero();
        let range = player.scan_range(config);
        let ship = self.ship.position;
        let found = self.objects.iter().position(|obj| {
            !obj.scanned
                && ship.distance(obj.position) < range
                && aim_dir.dot((obj.position - ship).normalize_or_zero()) > config.scan_cone_cos
        });

        let Some(index) = found else {
            self.lock = None;
            report.audio.push(idle);
            return;
        };

        let mut progress = match &self.lock {
            Some(lock) if lock.object_index == index => lock.progress,
            _ => 0.0,
        };

        if !input.trigger {
            progress = (progress - config.scan_decay).max(0.0);
            report.audio.push(idle);
        } else if player.cargo_full(config) {
            report.audio.push(idle);
        } else {
            self.ship.energy = (self.ship.energy - config.scan_drain).max(0.0);
            progress += player.scan_rate_per_frame(config);

            if progress >= 1.0 {
                self.complete_scan(index, player, config, rng, report);
                return;
            }
            report.audio.push(AudioEvent::Scan {
                active: true,
                progress,
            });
        }

        self.lock = Some(TargetLock {
            object_index: index,
            object_id: self.objects[index].id.clone(),
            progress,
        });
    }

    fn complete_scan<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        player: &mut PlayerState,
        config: &GameConfig,
        rng: &mut R,
        report: &mut FrameReport,
    ) {
        let obj = &mut self.objects[index];
        obj.scanned = true;
        player.scanned_items.push(obj.to_cargo());
        player.total_discoveries = player.total_discoveries.saturating_add(1);
        player.sector_progress = player.sector_progress.saturating_add(1);

        let (at, mineral) = (obj.position, obj.mineral);
        debug!("Scanned {} ({})", obj.id, mineral.label());

        self.particles.spawn_scan_burst(rng, at);
        self.lock = None;

        report.scan_completed = Some(mineral);
        report.sector_cleared = player.sector_progress >= config.objects_per_sector;
        report.published = true;
        report.audio.push(AudioEvent::Scan {
            active: false,
            progress: 0.0,
        });
        report.audio.push(AudioEvent::ScanComplete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

    fn empty_sim(player: &PlayerState) -> Simulation {
        let mut sim = Simulation::default();
        sim.sync_energy(player);
        sim
    }

    fn pointer_toward(sim: &Simulation, dir: Vec2) -> Vec2 {
        sim.projection(SCREEN).world_to_screen(sim.ship.position) + dir * 100.0
    }

    #[test]
    fn idle_frame_nets_solar_minus_idle() {
        let config = GameConfig::default();
        let mut player = PlayerState::fresh(&config);
        player.energy = 50.0;
        let mut sim = empty_sim(&player);
        let mut rng = StdRng::seed_from_u64(0);
        sim.tick(&InputState::default(), &mut player, &config, SCREEN, &mut rng);
        let expected = 50.0 + player.solar_rate(&config) - config.idle_drain;
        assert!((sim.ship.energy - expected).abs() < 1e-6);
    }

    #[test]
    fn empty_cell_blocks_thrust_but_not_drift() {
        let config = GameConfig::default();
        let mut player = PlayerState::fresh(&config);
        player.energy = 0.0;
        let mut sim = empty_sim(&player);
        sim.ship.velocity = Vec2::new(1.0, 0.0);
        let input = InputState {
            up: true,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let report = sim.tick(&input, &mut player, &config, SCREEN, &mut rng);
        assert_eq!(sim.ship.energy, 0.0);
        assert_eq!(sim.ship.velocity, Vec2::new(config.friction, 0.0));
        assert_eq!(sim.ship.position, Vec2::new(config.friction, 0.0));
        assert!(report.audio.contains(&AudioEvent::Thrust(false)));
    }

    #[test]
    fn docking_requires_low_speed() {
        let config = GameConfig::default();
        let mut player = PlayerState::fresh(&config);
        player.energy = 10.0;
        let mut sim = empty_sim(&player);
        sim.ship.velocity = Vec2::new(10.0, 0.0);
        let input = InputState {
            dock: true,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!sim.tick(&input, &mut player, &config, SCREEN, &mut rng).docked);

        sim.ship.velocity = Vec2::ZERO;
        let report = sim.tick(&input, &mut player, &config, SCREEN, &mut rng);
        assert!(report.docked && report.published);
        assert_eq!(sim.ship.position, config.dock_point());
        assert_eq!(sim.ship.velocity, Vec2::ZERO);
        assert_eq!(sim.ship.energy, player.max_energy);
        assert_eq!(player.energy, player.max_energy);
        assert_eq!(sim.phase, FlightPhase::Docked);
    }

    #[test]
    fn stranded_only_when_dead_stopped_and_out_of_range() {
        let config = GameConfig::default();
        let mut sim = Simulation::default();
        sim.ship.position = Vec2::new(1000.0, 0.0);
        assert!(sim.is_stranded(&config));
        sim.ship.velocity = Vec2::new(1.0, 0.0);
        assert!(!sim.is_stranded(&config));
        sim.ship.velocity = Vec2::ZERO;
        sim.ship.position = Vec2::new(100.0, 0.0);
        assert!(!sim.is_stranded(&config));
        sim.ship.position = Vec2::new(1000.0, 0.0);
        sim.ship.energy = 1.0;
        assert!(!sim.is_stranded(&config));
    }

    #[test]
    fn lock_change_resets_progress() {
        let config = GameConfig::default();
        let mut player = PlayerState::fresh(&config);
        let mut sim = empty_sim(&player);
        let mut rng = StdRng::seed_from_u64(4);
        sim.objects = vec![
            ScannableObject::new(&mut rng, "east", Vec2::new(100.0, 0.0), 20.0, MineralType::Iron),
            ScannableObject::new(&mut rng, "south", Vec2::new(0.0, 100.0), 20.0, MineralType::Gold),
        ];
        let mut input = InputState {
            trigger: true,
            pointer: pointer_toward(&sim, Vec2::X),
            ..Default::default()
        };
        for _ in 0..5 {
            sim.tick(&input, &mut player, &config, SCREEN, &mut rng);
        }
        assert_eq!(sim.lock.as_ref().map(|l| l.object_id.as_str()), Some("east"));
        assert!(sim.scan_progress() > 0.0);

        input.pointer = pointer_toward(&sim, Vec2::Y);
        sim.tick(&input, &mut player, &config, SCREEN, &mut rng);
        let lock = sim.lock.clone().expect("locked on south");
        assert_eq!(lock.object_id, "south");
        assert!((lock.progress - player.scan_rate_per_frame(&config)).abs() < 1e-6);
    }

    #[test]
    fn released_trigger_decays_progress() {
        let config = GameConfig::default();
        let mut player = PlayerState::fresh(&config);
        let mut sim = empty_sim(&player);
        let mut rng = StdRng::seed_from_u64(8);
        sim.objects = vec![ScannableObject::new(
            &mut rng,
            "a",
            Vec2::new(100.0, 0.0),
            20.0,
            MineralType::Iron,
        )];
        let mut input = InputState {
            trigger: true,
            pointer: pointer_toward(&sim, Vec2::X),
            ..Default::default()
        };
        for _ in 0..10 {
            sim.tick(&input, &mut player, &config, SCREEN, &mut rng);
        }
        let held = sim.scan_progress();
        input.trigger = false;
        sim.tick(&input, &mut player, &config, SCREEN, &mut rng);
        assert!((sim.scan_progress() - (held - config.scan_decay).max(0.0)).abs() < 1e-6);
    }

    #[test]
    fn full_cargo_blocks_scanning_silently() {
        let config = GameConfig::default();
        let mut player = PlayerState::fresh(&config);
        let mut rng = StdRng::seed_from_u64(6);
        let filler = ScannableObject::new(&mut rng, "x", Vec2::ZERO, 20.0, MineralType::Iron);
        player.scanned_items = vec![filler.to_cargo(); player.max_cargo(&config)];
        let mut sim = empty_sim(&player);
        sim.objects = vec![ScannableObject::new(
            &mut rng,
            "a",
            Vec2::new(100.0, 0.0),
            20.0,
            MineralType::Iron,
        )];
        let input = InputState {
            trigger: true,
            pointer: pointer_toward(&sim, Vec2::X),
            ..Default::default()
        };
        let before = sim.ship.energy;
        sim.tick(&input, &mut player, &config, SCREEN, &mut rng);
        assert_eq!(sim.scan_progress(), 0.0);
        assert!(sim.lock.is_some());
        assert!(sim.ship.energy > before - config.scan_drain);
    }

    #[test]
    fn publication_is_decimated() {
        let config = GameConfig::default();
        let mut player = PlayerState::fresh(&config);
        player.energy = 50.0;
        let mut sim = empty_sim(&player);
        let mut rng = StdRng::seed_from_u64(0);
        let input = InputState::default();
        for frame in 1..=60u64 {
            let report = sim.tick(&input, &mut player, &config, SCREEN, &mut rng);
            assert_eq!(report.published, frame % config.publish_interval_frames == 0);
            if !report.published {
                assert_ne!(player.energy, sim.ship.energy);
            } else {
                assert_eq!(player.energy, sim.ship.energy);
            }
        }
    }

    #[test]
    fn aim_points_from_ship_toward_unprojected_pointer() {
        let config = GameConfig::default();
        let mut player = PlayerState::fresh(&config);
        let mut sim = empty_sim(&player);
        let mut rng = StdRng::seed_from_u64(0);
        let input = InputState {
            pointer: SCREEN / 2.0 + Vec2::new(0.0, 50.0),
            ..Default::default()
        };
        sim.tick(&input, &mut player, &config, SCREEN, &mut rng);
        assert!((sim.ship.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn reset_world_regenerates_and_recentres() {
        let config = GameConfig {
            objects_per_sector: 25,
            ..GameConfig::default()
        };
        let mut player = PlayerState::fresh(&config);
        player.sector_level = 3;
        let mut rng = StdRng::seed_from_u64(12);
        let mut sim = Simulation::new(&mut rng, &player, &config);
        sim.ship.position = Vec2::new(900.0, 0.0);
        sim.objects[0].scanned = true;
        sim.reset_world(&mut rng, &player, &config);
        assert_eq!(sim.objects.len(), 25);
        assert!(sim.objects.iter().all(|o| !o.scanned && o.id.ends_with("_3")));
        assert_eq!(sim.ship.position, Vec2::ZERO);
        assert_eq!(sim.ship.energy, player.energy);
    }
}
