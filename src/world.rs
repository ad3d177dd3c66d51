//! Procedural sector generation.
//!
//! A sector is a flat list of [`ScannableObject`]s scattered in an annulus
//! around the station.  Rarity rises with distance: the outer band holds the
//! valuable tiers, so profitable trips cost more energy.
//!
//! List order is spawn order and is load-bearing: the scanner locks onto the
//! *first* qualifying object, so ties are broken by index.

use bevy::math::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::GameConfig;
use crate::constants::{
    ASTEROID_RADIUS_MAX, ASTEROID_RADIUS_MIN, ASTEROID_SIDES_MAX, ASTEROID_SIDES_MIN,
    ASTEROID_SPIN_RANGE, MID_BAND_EDGE, OUTER_BAND_EDGE,
};
use crate::math::{from_angle, generate_polygon, random_range};
use crate::mineral::MineralType;
use crate::player::CargoItem;

/// An asteroid the drone can scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannableObject {
    /// `ast_{index}_{sector}`; unique within a sector.
    pub id: String,
    pub position: Vec2,
    pub radius: f32,
    pub mineral: MineralType,
    /// Closed outline in local space (last vertex connects to the first).
    pub vertices: Vec<Vec2>,
    pub rotation: f32,
    /// Radians per frame.
    pub rotation_speed: f32,
    /// Monotonic: once set it is never cleared while the object lives.
    pub scanned: bool,
}

impl ScannableObject {
    /// Build an object with a generated outline; used by fixtures that need
    /// precise placement.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        id: impl Into<String>,
        position: Vec2,
        radius: f32,
        mineral: MineralType,
    ) -> Self {
        let sides = random_range(rng, ASTEROID_SIDES_MIN, ASTEROID_SIDES_MAX).floor() as usize;
        Self {
            id: id.into(),
            position,
            radius,
            mineral,
            vertices: generate_polygon(rng, radius, sides),
            rotation: random_range(rng, 0.0, TAU),
            rotation_speed: random_range(rng, -ASTEROID_SPIN_RANGE, ASTEROID_SPIN_RANGE),
            scanned: false,
        }
    }

    /// Outline vertices rotated and translated into world space.
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        let rot = Vec2::from_angle(self.rotation);
        self.vertices.iter().map(move |v| self.position + rot.rotate(*v))
    }

    /// Cargo-buffer copy of this object.
    pub fn to_cargo(&self) -> CargoItem {
        CargoItem {
            id: self.id.clone(),
            mineral: self.mineral,
            position: [self.position.x, self.position.y],
            radius: self.radius,
        }
    }
}

/// Rarity policy table.
///
/// `normalized_distance` is `distance / world_radius`; `roll` is a uniform
/// draw in `[0, 1)`.  Band edges and in-band thresholds are fixed so fixtures
/// are reproducible.
pub fn classify_mineral(normalized_distance: f32, roll: f32) -> MineralType {
    if normalized_distance > OUTER_BAND_EDGE {
        if roll > 0.9 {
            MineralType::Artifact
        } else if roll > 0.7 {
            MineralType::PsionicCrystal
        } else {
            MineralType::Neutronium
        }
    } else if normalized_distance > MID_BAND_EDGE {
        if roll > 0.8 {
            MineralType::Iridium
        } else if roll > 0.5 {
            MineralType::Gold
        } else {
            MineralType::Cobalt
        }
    } else if roll > 0.7 {
        MineralType::Silicon
    } else if roll > 0.4 {
        MineralType::Nickel
    } else {
        MineralType::Iron
    }
}

/// Generate `count` objects for `sector_level`.
///
/// The sector level only namespaces ids; difficulty is flat across sectors.
pub fn generate_sector<R: Rng + ?Sized>(
    rng: &mut R,
    count: u32,
    sector_level: u32,
    config: &GameConfig,
) -> Vec<ScannableObject> {
    let inner = config.station_radius + config.spawn_buffer;
    (0..count)
        .map(|i| {
            let angle = random_range(rng, 0.0, TAU);
            let dist = random_range(rng, inner, config.world_radius);
            let position = from_angle(angle) * dist;

            let roll: f32 = rng.gen();
            let mineral = classify_mineral(dist / config.world_radius, roll);
            let radius = random_range(rng, ASTEROID_RADIUS_MIN, ASTEROID_RADIUS_MAX);

            ScannableObject::new(rng, format!("ast_{i}_{sector_level}"), position, radius, mineral)
        })
        .collect()
}
