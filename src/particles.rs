//! Particle effects: thruster exhaust and scan-complete bursts.
//!
//! Particles are plain values in a [`ParticlePool`] owned by the simulation.
//! They move in world space with a constant velocity, lose a fixed amount of
//! life every frame, and are dropped once their life runs out.  The renderer
//! fades each particle's alpha by its remaining life.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

use crate::constants::{
    PARTICLE_DECAY, SCAN_BURST_COUNT, SCAN_BURST_SPEED, THRUST_PARTICLE_OFFSET,
};
use crate::math::{from_angle, random_range};

/// Palette entry for a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    /// Orange engine exhaust.
    Thrust,
    /// Teal scan-complete burst.
    Scan,
}

impl ParticleColor {
    pub fn color(self) -> Color {
        match self {
            ParticleColor::Thrust => Color::srgb_u8(0xf9, 0x73, 0x16),
            ParticleColor::Scan => Color::srgb_u8(0x2d, 0xd4, 0xbf),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// World units per frame.
    pub velocity: Vec2,
    /// 1.0 at birth; removed at or below zero.
    pub life: f32,
    pub color: ParticleColor,
    pub size: f32,
}

#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// One exhaust puff behind a ship moving with `ship_velocity`.
    pub fn spawn_thrust<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ship_position: Vec2,
        ship_velocity: Vec2,
    ) {
        let behind = ship_velocity.y.atan2(ship_velocity.x) + PI;
        let jitter = Vec2::new(random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0));
        self.particles.push(Particle {
            position: ship_position + from_angle(behind) * THRUST_PARTICLE_OFFSET,
            velocity: ship_velocity + jitter,
            life: 1.0,
            color: ParticleColor::Thrust,
            size: random_range(rng, 1.0, 4.0),
        });
    }

    /// Radial burst at a freshly scanned object.
    pub fn spawn_scan_burst<R: Rng + ?Sized>(&mut self, rng: &mut R, at: Vec2) {
        for _ in 0..SCAN_BURST_COUNT {
            let velocity = Vec2::new(
                random_range(rng, -SCAN_BURST_SPEED, SCAN_BURST_SPEED),
                random_range(rng, -SCAN_BURST_SPEED, SCAN_BURST_SPEED),
            );
            self.particles.push(Particle {
                position: at,
                velocity,
                life: 1.0,
                color: ParticleColor::Scan,
                size: 3.0,
            });
        }
    }

    /// Advance every particle one frame and drop the expired ones.
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.position += p.velocity;
            p.life -= PARTICLE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
