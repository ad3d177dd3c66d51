//! Vector helpers and procedural outline generation.
//!
//! Vectors are Bevy's [`Vec2`]; this module only adds the pieces glam does
//! not provide: uniform random ranges and the irregular asteroid silhouette.

use bevy::math::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::constants::{VERTEX_ANGLE_JITTER, VERTEX_RADIAL_MAX, VERTEX_RADIAL_MIN};

/// Uniform sample in `[min, max)`.  Degenerate ranges return `min`.
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Unit vector for `angle` radians.
#[inline]
pub fn from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Rotate `v` by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Irregular closed polygon around the origin.
///
/// Each vertex sits on an evenly spaced base angle, perturbed by a small
/// angular jitter and scaled radially, which gives an organic rock outline
/// rather than a regular polygon.  Vertex order is counter-clockwise in
/// angle, so consecutive pairs (plus last→first) form the outline.
pub fn generate_polygon<R: Rng + ?Sized>(rng: &mut R, radius: f32, sides: usize) -> Vec<Vec2> {
    let sides = sides.max(3);
    let step = TAU / sides as f32;
    (0..sides)
        .map(|i| {
            let angle = i as f32 * step
                + random_range(rng, -VERTEX_ANGLE_JITTER, VERTEX_ANGLE_JITTER);
            let r = radius * random_range(rng, VERTEX_RADIAL_MIN, VERTEX_RADIAL_MAX);
            from_angle(angle) * r
        })
        .collect()
}
