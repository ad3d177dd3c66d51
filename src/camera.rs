//! Follow camera, world↔screen projection and the minimap.
//!
//! All projections work in window pixels with the origin at the top-left and
//! y pointing down, matching both the pointer coordinates and the world's own
//! y-down convention.  Conversion to Bevy's centred, y-up canvas happens only
//! at draw time in [`crate::render`].

use bevy::math::{Rect, Vec2};

use crate::constants::{MINIMAP_MARGIN, MINIMAP_MIN_DOT, MINIMAP_SIZE, MINIMAP_WORLD_SPAN};

/// Smoothed camera: trails the ship and eases toward the requested zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Move a fraction `factor` of the way toward `target`.
    #[inline]
    pub fn follow(&mut self, target: Vec2, factor: f32) {
        self.position += (target - self.position) * factor;
    }

    #[inline]
    pub fn approach_zoom(&mut self, target: f32, factor: f32) {
        self.zoom += (target - self.zoom) * factor;
    }

    #[inline]
    pub fn projection(&self, screen: Vec2) -> Projection {
        Projection {
            camera: self.position,
            zoom: self.zoom,
            screen,
        }
    }
}

/// Snapshot of the camera plus the window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub camera: Vec2,
    pub zoom: f32,
    pub screen: Vec2,
}

impl Projection {
    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.camera) * self.zoom + self.screen / 2.0
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.screen / 2.0) / self.zoom + self.camera
    }

    /// World-space extent covered by the window.
    #[inline]
    pub fn visible_world_size(&self) -> Vec2 {
        self.screen / self.zoom
    }

    /// World-space rectangle covered by the window, grown by `margin` on
    /// every side.
    pub fn visible_world_rect(&self, margin: f32) -> Rect {
        let half = self.visible_world_size() / 2.0 + Vec2::splat(margin);
        Rect::from_center_half_size(self.camera, half)
    }

    /// Scale a world length to pixels.
    #[inline]
    pub fn scale(&self, length: f32) -> f32 {
        length * self.zoom
    }
}

/// Fixed-scale overview anchored in the bottom-right corner, centred on the
/// station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapProjection {
    /// Top-left corner of the map square in window pixels.
    pub origin: Vec2,
    pub size: f32,
    /// Pixels per world unit.
    pub scale: f32,
}

impl MinimapProjection {
    pub fn new(screen: Vec2, world_radius: f32) -> Self {
        let size = MINIMAP_SIZE;
        Self {
            origin: screen - Vec2::splat(size + MINIMAP_MARGIN),
            size,
            scale: size / (world_radius * MINIMAP_WORLD_SPAN),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.origin, self.origin + Vec2::splat(self.size))
    }

    #[inline]
    pub fn project(&self, world: Vec2) -> Vec2 {
        self.center() + world * self.scale
    }

    /// Clip test for points already projected onto the minimap.
    #[inline]
    pub fn contains(&self, screen: Vec2) -> bool {
        self.rect().contains(screen)
    }

    #[inline]
    pub fn dot_radius(&self, world_radius: f32) -> f32 {
        (world_radius * self.scale).max(MINIMAP_MIN_DOT)
    }

    /// The main camera's visible area drawn onto the minimap.
    pub fn viewport_rect(&self, projection: &Projection) -> Rect {
        let half = projection.visible_world_size() / 2.0;
        Rect::from_corners(
            self.project(projection.camera - half),
            self.project(projection.camera + half),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> Projection {
        Projection {
            camera: Vec2::new(100.0, -50.0),
            zoom: 2.0,
            screen: Vec2::new(800.0, 600.0),
        }
    }

    #[test]
    fn camera_centre_projects_to_screen_centre() {
        let p = projection();
        assert_eq!(p.world_to_screen(p.camera), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn screen_to_world_inverts_world_to_screen() {
        let p = projection();
        let w = Vec2::new(-321.5, 77.25);
        assert!((p.screen_to_world(p.world_to_screen(w)) - w).length() < 1e-3);
    }

    #[test]
    fn visible_area_shrinks_with_zoom() {
        let p = projection();
        assert_eq!(p.visible_world_size(), Vec2::new(400.0, 300.0));
        let r = p.visible_world_rect(10.0);
        assert_eq!(r.min, Vec2::new(-110.0, -210.0));
        assert_eq!(r.max, Vec2::new(310.0, 110.0));
    }

    #[test]
    fn follow_and_zoom_are_exponential() {
        let mut cam = Camera::default();
        cam.follow(Vec2::new(100.0, 0.0), 0.1);
        assert!((cam.position.x - 10.0).abs() < 1e-5);
        cam.approach_zoom(2.0, 0.1);
        assert!((cam.zoom - 1.1).abs() < 1e-6);
    }

    #[test]
    fn minimap_sits_in_bottom_right_corner() {
        let m = MinimapProjection::new(Vec2::new(1280.0, 720.0), 5000.0);
        assert_eq!(m.origin, Vec2::new(1080.0, 520.0));
        assert_eq!(m.project(Vec2::ZERO), Vec2::new(1170.0, 610.0));
        let edge = m.project(Vec2::new(5000.0, 0.0));
        assert!(m.contains(edge));
        assert!(!m.contains(m.project(Vec2::new(6000.0, 0.0))));
    }

    #[test]
    fn minimap_dots_have_a_floor() {
        let m = MinimapProjection::new(Vec2::new(1280.0, 720.0), 5000.0);
        assert_eq!(m.dot_radius(20.0), MINIMAP_MIN_DOT);
        assert!(m.dot_radius(400.0) > MINIMAP_MIN_DOT);
    }

    #[test]
    fn viewport_rect_tracks_camera() {
        let m = MinimapProjection::new(Vec2::new(1280.0, 720.0), 5000.0);
        let p = Projection {
            camera: Vec2::ZERO,
            zoom: 1.0,
            screen: Vec2::new(1280.0, 720.0),
        };
        let r = m.viewport_rect(&p);
        assert!((r.center() - m.center()).length() < 1e-4);
        assert!((r.width() - 1280.0 * m.scale).abs() < 1e-4);
    }
}
