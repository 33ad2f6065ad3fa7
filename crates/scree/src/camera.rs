//! # Camera
//!
//! A world-to-screen transform: a top-left position and a viewport size.
//! The renderer consumes screen-space coordinates only; the camera is the
//! single place the conversion happens.

use scree_shared::Vec2;

/// The viewing window into world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Top-left corner of the view in world space.
    pub position: Vec2,
    /// Width and height of the view in world units.
    pub viewport: Vec2,
}

impl Camera {
    /// Creates a camera at the world origin.
    #[must_use]
    pub const fn new(viewport: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport,
        }
    }

    /// Converts a world-space point to screen space.
    #[inline]
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position
    }

    /// Centers the viewport on `target`.
    #[inline]
    pub fn follow(&mut self, target: Vec2) {
        self.position = target - self.viewport * 0.5;
    }

    /// World x of the viewport's horizontal center.
    #[inline]
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.position.x + self.viewport.x * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_screen_offsets_by_position() {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));
        camera.position = Vec2::new(100.0, 50.0);

        assert_eq!(
            camera.world_to_screen(Vec2::new(150.0, 50.0)),
            Vec2::new(50.0, 0.0)
        );
    }

    #[test]
    fn test_follow_centers_target() {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));
        camera.follow(Vec2::new(1000.0, 200.0));

        assert_eq!(camera.position, Vec2::new(600.0, -100.0));
        assert_eq!(camera.world_to_screen(Vec2::new(1000.0, 200.0)), Vec2::new(400.0, 300.0));
        assert!((camera.center_x() - 1000.0).abs() < f32::EPSILON);
    }
}
