//! # Game Components
//!
//! Plain data attached to entities. The [`crate::Physics`] component
//! lives in [`crate::physics`] next to its integration code.

use scree_shared::Vec2;

/// Player control tuning: how hard the controller pushes and jumps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Controller {
    /// Horizontal force applied per tick while a direction key is held.
    pub drive: f32,
    /// Upward velocity impulse applied on jump (y-down: applied as -y).
    pub jump_impulse: f32,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            drive: 1.0,
            jump_impulse: 30.0,
        }
    }
}

/// A solid colored rectangle, the only renderable shape the core emits.
///
/// Drawn with its top-left corner at the entity's transform position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSprite {
    /// Width and height in world units.
    pub dimensions: Vec2,
    /// Fill color as 0xRRGGBB.
    pub color: u32,
}

impl BoxSprite {
    /// Creates a sprite with the given size and fill color.
    #[must_use]
    pub const fn new(dimensions: Vec2, color: u32) -> Self {
        Self { dimensions, color }
    }
}

/// Marker: the camera centers on this entity, and the terrain window
/// advances with it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraFollow;
