//! # Tick Context
//!
//! Everything the systems share during one tick, threaded explicitly
//! through [`scree_core::Ecs::tick`] instead of living in globals.

use scree_procedural::Terrain;

use crate::camera::Camera;
use crate::input::InputSnapshot;

/// Shared per-tick state: terrain, camera, the input snapshot, and the
/// timestep.
pub struct TickContext {
    /// The sliding terrain window.
    pub terrain: Terrain,
    /// The view transform, updated by the camera-follow system.
    pub camera: Camera,
    /// Key state captured once at tick start.
    pub input: InputSnapshot,
    /// Timestep in frame units; position advances by `velocity * dt`.
    pub dt: f32,
}

impl TickContext {
    /// Creates a context with an empty input snapshot and a unit timestep.
    #[must_use]
    pub fn new(terrain: Terrain, camera: Camera) -> Self {
        Self {
            terrain,
            camera,
            input: InputSnapshot::default(),
            dt: 1.0,
        }
    }
}
