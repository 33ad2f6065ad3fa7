//! # SCREE
//!
//! Game layer over the ECS core and the procedural terrain: physics
//! integration, player controls, camera follow, and draw-list extraction.
//!
//! The host supplies input through the [`input::InputSource`] trait and
//! consumes [`render::DrawCommand`] values; this crate never touches
//! pixels or key events directly.

pub mod camera;
pub mod components;
pub mod context;
pub mod game;
pub mod input;
pub mod physics;
pub mod render;
pub mod rocks;
pub mod systems;

pub use camera::Camera;
pub use components::{BoxSprite, CameraFollow, Controller};
pub use context::TickContext;
pub use game::Game;
pub use input::{InputSnapshot, InputSource, KeySet};
pub use physics::Physics;
pub use render::DrawCommand;
pub use rocks::{Rock, RockSystem};
