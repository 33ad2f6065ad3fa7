//! # SCREE Shared Types
//!
//! Math, geometry, and configuration shared by the ECS core, the terrain
//! generator, and the game layer.
//!
//! ## Coordinate convention
//!
//! Screen space: x grows to the right, **y grows downward**. Gravity is +y.
//! Terrain profiles are wound left-to-right along increasing x, so derived
//! surface normals point toward -y ("up" out of solid ground).

pub mod config;
pub mod geometry;
pub mod math;

pub use config::{ConfigError, LevelConfig};
pub use geometry::{line_mesh_from_points, Aabb, Line, EPSILON};
pub use math::Vec2;
