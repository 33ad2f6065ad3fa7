//! # SCREE Procedural
//!
//! Deterministic terrain generation: a seeded simplex-noise source and a
//! sliding window of fixed-width terrain chunks built on top of it.
//!
//! Chunks are allocated once at startup and recycled as the tracked
//! position advances; the same [`noise::SimplexNoise`] instance drives
//! every regeneration, so any world x always produces the same height.

pub mod noise;
pub mod terrain;

pub use noise::{SimplexNoise, WorldSeed};
pub use terrain::{Chunk, Terrain};
