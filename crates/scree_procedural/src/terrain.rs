//! # Chunked Terrain
//!
//! A sliding window of fixed-width terrain chunks over a shared noise
//! source. Heights are sampled at absolute world x, so adjacent chunks
//! join without seams and a recycled chunk reproduces exactly the heights
//! it would have had if generated fresh.
//!
//! ## Window invariant
//!
//! The chunk list is always sorted ascending by x-position and covers a
//! contiguous span: `chunk[i + 1].x_position == chunk[i].x_position +
//! chunk_width`, no gaps, no overlaps. The recycle protocol preserves
//! this by construction.

use std::collections::VecDeque;

use scree_shared::{line_mesh_from_points, Aabb, LevelConfig, Line, Vec2};

use crate::noise::{SimplexNoise, WorldSeed};

/// Octave count for the height profile.
const OCTAVES: u32 = 3;

/// One fixed-width slice of terrain: the sampled height profile plus the
/// line mesh built from it.
pub struct Chunk {
    x_position: f32,
    points: Vec<Vec2>,
    mesh: Vec<Line>,
}

impl Chunk {
    fn new(noise: &SimplexNoise, config: &LevelConfig, x_position: f32) -> Self {
        let mut chunk = Self {
            x_position,
            points: Vec::with_capacity(config.max_chunk_segments + 3),
            mesh: Vec::with_capacity(config.max_chunk_segments + 2),
        };
        chunk.regenerate(noise, config, x_position);
        chunk
    }

    /// Re-samples this chunk at a new x-position, replacing its points and
    /// mesh in place. Reuses the existing buffers.
    ///
    /// Deterministic: the same `(noise, config, x_position)` always
    /// produces an identical point sequence.
    pub fn regenerate(&mut self, noise: &SimplexNoise, config: &LevelConfig, x_position: f32) {
        self.x_position = x_position;
        self.points.clear();

        for i in 0..=config.max_chunk_segments {
            let x = x_position + i as f32 * config.segment_length;
            self.points.push(Vec2::new(x, profile_height(noise, config, x)));
        }

        // Two closing points seal the profile into a solid region far
        // below the playfield, so nothing falls through between chunks.
        let right = x_position + config.chunk_width();
        self.points.push(Vec2::new(right, config.level_down_extension));
        self.points.push(Vec2::new(x_position, config.level_down_extension));

        self.mesh = line_mesh_from_points(&self.points);
    }

    /// Left edge of this chunk's span.
    #[inline]
    #[must_use]
    pub fn x_position(&self) -> f32 {
        self.x_position
    }

    /// The sampled profile points, closing points included.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// The chunk's line mesh, built from [`Chunk::points`].
    #[must_use]
    pub fn mesh(&self) -> &[Line] {
        &self.mesh
    }
}

/// The terrain manager: a ring of chunks covering a sliding window of
/// world x-coordinates.
pub struct Terrain {
    noise: SimplexNoise,
    config: LevelConfig,
    chunks: VecDeque<Chunk>,
    /// World x of the right edge of the rightmost chunk.
    frontier: f32,
}

impl Terrain {
    /// Builds a terrain window centered on `origin_x`, sized from the
    /// config's render distance (at least three chunks).
    #[must_use]
    pub fn new(seed: WorldSeed, config: LevelConfig, origin_x: f32) -> Self {
        let width = config.chunk_width();
        let count = ((config.render_distance * 2.0 / width).ceil() as usize).max(3);
        Self::with_window(seed, config, origin_x - width, count)
    }

    /// Builds a terrain window of exactly `chunk_count` chunks, the first
    /// starting at `start_x`.
    #[must_use]
    pub fn with_window(
        seed: WorldSeed,
        config: LevelConfig,
        start_x: f32,
        chunk_count: usize,
    ) -> Self {
        let chunk_count = chunk_count.max(1);
        let width = config.chunk_width();
        let noise = SimplexNoise::new(seed);

        let chunks: VecDeque<Chunk> = (0..chunk_count)
            .map(|i| Chunk::new(&noise, &config, start_x + i as f32 * width))
            .collect();
        let frontier = start_x + chunk_count as f32 * width;

        tracing::info!(
            seed = seed.value(),
            chunks = chunk_count,
            chunk_width = width,
            start_x,
            frontier,
            "terrain window built"
        );

        Self {
            noise,
            config,
            chunks,
            frontier,
        }
    }

    /// Slides the window forward while the tracked x-position has crossed
    /// the frontier: the leftmost chunk is regenerated at the frontier and
    /// rotated to the back. O(1) amortized, no allocation.
    pub fn advance(&mut self, tracked_x: f32) {
        while tracked_x > self.frontier {
            let Some(mut chunk) = self.chunks.pop_front() else {
                return;
            };
            let old_x = chunk.x_position();
            chunk.regenerate(&self.noise, &self.config, self.frontier);
            self.chunks.push_back(chunk);

            tracing::debug!(
                from = old_x,
                to = self.frontier,
                "chunk recycled to frontier"
            );
            self.frontier += self.config.chunk_width();
        }
    }

    /// Finds the chunk whose span contains `x`, by binary search over the
    /// sorted window. Out-of-window lookups return `None`.
    #[must_use]
    pub fn chunk_at(&self, x: f32) -> Option<&Chunk> {
        let width = self.config.chunk_width();
        let index = self
            .chunks
            .partition_point(|chunk| chunk.x_position() + width <= x);
        let chunk = self.chunks.get(index)?;
        (x >= chunk.x_position()).then_some(chunk)
    }

    /// Every line of the chunk(s) spanning the box's x-extent that
    /// intersects the box. At most two chunks are consulted, bounding
    /// the query to O(segments per chunk).
    #[must_use]
    pub fn colliding_lines(&self, aabb: &Aabb) -> Vec<Line> {
        let left = self.chunk_at(aabb.min().x);
        let right = self.chunk_at(aabb.max().x);

        let mut lines = Vec::new();
        if let Some(chunk) = left {
            collect_intersections(chunk, aabb, &mut lines);
        }
        if let Some(chunk) = right {
            // The box may sit entirely inside one chunk.
            if !left.is_some_and(|other| std::ptr::eq(other, chunk)) {
                collect_intersections(chunk, aabb, &mut lines);
            }
        }
        lines
    }

    /// The terrain surface height at world `x`, whether or not a chunk
    /// currently covers it.
    #[must_use]
    pub fn surface_height(&self, x: f32) -> f32 {
        profile_height(&self.noise, &self.config, x)
    }

    /// World x of the right edge of the rightmost chunk.
    #[inline]
    #[must_use]
    pub fn frontier(&self) -> f32 {
        self.frontier
    }

    /// The chunks in the window, ascending by x-position.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// The level configuration this terrain was built with.
    #[must_use]
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }
}

fn collect_intersections(chunk: &Chunk, aabb: &Aabb, out: &mut Vec<Line>) {
    out.extend(
        chunk
            .mesh()
            .iter()
            .filter(|line| line.intersects_aabb(aabb))
            .copied(),
    );
}

/// The layered height profile: a base octave plus `OCTAVES` halved-weight
/// octaves at doubled frequency, normalized and scaled into the centered
/// band `[-max_level_height / 2, +max_level_height / 2]`.
fn profile_height(noise: &SimplexNoise, config: &LevelConfig, x: f32) -> f32 {
    let sample_x = f64::from(x) / f64::from(config.noise_sample_size);

    let mut total = noise.sample(sample_x, 0.0);
    let mut divisor = 1.0;
    for k in 1..=OCTAVES {
        let weight = f64::from(2u32.pow(k)).recip();
        total += noise.sample(sample_x * f64::from(2u32.pow(k)), 0.0) * weight;
        divisor += weight;
    }

    ((total / divisor) * f64::from(config.max_level_height) / 2.0) as f32
}
