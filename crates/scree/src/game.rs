//! # Game
//!
//! The fixed-step loop glue: owns the ECS, the tick context, and the
//! host input source. One [`Game::tick`] is one logical frame:
//!
//! 1. Capture the input snapshot.
//! 2. Run the ECS tick (control, physics, rocks, camera follow +
//!    terrain advance, then the removal drain).
//! 3. Stop cooperatively if the tracked player has been destroyed.

use std::time::{Duration, Instant};

use scree_core::{Ecs, EcsResult, Entity};
use scree_procedural::{Terrain, WorldSeed};
use scree_shared::{LevelConfig, Vec2};

use crate::camera::Camera;
use crate::components::{BoxSprite, CameraFollow, Controller};
use crate::context::TickContext;
use crate::input::{InputSnapshot, InputSource};
use crate::physics::{Physics, PhysicsSystem};
use crate::render::{draw_list, DrawCommand};
use crate::rocks::{self, RockSystem};
use crate::systems::{CameraFollowSystem, ControlSystem};

/// Player collision box size.
const PLAYER_SIZE: Vec2 = Vec2::splat(20.0);
/// Player fill color.
const PLAYER_COLOR: u32 = 0x00E0_5020;
/// Drop height of the player spawn above the terrain surface.
const SPAWN_DROP: f32 = 40.0;
/// Side length of the level's starting rock.
const ROCK_SPAWN_SIZE: f32 = 100.0;
/// Horizontal lead of the starting rock ahead of the player.
const ROCK_SPAWN_LEAD: f32 = 300.0;
/// Drop height of the starting rock above the terrain surface.
const ROCK_SPAWN_DROP: f32 = 200.0;
/// Frame budget before a slow-frame warning is logged.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

/// The running game: ECS, tick context, input, and the loop flag.
pub struct Game {
    ecs: Ecs<TickContext>,
    ctx: TickContext,
    input: Box<dyn InputSource>,
    player: Entity,
    running: bool,
    frame: u64,
}

impl Game {
    /// Builds a world from a seed and level config, spawns the player
    /// centered in the viewport just above the terrain surface, and
    /// drops a starting rock ahead of the spawn.
    ///
    /// # Errors
    ///
    /// Propagates [`scree_core::EcsError`] from entity setup; cannot
    /// occur for a freshly spawned player.
    pub fn new(
        seed: WorldSeed,
        config: LevelConfig,
        viewport: Vec2,
        input: Box<dyn InputSource>,
    ) -> EcsResult<Self> {
        let spawn_x = viewport.x * 0.5;
        let terrain = Terrain::new(seed, config, spawn_x);
        let ctx = TickContext::new(terrain, Camera::new(viewport));

        let mut ecs: Ecs<TickContext> = Ecs::new();
        ecs.add_system(ControlSystem);
        ecs.add_system(PhysicsSystem);
        // After physics: reacts to the tick's fresh ground contacts.
        ecs.add_system(RockSystem::new(seed));
        ecs.add_system(CameraFollowSystem);

        let surface = ctx.terrain.surface_height(spawn_x + PLAYER_SIZE.x * 0.5);
        let spawn = Vec2::new(spawn_x, surface - PLAYER_SIZE.y - SPAWN_DROP);

        let player = ecs.create_entity();
        ecs.add_component(player, Physics::new(PLAYER_SIZE))?;
        ecs.add_component(player, Controller::default())?;
        ecs.add_component(player, BoxSprite::new(PLAYER_SIZE, PLAYER_COLOR))?;
        ecs.add_component(player, CameraFollow)?;
        ecs.components_mut(player)?.transform.position = spawn;

        let rock_x = spawn_x + ROCK_SPAWN_LEAD;
        let rock_surface = ctx.terrain.surface_height(rock_x + ROCK_SPAWN_SIZE * 0.5);
        ecs.spawn_bundle(rocks::rock_bundle(
            Vec2::new(rock_x, rock_surface - ROCK_SPAWN_SIZE - ROCK_SPAWN_DROP),
            ROCK_SPAWN_SIZE,
            rocks::launch_velocity(seed),
        ));

        tracing::info!(
            seed = seed.value(),
            spawn_x = spawn.x,
            spawn_y = spawn.y,
            "game world ready"
        );

        Ok(Self {
            ecs,
            ctx,
            input,
            player,
            running: true,
            frame: 0,
        })
    }

    /// Runs one logical frame. A stopped game ignores the call.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        let started = Instant::now();

        self.ctx.input = InputSnapshot::capture(self.input.as_ref());
        self.ecs.tick(&mut self.ctx);
        self.frame += 1;

        if !self.ecs.world().contains(self.player) {
            tracing::info!(frame = self.frame, "player destroyed, stopping");
            self.running = false;
        }

        let elapsed = started.elapsed();
        if elapsed > FRAME_BUDGET {
            tracing::warn!(?elapsed, frame = self.frame, "slow frame");
        }
    }

    /// Ticks up to `frames` times, stopping early if the loop flag
    /// clears.
    pub fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            if !self.running {
                break;
            }
            self.tick();
        }
    }

    /// Clears the loop flag; the next [`Game::tick`] becomes a no-op.
    /// This is the only cancellation mechanism - there is no mid-tick
    /// abort.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the loop flag is still set.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Completed frame count.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The tracked player entity.
    #[must_use]
    pub fn player(&self) -> Entity {
        self.player
    }

    /// The shared tick context (terrain, camera, last input snapshot).
    #[must_use]
    pub fn context(&self) -> &TickContext {
        &self.ctx
    }

    /// The ECS registry.
    #[must_use]
    pub fn ecs(&self) -> &Ecs<TickContext> {
        &self.ecs
    }

    /// Mutable ECS access for hosts that spawn extra entities.
    pub fn ecs_mut(&mut self) -> &mut Ecs<TickContext> {
        &mut self.ecs
    }

    /// Replaces the input source.
    pub fn set_input(&mut self, input: Box<dyn InputSource>) {
        self.input = input;
    }

    /// Extracts this frame's draw list in screen space.
    #[must_use]
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        draw_list(self.ecs.world(), &self.ctx.terrain, &self.ctx.camera)
    }
}
