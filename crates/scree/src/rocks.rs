//! # Rocks
//!
//! Boulders that tumble through the level. A rock falls under gravity
//! scaled by its own mass, shatters into two half-size fragments when it
//! hits the terrain, and despawns once it drifts far outside the view.
//! The shatter chain bottoms out when fragments get too small to split.
//!
//! All scatter randomness comes from a [`ChaCha8Rng`] stream derived
//! from the world seed, so rock behavior replays identically.

use std::any::TypeId;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scree_core::{CommandBuffer, Entity, SpawnBundle, System, World};
use scree_procedural::WorldSeed;
use scree_shared::Vec2;

use crate::components::BoxSprite;
use crate::context::TickContext;
use crate::physics::Physics;

/// Rocks at or above this size shatter on impact; smaller ones crumble.
pub const MIN_SPLIT_SIZE: f32 = 50.0;
/// Horizontal scatter speed bound for spawned rocks and fragments.
pub const SCATTER_SPEED: f32 = 3.0;
/// Distance past either screen edge at which a rock despawns.
pub const DESPAWN_MARGIN: f32 = 1_000.0;
/// Rock fill color.
const ROCK_COLOR: u32 = 0x0078_6E64;
/// Fragments spawn this far above the impact position.
const FRAGMENT_LIFT: f32 = 10.0;
/// Sub-seed purposes for the rock random streams.
const LAUNCH_STREAM: u64 = 0x524F_434B;
const SCATTER_STREAM: u64 = 0x524F_434C;

/// Rock state: box side length plus the fall speed carried into impact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rock {
    /// Side length of the square collision box; doubles as the mass.
    pub size: f32,
    /// Downward speed on the last airborne tick; fragments bounce with
    /// half of it.
    fall_speed: f32,
}

impl Rock {
    /// Creates a rock of the given size.
    #[must_use]
    pub const fn new(size: f32) -> Self {
        Self {
            size,
            fall_speed: 0.0,
        }
    }
}

/// Builds the spawn bundle for one rock: physics with mass equal to its
/// size, the rock state, and a square sprite.
#[must_use]
pub fn rock_bundle(position: Vec2, size: f32, velocity: Vec2) -> SpawnBundle {
    let mut physics = Physics::new(Vec2::splat(size));
    physics.mass = size;
    physics.velocity = velocity;

    SpawnBundle::new()
        .at(position)
        .with(physics)
        .with(Rock::new(size))
        .with(BoxSprite::new(Vec2::splat(size), ROCK_COLOR))
}

/// Rolls the horizontal launch velocity for a level's starting rock.
#[must_use]
pub fn launch_velocity(seed: WorldSeed) -> Vec2 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.derive(LAUNCH_STREAM).value());
    Vec2::new(rng.gen_range(-SCATTER_SPEED..SCATTER_SPEED), 0.0)
}

/// Shatters grounded rocks through the command buffer and despawns rocks
/// that drift far outside the view. Runs after physics so it sees the
/// tick's fresh contact state.
pub struct RockSystem {
    rng: ChaCha8Rng,
}

impl RockSystem {
    /// Creates the system with its own random stream for fragment
    /// scatter.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed.derive(SCATTER_STREAM).value()),
        }
    }

    fn scatter(&mut self) -> f32 {
        self.rng.gen_range(-SCATTER_SPEED..SCATTER_SPEED)
    }
}

impl System<TickContext> for RockSystem {
    fn required_components(&self) -> Vec<TypeId> {
        vec![TypeId::of::<Rock>(), TypeId::of::<Physics>()]
    }

    fn update(
        &mut self,
        ctx: &mut TickContext,
        world: &mut World,
        entities: &[Entity],
        commands: &mut CommandBuffer,
    ) {
        for &entity in entities {
            let Ok(container) = world.components_mut(entity) else {
                tracing::error!(%entity, "live set referenced a missing entity");
                continue;
            };
            let position = container.transform.position;
            let Some(&physics) = container.get::<Physics>() else {
                continue;
            };
            let Some(rock) = container.get_mut::<Rock>() else {
                continue;
            };

            if physics.grounded {
                let rock = *rock;
                commands.destroy(entity);

                if rock.size >= MIN_SPLIT_SIZE {
                    let origin = Vec2::new(position.x, position.y - FRAGMENT_LIFT);
                    let bounce = -rock.fall_speed * 0.5;
                    for _ in 0..2 {
                        commands.spawn(rock_bundle(
                            origin,
                            rock.size * 0.5,
                            Vec2::new(self.scatter(), bounce),
                        ));
                    }
                    tracing::debug!(%entity, size = rock.size, "rock shattered");
                } else {
                    tracing::debug!(%entity, size = rock.size, "rock crumbled");
                }
                continue;
            }

            // Contact resolution zeroes the impact speed before this
            // system sees it; remember the airborne value instead.
            rock.fall_speed = physics.velocity.y;

            let screen_x = ctx.camera.world_to_screen(position).x;
            if screen_x < -DESPAWN_MARGIN || screen_x > ctx.camera.viewport.x + DESPAWN_MARGIN {
                tracing::debug!(%entity, "rock drifted offscreen");
                commands.destroy(entity);
            }
        }
    }
}
