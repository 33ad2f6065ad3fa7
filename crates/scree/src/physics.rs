//! # Physics
//!
//! Per-tick kinematic integration plus iterative terrain penetration
//! correction.
//!
//! ## Tick order per entity
//!
//! 1. `grounded` resets to false; it is re-earned by contact every tick.
//! 2. Gravity is accumulated as a force whenever enabled.
//! 3. `velocity += acceleration / mass`, then `|velocity.x|` is clamped
//!    to `max_speed`.
//! 4. `position += velocity * dt`.
//! 5. Velocity is damped on each axis that received no force this tick,
//!    then the force accumulator is cleared.
//! 6. Penetration correction: the entity is nudged out along each
//!    intersecting line's surface normal in fixed steps, the velocity
//!    component into the surface is removed, and `grounded` is set.
//!
//! The correction is an iterative push-out, not a time-of-impact solve;
//! it assumes per-tick movement is small relative to terrain features.

use std::any::TypeId;

use scree_core::{CommandBuffer, Entity, System, World};
use scree_shared::{Aabb, Line, Vec2};

use crate::context::TickContext;

/// Gravity force in world units per tick squared (+y is down).
pub const GRAVITY: f32 = 3.0;
/// Velocity multiplier per tick on axes with no applied force.
pub const DAMPING: f32 = 0.9;
/// Distance of one penetration-correction nudge.
pub const CORRECTION_STEP: f32 = 0.2;
/// Upper bound on correction nudges per line per tick.
pub const MAX_CORRECTION_STEPS: u32 = 512;

/// Kinematic state and collision box for a physics-enabled entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    /// Velocity in world units per tick.
    pub velocity: Vec2,
    /// Force accumulator, cleared after every integration.
    pub acceleration: Vec2,
    /// Collision box size; the transform position is its top-left corner.
    pub dimensions: Vec2,
    /// Mass dividing accumulated force.
    pub mass: f32,
    /// Whether gravity applies to this entity.
    pub gravity: bool,
    /// Horizontal speed clamp.
    pub max_speed: f32,
    /// Whether the entity resolved a terrain contact this tick.
    pub grounded: bool,
}

impl Physics {
    /// Creates a unit-mass, gravity-enabled body with the given box size.
    #[must_use]
    pub fn new(dimensions: Vec2) -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            dimensions,
            mass: 1.0,
            gravity: true,
            max_speed: 10.0,
            grounded: false,
        }
    }

    /// Accumulates a force for the next integration.
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// The entity's collision box at the given position.
    #[inline]
    #[must_use]
    pub fn aabb(&self, position: Vec2) -> Aabb {
        Aabb::new(position, self.dimensions)
    }
}

/// One integration step; mutates velocity and position, clears forces.
fn integrate(physics: &mut Physics, position: &mut Vec2, dt: f32) {
    physics.grounded = false;

    if physics.gravity {
        physics.acceleration.y += GRAVITY;
    }
    let applied = physics.acceleration;

    physics.velocity += physics.acceleration / physics.mass;
    physics.velocity.x = physics.velocity.x.clamp(-physics.max_speed, physics.max_speed);
    *position += physics.velocity * dt;

    // Drag only on axes the entity is not actively driven along.
    if applied.x == 0.0 {
        physics.velocity.x *= DAMPING;
    }
    if applied.y == 0.0 {
        physics.velocity.y *= DAMPING;
    }
    physics.acceleration = Vec2::ZERO;
}

/// Pushes the entity out of every intersecting line along its surface
/// normal, removes the velocity component into the surface, and marks
/// the entity grounded on any resolved contact.
fn resolve_collisions(physics: &mut Physics, position: &mut Vec2, lines: &[Line]) {
    for line in lines {
        if line.is_degenerate() {
            continue;
        }

        let mut corrected = false;
        let mut steps = 0;
        while line.intersects_aabb(&physics.aabb(*position)) {
            *position += line.surface_normal * CORRECTION_STEP;
            corrected = true;
            steps += 1;
            if steps >= MAX_CORRECTION_STEPS {
                tracing::warn!(
                    ?position,
                    "penetration correction hit its iteration cap"
                );
                break;
            }
        }

        if corrected {
            let normal = line.surface_normal;
            physics.velocity -= normal * physics.velocity.dot(normal);
            physics.grounded = true;
        }
    }
}

/// The physics system: integrates every [`Physics`] entity and resolves
/// it against the terrain, destroying entities that fall below the kill
/// depth.
pub struct PhysicsSystem;

impl System<TickContext> for PhysicsSystem {
    fn required_components(&self) -> Vec<TypeId> {
        vec![TypeId::of::<Physics>()]
    }

    fn update(
        &mut self,
        ctx: &mut TickContext,
        world: &mut World,
        entities: &[Entity],
        commands: &mut CommandBuffer,
    ) {
        let kill_depth = ctx.terrain.config().level_down_extension;

        for &entity in entities {
            let Ok(container) = world.components_mut(entity) else {
                // Destruction is deferred past the tick, so a live set
                // can never name a missing entity.
                tracing::error!(%entity, "live set referenced a missing entity");
                continue;
            };
            let mut position = container.transform.position;
            {
                let Some(physics) = container.get_mut::<Physics>() else {
                    continue;
                };
                integrate(physics, &mut position, ctx.dt);
                let lines = ctx.terrain.colliding_lines(&physics.aabb(position));
                resolve_collisions(physics, &mut position, &lines);
            }
            container.transform.position = position;

            if position.y > kill_depth {
                tracing::debug!(%entity, y = position.y, "entity fell out of the world");
                commands.destroy(entity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_ground(y: f32) -> Line {
        // Wound left to right: normal points up (-y).
        Line::new(Vec2::new(-1_000.0, y), Vec2::new(1_000.0, y))
    }

    fn step(physics: &mut Physics, position: &mut Vec2, lines: &[Line]) {
        integrate(physics, position, 1.0);
        resolve_collisions(physics, position, lines);
    }

    #[test]
    fn test_gravity_accelerates_downward() {
        let mut physics = Physics::new(Vec2::splat(20.0));
        let mut position = Vec2::ZERO;

        integrate(&mut physics, &mut position, 1.0);
        assert!((physics.velocity.y - GRAVITY).abs() < 1e-6);
        assert!(position.y > 0.0);
    }

    #[test]
    fn test_gravity_flag_disables_gravity() {
        let mut physics = Physics::new(Vec2::splat(20.0));
        physics.gravity = false;
        let mut position = Vec2::ZERO;

        integrate(&mut physics, &mut position, 1.0);
        assert_eq!(physics.velocity, Vec2::ZERO);
        assert_eq!(position, Vec2::ZERO);
    }

    #[test]
    fn test_horizontal_speed_is_clamped() {
        let mut physics = Physics::new(Vec2::splat(20.0));
        physics.gravity = false;
        let mut position = Vec2::ZERO;

        for _ in 0..100 {
            physics.apply_force(Vec2::new(5.0, 0.0));
            integrate(&mut physics, &mut position, 1.0);
        }
        assert!((physics.velocity.x - physics.max_speed).abs() < 1e-6);
    }

    #[test]
    fn test_damping_applies_only_without_force() {
        let mut physics = Physics::new(Vec2::splat(20.0));
        physics.gravity = false;
        physics.velocity = Vec2::new(10.0, 0.0);
        let mut position = Vec2::ZERO;

        integrate(&mut physics, &mut position, 1.0);
        assert!((physics.velocity.x - 10.0 * DAMPING).abs() < 1e-5);

        // A driven axis is not damped.
        physics.velocity.x = 5.0;
        physics.apply_force(Vec2::new(1.0, 0.0));
        integrate(&mut physics, &mut position, 1.0);
        assert!((physics.velocity.x - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_settles_on_flat_ground() {
        let ground = flat_ground(50.0);
        let mut physics = Physics::new(Vec2::splat(20.0));
        // Bottom of the box 40 units above the ground.
        let mut position = Vec2::new(0.0, 50.0 - 20.0 - 40.0);

        for _ in 0..100 {
            step(&mut physics, &mut position, &[ground]);
        }

        assert!(physics.grounded);
        // Resting with its bottom edge within one correction step of the
        // surface, velocity into the ground removed.
        let bottom = position.y + physics.dimensions.y;
        assert!((bottom - 50.0).abs() <= CORRECTION_STEP + 1e-3);
        assert!(physics.velocity.y.abs() < 1e-5);
    }

    #[test]
    fn test_grounded_resets_without_contact() {
        let ground = flat_ground(50.0);
        let mut physics = Physics::new(Vec2::splat(20.0));
        let mut position = Vec2::new(0.0, 20.0);

        for _ in 0..100 {
            step(&mut physics, &mut position, &[ground]);
        }
        assert!(physics.grounded);

        // No candidate lines: the flag is not sticky.
        step(&mut physics, &mut position, &[]);
        assert!(!physics.grounded);
    }

    #[test]
    fn test_correction_removes_only_normal_velocity() {
        // 45-degree downhill slope.
        let slope = Line::new(Vec2::new(-100.0, -100.0), Vec2::new(100.0, 100.0));
        let mut physics = Physics::new(Vec2::splat(10.0));
        physics.gravity = false;
        physics.velocity = Vec2::new(4.0, 4.0);
        // Overlapping the slope so a correction fires immediately.
        let mut position = Vec2::new(-5.0, -5.0);

        resolve_collisions(&mut physics, &mut position, &[slope]);

        assert!(physics.grounded);
        // Velocity (4, 4) is parallel to this slope already after the
        // normal component is projected out; tangential motion survives.
        let normal = slope.surface_normal;
        assert!(physics.velocity.dot(normal).abs() < 1e-4);
        assert!(physics.velocity.length() > 1.0);
    }

    #[test]
    fn test_stale_snapshot_entity_is_skipped() {
        use scree_core::Ecs;
        use scree_procedural::{Terrain, WorldSeed};
        use scree_shared::LevelConfig;

        use crate::camera::Camera;

        let terrain = Terrain::new(WorldSeed::new(42), LevelConfig::default(), 0.0);
        let mut ctx = TickContext::new(terrain, Camera::new(Vec2::new(800.0, 600.0)));

        let mut ecs: Ecs<TickContext> = Ecs::new();
        let stale = ecs.create_entity();
        ecs.destroy_entity(stale).expect("entity alive");
        ecs.tick(&mut ctx);
        assert!(ecs.components(stale).is_err());

        let live = ecs.create_entity();
        ecs.add_component(live, Physics::new(Vec2::splat(20.0)))
            .expect("fresh entity");
        // High above the terrain band: one tick of free fall.
        ecs.components_mut(live)
            .expect("entity alive")
            .transform
            .position = Vec2::new(0.0, -10_000.0);

        // A snapshot naming a destroyed entity is a registry bug; the
        // system must report it and keep processing the rest.
        let mut commands = CommandBuffer::new();
        PhysicsSystem.update(&mut ctx, ecs.world_mut(), &[stale, live], &mut commands);

        let physics = ecs
            .components(live)
            .expect("entity alive")
            .get::<Physics>()
            .expect("physics attached");
        assert!((physics.velocity.y - GRAVITY).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_lines_are_ignored() {
        let degenerate = Line::new(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));
        let mut physics = Physics::new(Vec2::splat(20.0));
        let mut position = Vec2::ZERO;

        resolve_collisions(&mut physics, &mut position, &[degenerate]);
        assert!(!physics.grounded);
        assert_eq!(position, Vec2::ZERO);
    }
}
