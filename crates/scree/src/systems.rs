//! # Control and Camera Systems
//!
//! The player-facing systems: key-driven movement and the camera follow
//! that also pulls the terrain window along.

use std::any::TypeId;

use scree_core::{CommandBuffer, Entity, System, World};
use scree_shared::Vec2;

use crate::components::{CameraFollow, Controller};
use crate::context::TickContext;
use crate::physics::Physics;

/// Applies the tick's input snapshot to every controllable entity:
/// horizontal drive while a/d is held, a jump impulse when grounded.
pub struct ControlSystem;

impl System<TickContext> for ControlSystem {
    fn required_components(&self) -> Vec<TypeId> {
        vec![TypeId::of::<Physics>(), TypeId::of::<Controller>()]
    }

    fn update(
        &mut self,
        ctx: &mut TickContext,
        world: &mut World,
        entities: &[Entity],
        _commands: &mut CommandBuffer,
    ) {
        for &entity in entities {
            let Ok(container) = world.components_mut(entity) else {
                // Destruction is deferred past the tick, so a live set
                // can never name a missing entity.
                tracing::error!(%entity, "live set referenced a missing entity");
                continue;
            };
            let Some(&controller) = container.get::<Controller>() else {
                continue;
            };
            let Some(physics) = container.get_mut::<Physics>() else {
                continue;
            };

            if ctx.input.left {
                physics.apply_force(Vec2::new(-controller.drive, 0.0));
            }
            if ctx.input.right {
                physics.apply_force(Vec2::new(controller.drive, 0.0));
            }
            // Grounded state is last tick's contact result; physics runs
            // after this system and re-earns it.
            if ctx.input.jump && physics.grounded {
                physics.velocity.y = -controller.jump_impulse;
                physics.grounded = false;
            }
        }
    }
}

/// Centers the camera on the tracked entity and slides the terrain
/// window up to the right edge of the view.
pub struct CameraFollowSystem;

impl System<TickContext> for CameraFollowSystem {
    fn required_components(&self) -> Vec<TypeId> {
        vec![TypeId::of::<CameraFollow>()]
    }

    fn update(
        &mut self,
        ctx: &mut TickContext,
        world: &mut World,
        entities: &[Entity],
        _commands: &mut CommandBuffer,
    ) {
        // One tracked entity; extras are ignored.
        let Some(&entity) = entities.first() else {
            return;
        };
        let Ok(container) = world.components(entity) else {
            tracing::error!(%entity, "live set referenced a missing entity");
            return;
        };

        let target = container.transform.position;
        ctx.camera.follow(target);
        ctx.terrain.advance(target.x + ctx.camera.viewport.x * 0.5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scree_core::Ecs;
    use scree_procedural::{Terrain, WorldSeed};
    use scree_shared::LevelConfig;

    use crate::camera::Camera;
    use crate::input::InputSnapshot;

    fn test_context() -> TickContext {
        let terrain = Terrain::new(WorldSeed::new(42), LevelConfig::default(), 0.0);
        TickContext::new(terrain, Camera::new(Vec2::new(800.0, 600.0)))
    }

    fn controllable(ecs: &mut Ecs<TickContext>) -> Entity {
        let entity = ecs.create_entity();
        let mut physics = Physics::new(Vec2::splat(20.0));
        physics.gravity = false;
        ecs.add_component(entity, physics).expect("fresh entity");
        ecs.add_component(entity, Controller::default())
            .expect("fresh entity");
        entity
    }

    #[test]
    fn test_drive_keys_accelerate() {
        let mut ecs: Ecs<TickContext> = Ecs::new();
        ecs.add_system(ControlSystem);
        let entity = controllable(&mut ecs);

        let mut ctx = test_context();
        ctx.input = InputSnapshot {
            right: true,
            ..InputSnapshot::default()
        };
        ecs.tick(&mut ctx);

        let container = ecs.components(entity).expect("entity alive");
        let physics = container.get::<Physics>().expect("physics attached");
        assert!(physics.acceleration.x > 0.0);
    }

    #[test]
    fn test_jump_requires_ground_contact() {
        let mut ecs: Ecs<TickContext> = Ecs::new();
        ecs.add_system(ControlSystem);
        let entity = controllable(&mut ecs);

        let mut ctx = test_context();
        ctx.input = InputSnapshot {
            jump: true,
            ..InputSnapshot::default()
        };

        // Airborne: the jump key does nothing.
        ecs.tick(&mut ctx);
        let physics = *ecs
            .components(entity)
            .expect("entity alive")
            .get::<Physics>()
            .expect("physics attached");
        assert_eq!(physics.velocity.y, 0.0);

        // Grounded: the impulse fires upward (-y).
        ecs.components_mut(entity)
            .expect("entity alive")
            .get_mut::<Physics>()
            .expect("physics attached")
            .grounded = true;
        ecs.tick(&mut ctx);
        let physics = *ecs
            .components(entity)
            .expect("entity alive")
            .get::<Physics>()
            .expect("physics attached");
        assert!(physics.velocity.y < 0.0);
        assert!(!physics.grounded);
    }

    #[test]
    fn test_camera_follows_and_terrain_advances() {
        let mut ecs: Ecs<TickContext> = Ecs::new();
        ecs.add_system(CameraFollowSystem);

        let entity = ecs.create_entity();
        ecs.add_component(entity, CameraFollow).expect("fresh entity");

        let mut ctx = test_context();
        let initial_frontier = ctx.terrain.frontier();

        // Move the tracked entity far past the frontier.
        ecs.components_mut(entity)
            .expect("entity alive")
            .transform
            .position = Vec2::new(initial_frontier + 500.0, 0.0);
        ecs.tick(&mut ctx);

        assert!((ctx.camera.center_x() - (initial_frontier + 500.0)).abs() < 1e-3);
        assert!(ctx.terrain.frontier() > initial_frontier);
        assert!(ctx
            .terrain
            .chunk_at(initial_frontier + 500.0)
            .is_some());
    }
}
