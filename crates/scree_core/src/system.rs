//! # Systems and the Command Buffer
//!
//! A system declares a fixed set of required component types and is
//! invoked once per tick with the live set of entities satisfying that
//! requirement. Systems own no entities; the scheduler owns the live-set
//! cache.
//!
//! Structural changes made from inside a system (attaching components,
//! destroying entities, spawning new ones) go through a
//! [`CommandBuffer`]. The scheduler applies queued spawns and component
//! additions - with a membership refresh - before the next system runs,
//! and holds destruction until the end-of-tick drain.

use std::any::TypeId;

use scree_shared::Vec2;

use crate::component::{Component, Transform};
use crate::entity::Entity;
use crate::world::World;

/// Per-tick behavior over entities matching a component signature.
///
/// `Ctx` is the explicit context object (camera, terrain, input snapshot)
/// threaded through the tick in place of the global singletons the
/// browser prototypes leaned on.
pub trait System<Ctx> {
    /// The component types an entity must carry to enter this system's
    /// live set.
    fn required_components(&self) -> Vec<TypeId>;

    /// Runs the system over a snapshot of its live set.
    ///
    /// `entities` is the live set as of the start of this call; changes
    /// queued on `commands` never mutate the snapshot mid-iteration.
    fn update(
        &mut self,
        ctx: &mut Ctx,
        world: &mut World,
        entities: &[Entity],
        commands: &mut CommandBuffer,
    );
}

/// Position and components for an entity created between systems.
///
/// Built with the chained [`SpawnBundle::at`] / [`SpawnBundle::with`]
/// calls and handed to [`CommandBuffer::spawn`].
#[derive(Default)]
pub struct SpawnBundle {
    pub(crate) transform: Transform,
    pub(crate) components: Vec<Box<dyn Component>>,
}

impl SpawnBundle {
    /// Creates an empty bundle positioned at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spawn position.
    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.transform = Transform::new(position);
        self
    }

    /// Adds a component to the bundle.
    #[must_use]
    pub fn with<C: Component>(mut self, component: C) -> Self {
        self.components.push(Box::new(component));
        self
    }
}

/// A queued structural change.
pub(crate) enum Command {
    /// Attach (or replace) a component on an entity.
    AddComponent {
        /// Target entity.
        entity: Entity,
        /// The component instance, boxed by concrete type.
        component: Box<dyn Component>,
    },
    /// Create a fresh entity from a bundle.
    Spawn {
        /// Position and components for the new entity.
        bundle: SpawnBundle,
    },
    /// Queue an entity for end-of-tick destruction.
    Destroy {
        /// Target entity.
        entity: Entity,
    },
}

/// Queue of structural changes recorded during a system update.
#[derive(Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a component attachment. Applied - with a live-set refresh -
    /// after the current system finishes.
    pub fn add_component<C: Component>(&mut self, entity: Entity, component: C) {
        self.commands.push(Command::AddComponent {
            entity,
            component: Box::new(component),
        });
    }

    /// Queues a fresh entity spawn. The entity is created - with a
    /// live-set refresh - after the current system finishes, so later
    /// systems see it in the same tick.
    pub fn spawn(&mut self, bundle: SpawnBundle) {
        self.commands.push(Command::Spawn { bundle });
    }

    /// Queues an entity for destruction at the end of the tick.
    pub fn destroy(&mut self, entity: Entity) {
        self.commands.push(Command::Destroy { entity });
    }

    /// Whether any changes are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Takes the queued commands, leaving the buffer empty.
    pub(crate) fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_records_and_drains() {
        let mut buffer = CommandBuffer::new();
        assert!(buffer.is_empty());

        buffer.add_component(Entity::new(0), 7_u32);
        buffer.spawn(SpawnBundle::new().with(7_u32));
        buffer.destroy(Entity::new(0));
        assert!(!buffer.is_empty());

        assert_eq!(buffer.take().len(), 3);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_bundle_collects_position_and_components() {
        let bundle = SpawnBundle::new()
            .at(Vec2::new(3.0, 4.0))
            .with(7_u32)
            .with(1.5_f32);

        assert_eq!(bundle.transform.position, Vec2::new(3.0, 4.0));
        assert_eq!(bundle.components.len(), 2);
    }
}
