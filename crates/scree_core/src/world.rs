//! # ECS World
//!
//! The entity-to-components map plus the pending-removal queue. The world
//! knows nothing about systems; membership bookkeeping lives in the
//! scheduler ([`crate::Ecs`]), which is why the structural mutators here
//! are crate-private.

use std::collections::HashMap;

use crate::component::{Component, ComponentContainer};
use crate::entity::Entity;
use crate::error::{EcsError, EcsResult};
use crate::system::SpawnBundle;

/// Container for all entities and their components.
#[derive(Default)]
pub struct World {
    entities: HashMap<Entity, ComponentContainer>,
    pending_removal: Vec<Entity>,
    next_id: u64,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh entity with an empty component container.
    ///
    /// Ids increase monotonically and are never reused.
    pub(crate) fn spawn(&mut self) -> Entity {
        let entity = Entity::new(self.next_id);
        self.next_id += 1;
        self.entities.insert(entity, ComponentContainer::new());
        entity
    }

    /// Allocates an entity pre-populated from a spawn bundle.
    pub(crate) fn spawn_bundle(&mut self, bundle: SpawnBundle) -> Entity {
        let entity = Entity::new(self.next_id);
        self.next_id += 1;

        let mut container = ComponentContainer::new();
        container.transform = bundle.transform;
        for component in bundle.components {
            container.insert_boxed(component);
        }
        self.entities.insert(entity, container);
        entity
    }

    /// Whether the entity currently exists (destruction may be pending).
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Number of live entities, including those queued for removal.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterates over all live entity ids.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys().copied()
    }

    /// Borrows an entity's component container.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if the entity was destroyed or never
    /// created.
    pub fn components(&self, entity: Entity) -> EcsResult<&ComponentContainer> {
        self.entities
            .get(&entity)
            .ok_or(EcsError::UnknownEntity(entity))
    }

    /// Mutably borrows an entity's component container.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if the entity was destroyed or never
    /// created.
    pub fn components_mut(&mut self, entity: Entity) -> EcsResult<&mut ComponentContainer> {
        self.entities
            .get_mut(&entity)
            .ok_or(EcsError::UnknownEntity(entity))
    }

    /// Attaches a component without touching live sets; the scheduler
    /// re-evaluates membership afterwards.
    pub(crate) fn insert<C: Component>(&mut self, entity: Entity, component: C) -> EcsResult<()> {
        self.components_mut(entity)?.insert(component);
        Ok(())
    }

    /// Boxed variant of [`World::insert`], used by the command buffer.
    pub(crate) fn insert_boxed(
        &mut self,
        entity: Entity,
        component: Box<dyn Component>,
    ) -> EcsResult<()> {
        self.components_mut(entity)?.insert_boxed(component);
        Ok(())
    }

    /// Queues an entity for removal at the end of the current tick.
    pub(crate) fn schedule_removal(&mut self, entity: Entity) {
        if !self.pending_removal.contains(&entity) {
            self.pending_removal.push(entity);
        }
    }

    /// Takes the queued removals, leaving the queue empty.
    pub(crate) fn take_pending_removals(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.pending_removal)
    }

    /// Deletes an entity and its components. Returns whether it existed.
    pub(crate) fn remove_entity(&mut self, entity: Entity) -> bool {
        self.entities.remove(&entity).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_ids_are_monotonic_and_unique() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();

        assert_ne!(a, b);
        assert!(a.raw() < b.raw());
        assert_eq!(world.entity_count(), 2);
    }

    #[test]
    fn test_ids_never_reused_after_removal() {
        let mut world = World::new();
        let a = world.spawn();
        world.remove_entity(a);

        let b = world.spawn();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_spawn_bundle_populates_the_container() {
        use scree_shared::Vec2;

        let mut world = World::new();
        let entity = world.spawn_bundle(
            SpawnBundle::new().at(Vec2::new(1.0, 2.0)).with(9_u32),
        );

        let container = world.components(entity).unwrap();
        assert_eq!(container.transform.position, Vec2::new(1.0, 2.0));
        assert_eq!(container.get::<u32>(), Some(&9));
    }

    #[test]
    fn test_unknown_entity_lookup_fails() {
        let mut world = World::new();
        let entity = world.spawn();
        world.remove_entity(entity);

        assert_eq!(
            world.components(entity).err(),
            Some(EcsError::UnknownEntity(entity))
        );
        assert!(world.components_mut(entity).is_err());
    }

    #[test]
    fn test_removal_queue_deduplicates() {
        let mut world = World::new();
        let entity = world.spawn();

        world.schedule_removal(entity);
        world.schedule_removal(entity);

        assert_eq!(world.take_pending_removals(), vec![entity]);
        assert!(world.take_pending_removals().is_empty());
    }
}
