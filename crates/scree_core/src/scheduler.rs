//! # Scheduler
//!
//! The ECS root: owns the world, the registered systems, and each
//! system's cached live set.
//!
//! ## Tick order
//!
//! 1. Systems run sequentially in registration order, each over a
//!    snapshot of its live set.
//! 2. After each system returns, its queued spawns and component
//!    additions are applied and membership is refreshed - so an entity
//!    spawned or extended by system A is visible to system B later in
//!    the same tick.
//! 3. After all systems have run, the removal queue is drained: destroyed
//!    entities leave the world and every live set at once. An entity
//!    destroyed mid-tick is therefore still seen by every remaining
//!    system in that tick.

use std::any::TypeId;
use std::collections::BTreeSet;

use crate::component::{Component, ComponentContainer};
use crate::entity::Entity;
use crate::error::{EcsError, EcsResult};
use crate::system::{Command, CommandBuffer, SpawnBundle, System};
use crate::world::World;

struct SystemSlot<Ctx> {
    system: Box<dyn System<Ctx>>,
    required: Vec<TypeId>,
    // BTreeSet keeps iteration order deterministic across runs.
    live: BTreeSet<Entity>,
}

/// The ECS registry and scheduler.
pub struct Ecs<Ctx> {
    world: World,
    systems: Vec<SystemSlot<Ctx>>,
    commands: CommandBuffer,
}

impl<Ctx> Default for Ecs<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> Ecs<Ctx> {
    /// Creates an empty registry with no systems.
    #[must_use]
    pub fn new() -> Self {
        Self {
            world: World::new(),
            systems: Vec::new(),
            commands: CommandBuffer::new(),
        }
    }

    /// Borrows the underlying world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutably borrows the underlying world.
    ///
    /// Component *values* may be mutated freely; structural changes must
    /// go through [`Ecs::add_component`] and friends so live sets stay
    /// consistent.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Allocates a fresh entity.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.world.spawn();
        // A system with an empty requirement set matches every entity,
        // including a freshly spawned one.
        self.refresh_entity(entity);
        entity
    }

    /// Allocates an entity pre-populated from a bundle, with its
    /// membership evaluated in one step. Systems use
    /// [`CommandBuffer::spawn`] for the same thing mid-tick.
    pub fn spawn_bundle(&mut self, bundle: SpawnBundle) -> Entity {
        let entity = self.world.spawn_bundle(bundle);
        self.refresh_entity(entity);
        entity
    }

    /// Attaches a component and re-evaluates every system's membership
    /// for this entity.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if the entity does not exist.
    pub fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> EcsResult<()> {
        self.world.insert(entity, component)?;
        self.refresh_entity(entity);
        Ok(())
    }

    /// Detaches a component and re-evaluates membership. Returns whether
    /// the component was attached.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if the entity does not exist.
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> EcsResult<bool> {
        let removed = self.world.components_mut(entity)?.remove::<C>();
        if removed {
            self.refresh_entity(entity);
        }
        Ok(removed)
    }

    /// Borrows an entity's component container.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if the entity does not exist.
    pub fn components(&self, entity: Entity) -> EcsResult<&ComponentContainer> {
        self.world.components(entity)
    }

    /// Mutably borrows an entity's component container.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if the entity does not exist.
    pub fn components_mut(&mut self, entity: Entity) -> EcsResult<&mut ComponentContainer> {
        self.world.components_mut(entity)
    }

    /// Queues an entity for destruction at the end of the current tick.
    ///
    /// The entity stays in the world - and in every live set - until the
    /// tick's drain phase.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if the entity does not exist.
    pub fn destroy_entity(&mut self, entity: Entity) -> EcsResult<()> {
        if !self.world.contains(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        self.world.schedule_removal(entity);
        Ok(())
    }

    /// Registers a system and evaluates its membership against all
    /// existing entities, so systems can be added after entities exist.
    pub fn add_system<S: System<Ctx> + 'static>(&mut self, system: S) {
        let required = system.required_components();
        let live = self
            .world
            .entities()
            .filter(|&entity| {
                self.world
                    .components(entity)
                    .is_ok_and(|container| container.contains_all(&required))
            })
            .collect();

        tracing::debug!(
            index = self.systems.len(),
            requirements = required.len(),
            "system registered"
        );

        self.systems.push(SystemSlot {
            system: Box::new(system),
            required,
            live,
        });
    }

    /// Number of registered systems, in registration order.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// The live set of the system at `index`, for inspection.
    #[must_use]
    pub fn live_set(&self, index: usize) -> Option<&BTreeSet<Entity>> {
        self.systems.get(index).map(|slot| &slot.live)
    }

    /// Runs one tick: every system in registration order, then the
    /// removal drain.
    pub fn tick(&mut self, ctx: &mut Ctx) {
        for index in 0..self.systems.len() {
            let snapshot: Vec<Entity> = self.systems[index].live.iter().copied().collect();
            self.systems[index]
                .system
                .update(ctx, &mut self.world, &snapshot, &mut self.commands);
            self.apply_commands();
        }
        self.drain_removals();
    }

    /// Applies queued structural changes from the last system update.
    fn apply_commands(&mut self) {
        for command in self.commands.take() {
            match command {
                Command::AddComponent { entity, component } => {
                    match self.world.insert_boxed(entity, component) {
                        Ok(()) => self.refresh_entity(entity),
                        Err(error) => {
                            // A logic bug in the issuing system; the add
                            // is dropped rather than crashing the tick.
                            tracing::warn!(%entity, %error, "queued component add failed");
                        }
                    }
                }
                Command::Spawn { bundle } => {
                    let entity = self.world.spawn_bundle(bundle);
                    self.refresh_entity(entity);
                    tracing::debug!(%entity, "entity spawned mid-tick");
                }
                Command::Destroy { entity } => self.world.schedule_removal(entity),
            }
        }
    }

    /// End-of-tick drain: destroyed entities leave the world and every
    /// live set.
    fn drain_removals(&mut self) {
        for entity in self.world.take_pending_removals() {
            self.world.remove_entity(entity);
            for slot in &mut self.systems {
                slot.live.remove(&entity);
            }
            tracing::debug!(%entity, "entity destroyed");
        }
    }

    /// Restores the membership invariant for one entity across all
    /// systems.
    fn refresh_entity(&mut self, entity: Entity) {
        let container = self.world.components(entity).ok();
        for slot in &mut self.systems {
            let qualifies =
                container.is_some_and(|container| container.contains_all(&slot.required));
            if qualifies {
                slot.live.insert(entity);
            } else {
                slot.live.remove(&entity);
            }
        }
    }
}
