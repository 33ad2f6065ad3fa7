//! # SCREE Core Engine
//!
//! Entity component system with cached per-system live sets.
//!
//! ## Architecture rules
//!
//! 1. **Entities are opaque ids** - monotonically increasing, never reused,
//!    so a stale handle can never alias a live entity.
//! 2. **Membership is an invariant, not a query** - a system's live set
//!    always equals the set of entities whose attached component types are
//!    a superset of its requirements; the scheduler restores this after
//!    every structural change.
//! 3. **Destruction is deferred** - removal is queued and drained after all
//!    systems have run for the tick, so no system observes a half-destroyed
//!    entity mid-tick.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut ecs: Ecs<MyContext> = Ecs::new();
//! ecs.add_system(MovementSystem);
//!
//! let entity = ecs.create_entity();
//! ecs.add_component(entity, Velocity::default())?;
//!
//! ecs.tick(&mut context);
//! ```

pub mod component;
pub mod entity;
pub mod error;
pub mod scheduler;
pub mod system;
pub mod world;

pub use component::{Component, ComponentContainer, Transform};
pub use entity::Entity;
pub use error::{EcsError, EcsResult};
pub use scheduler::Ecs;
pub use system::{CommandBuffer, SpawnBundle, System};
pub use world::World;
