//! # Components
//!
//! Components are plain data attached to an entity, keyed by their type.
//! A component type is attached to an entity at most once; re-adding
//! replaces the previous instance.
//!
//! Every entity implicitly carries a [`Transform`] - it lives outside the
//! typed map and cannot appear in a system's requirement set.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use scree_shared::Vec2;

/// Marker trait for ECS components.
///
/// Blanket-implemented for every `'static` type that is `Send + Sync`, so
/// any plain data struct qualifies. The downcast hooks exist because trait
/// objects cannot reach `Any`'s methods directly.
pub trait Component: Any + Send + Sync {
    /// Upcast for downcasting by concrete type.
    fn as_any(&self) -> &dyn Any;
    /// Mutable upcast for downcasting by concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any + Send + Sync> Component for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Position component implicitly attached to every entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec2,
}

impl Transform {
    /// Creates a transform at the given position.
    #[inline]
    #[must_use]
    pub const fn new(position: Vec2) -> Self {
        Self { position }
    }
}

/// Per-entity typed heterogeneous component storage.
#[derive(Default)]
pub struct ComponentContainer {
    /// The implicit position component.
    pub transform: Transform,
    components: HashMap<TypeId, Box<dyn Component>>,
}

impl ComponentContainer {
    /// Creates an empty container with a default transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a component, replacing any previous instance of the same
    /// type.
    pub fn insert<C: Component>(&mut self, component: C) {
        self.components
            .insert(TypeId::of::<C>(), Box::new(component));
    }

    /// Attaches an already-boxed component by its concrete type.
    pub(crate) fn insert_boxed(&mut self, component: Box<dyn Component>) {
        let type_id = component.as_any().type_id();
        self.components.insert(type_id, component);
    }

    /// Borrows a component by type.
    #[must_use]
    pub fn get<C: Component>(&self) -> Option<&C> {
        self.components
            .get(&TypeId::of::<C>())
            .and_then(|component| component.as_any().downcast_ref())
    }

    /// Mutably borrows a component by type.
    #[must_use]
    pub fn get_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.components
            .get_mut(&TypeId::of::<C>())
            .and_then(|component| component.as_any_mut().downcast_mut())
    }

    /// Detaches a component by type. Returns whether one was attached.
    pub fn remove<C: Component>(&mut self) -> bool {
        self.components.remove(&TypeId::of::<C>()).is_some()
    }

    /// Whether a component of type `C` is attached.
    #[must_use]
    pub fn contains<C: Component>(&self) -> bool {
        self.contains_type(TypeId::of::<C>())
    }

    /// Whether a component of the given type id is attached.
    #[must_use]
    pub fn contains_type(&self, type_id: TypeId) -> bool {
        self.components.contains_key(&type_id)
    }

    /// Whether every listed type is attached (the system membership test).
    #[must_use]
    pub fn contains_all(&self, type_ids: &[TypeId]) -> bool {
        type_ids.iter().all(|id| self.contains_type(*id))
    }

    /// Number of attached components, excluding the implicit transform.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no components are attached beyond the implicit transform.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(u32);

    #[derive(Debug, PartialEq)]
    struct Tag;

    #[test]
    fn test_insert_and_get() {
        let mut container = ComponentContainer::new();
        container.insert(Health(10));

        assert_eq!(container.get::<Health>(), Some(&Health(10)));
        assert!(container.get::<Tag>().is_none());
    }

    #[test]
    fn test_reinsert_replaces() {
        let mut container = ComponentContainer::new();
        container.insert(Health(10));
        container.insert(Health(99));

        assert_eq!(container.len(), 1);
        assert_eq!(container.get::<Health>(), Some(&Health(99)));
    }

    #[test]
    fn test_get_mut() {
        let mut container = ComponentContainer::new();
        container.insert(Health(10));

        container.get_mut::<Health>().unwrap().0 = 5;
        assert_eq!(container.get::<Health>(), Some(&Health(5)));
    }

    #[test]
    fn test_remove() {
        let mut container = ComponentContainer::new();
        container.insert(Tag);

        assert!(container.remove::<Tag>());
        assert!(!container.remove::<Tag>());
        assert!(container.is_empty());
    }

    #[test]
    fn test_contains_all() {
        let mut container = ComponentContainer::new();
        container.insert(Health(1));
        container.insert(Tag);

        assert!(container.contains_all(&[TypeId::of::<Health>()]));
        assert!(container.contains_all(&[TypeId::of::<Health>(), TypeId::of::<Tag>()]));

        container.remove::<Tag>();
        assert!(!container.contains_all(&[TypeId::of::<Health>(), TypeId::of::<Tag>()]));
    }

    #[test]
    fn test_implicit_transform() {
        let mut container = ComponentContainer::new();
        assert_eq!(container.transform.position, Vec2::ZERO);

        container.transform.position = Vec2::new(3.0, 4.0);
        assert_eq!(container.transform.position, Vec2::new(3.0, 4.0));
    }
}
