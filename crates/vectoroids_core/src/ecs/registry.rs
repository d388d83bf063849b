//! # Component Registry
//!
//! Assigns a stable small integer id to each component kind on first use.
//! Purely a naming facility: the registry holds no component data.
//!
//! This is an explicit object rather than a process-global counter, so id
//! assignment order is deterministic per registry and testable.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use super::component::{Component, ComponentId, MAX_COMPONENTS};

/// Maps component types to small integer ids.
///
/// Ids are assigned lazily, in first-use order, and are stable for the
/// lifetime of the registry. The id space is dense: the *n*-th distinct
/// kind asked for gets id *n*.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    ids: HashMap<TypeId, ComponentId>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of component kind `C`, assigning the next free id on
    /// first use.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_COMPONENTS`] distinct kinds are
    /// registered. The bitset width must be chosen at least as large as
    /// the number of component kinds; exceeding it is a fatal
    /// configuration error.
    pub fn id_of<C: Component>(&mut self) -> ComponentId {
        if let Some(&id) = self.ids.get(&TypeId::of::<C>()) {
            return id;
        }

        let next = self.ids.len();
        assert!(
            next < MAX_COMPONENTS,
            "component kind limit ({}) exceeded registering {}",
            MAX_COMPONENTS,
            type_name::<C>()
        );

        let id = next as ComponentId;
        self.ids.insert(TypeId::of::<C>(), id);
        id
    }

    /// Returns the id of `C` if it has been registered, without assigning
    /// a new one.
    #[must_use]
    pub fn lookup<C: Component>(&self) -> Option<ComponentId> {
        self.ids.get(&TypeId::of::<C>()).copied()
    }

    /// Number of registered component kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if no component kind has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Default)]
    struct Alpha;
    #[derive(Clone, Copy, Default)]
    struct Beta;
    #[derive(Clone, Copy, Default)]
    struct Gamma;

    #[test]
    fn test_ids_assigned_in_first_use_order() {
        let mut reg = ComponentRegistry::new();
        assert_eq!(reg.id_of::<Beta>(), 0);
        assert_eq!(reg.id_of::<Alpha>(), 1);
        assert_eq!(reg.id_of::<Gamma>(), 2);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_ids_are_stable() {
        let mut reg = ComponentRegistry::new();
        let first = reg.id_of::<Alpha>();
        reg.id_of::<Beta>();
        assert_eq!(reg.id_of::<Alpha>(), first);
        assert_eq!(reg.lookup::<Alpha>(), Some(first));
    }

    #[test]
    fn test_lookup_does_not_assign() {
        let reg = ComponentRegistry::new();
        assert_eq!(reg.lookup::<Alpha>(), None);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_registries_are_independent() {
        let mut a = ComponentRegistry::new();
        let mut b = ComponentRegistry::new();
        a.id_of::<Alpha>();
        assert_eq!(a.id_of::<Beta>(), 1);
        assert_eq!(b.id_of::<Beta>(), 0);
    }
}
