//! # Component Model
//!
//! Components are pure data containers with no behavior. Their identity is
//! a small integer id assigned by the [`ComponentRegistry`], and an
//! entity's component set is a fixed-width [`Signature`] bitset.
//!
//! [`ComponentRegistry`]: super::registry::ComponentRegistry

use bytemuck::{Pod, Zeroable};

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Copy`: bitwise copyable, no destructors
/// - `Default`: every entity gets a default-valued slot in every column,
///   whether or not it "has" the component (absence is recorded only in
///   the presence bitset)
/// - `Send + Sync + 'static`: safe to store type-erased
///
/// The trait is blanket-implemented; any plain value type qualifies.
pub trait Component: Copy + Default + Send + Sync + 'static {}

impl<T: Copy + Default + Send + Sync + 'static> Component for T {}

/// Small integer id of a component kind, assigned lazily in first-use
/// order by the registry. Always below [`MAX_COMPONENTS`].
pub type ComponentId = u8;

/// Maximum number of distinct component kinds.
///
/// This is the width of the presence bitset. Registering more kinds than
/// this is a fatal configuration error: it would corrupt every subsequent
/// bitset comparison, so there is no graceful degradation.
pub const MAX_COMPONENTS: usize = 32;

/// Fixed-width component bitset.
///
/// Used both as a per-entity presence record (bit *k* set means "has
/// component *k*") and as a query ("must have at least these components",
/// a subset test - extra components on a matching entity are ignored).
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Signature(u32);

impl Signature {
    /// The empty signature. As a query it matches every entity, since the
    /// empty set is a subset of every bitset.
    pub const EMPTY: Self = Self(0);

    /// Returns a copy of this signature with the given component bit set.
    #[inline]
    #[must_use]
    pub const fn with(self, id: ComponentId) -> Self {
        Self(self.0 | 1 << id)
    }

    /// Sets the given component bit in place.
    #[inline]
    pub fn insert(&mut self, id: ComponentId) {
        self.0 |= 1 << id;
    }

    /// Checks whether the given component bit is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, id: ComponentId) -> bool {
        self.0 & (1 << id) != 0
    }

    /// Subset test: true iff every bit set in `query` is also set in
    /// `self`.
    #[inline]
    #[must_use]
    pub const fn contains_all(self, query: Self) -> bool {
        self.0 & query.0 == query.0
    }

    /// Raw bit pattern, mainly for diagnostics.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_bit_operations() {
        let mut sig = Signature::EMPTY;
        assert!(!sig.contains(5));

        sig.insert(5);
        assert!(sig.contains(5));
        assert_eq!(sig.bits(), 1 << 5);

        let sig2 = sig.with(7);
        assert!(sig2.contains(5));
        assert!(sig2.contains(7));
    }

    #[test]
    fn test_subset_semantics() {
        let presence = Signature::EMPTY.with(0).with(1).with(2);
        let query = Signature::EMPTY.with(0).with(2);

        // Extra components on the entity are ignored.
        assert!(presence.contains_all(query));
        // But a query is not satisfied by a strict subset.
        assert!(!query.contains_all(presence));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(Signature::EMPTY.contains_all(Signature::EMPTY));
        assert!(Signature::EMPTY.with(3).contains_all(Signature::EMPTY));
    }

    #[test]
    fn test_signature_is_pod() {
        let sig = Signature::EMPTY.with(1);
        let bytes: &[u8] = bytemuck::bytes_of(&sig);
        assert_eq!(bytes.len(), 4);
    }
}
