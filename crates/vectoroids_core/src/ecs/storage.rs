//! # Entity Store
//!
//! One growable dense array ("column") per component kind, all kept in
//! lockstep behind a single store type, plus one presence bitset and one
//! removal flag per entity.
//!
//! The lockstep invariant: at every observable point outside an
//! in-progress mutation,
//! `len(every column) == len(signatures) == len(marked) == entity count`,
//! and index *e* refers to the same logical entity in every array.
//!
//! Deletion is swap-remove: O(1), keeps indices dense, and relocates the
//! last entity into the vacated slot - which is why handles are only valid
//! until the next flush.

use std::any::{type_name, Any};

use super::component::{Component, ComponentId, Signature};
use super::error::{EcsError, EcsResult};
use super::registry::ComponentRegistry;

/// Entity handle: a dense, zero-based index into every component column.
///
/// There is no generation counter. A handle is valid only until the next
/// removal flush; after a flush the same integer may name a different
/// logical entity (swap-remove relocates the last entity into the vacated
/// slot). Holders of a handle across a flush boundary must reacquire it
/// from a fresh query.
pub type Entity = usize;

/// Object-safe view of a single component column, used by the store to
/// grow and shrink all columns in lockstep without knowing their types.
trait AnyColumn: Send + Sync {
    /// Appends a default-valued slot.
    fn push_default(&mut self);

    /// Swap-removes the slot at `index`: overwrites it with the last slot,
    /// then shrinks by one.
    fn swap_remove(&mut self, index: usize);

    /// Current number of slots.
    fn len(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Typed dense storage for a single component kind.
struct Column<C: Component> {
    data: Vec<C>,
}

impl<C: Component> Column<C> {
    fn with_len(len: usize) -> Self {
        Self {
            data: vec![C::default(); len],
        }
    }
}

impl<C: Component> AnyColumn for Column<C> {
    fn push_default(&mut self) {
        self.data.push(C::default());
    }

    fn swap_remove(&mut self, index: usize) {
        self.data.swap_remove(index);
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Downcasts a type-erased column to its typed slice.
///
/// The registry guarantees one column per id with a fixed type, so a
/// mismatch here is a corrupted-store bug, not a recoverable condition.
fn typed_slice<C: Component>(column: &dyn AnyColumn) -> &[C] {
    column
        .as_any()
        .downcast_ref::<Column<C>>()
        .map(|c| c.data.as_slice())
        .unwrap_or_else(|| panic!("column type mismatch for {}", type_name::<C>()))
}

fn typed_slice_mut<C: Component>(column: &mut dyn AnyColumn) -> &mut [C] {
    column
        .as_any_mut()
        .downcast_mut::<Column<C>>()
        .map(|c| c.data.as_mut_slice())
        .unwrap_or_else(|| panic!("column type mismatch for {}", type_name::<C>()))
}

/// The dense-array entity store.
///
/// Owns the component registry, one column per registered kind, the
/// per-entity presence bitsets and the per-entity removal flags. All
/// structural operations keep every array the same length.
///
/// The store never invalidates query caches itself; that coordination
/// lives in [`World`](super::world::World).
#[derive(Default)]
pub struct EntityStore {
    registry: ComponentRegistry,
    columns: Vec<Box<dyn AnyColumn>>,
    /// Per-entity presence bitsets, indexed by entity handle.
    signatures: Vec<Signature>,
    /// Per-entity removal flags. Deliberately not part of the signature:
    /// a marked entity still matches every query until the flush.
    marked: Vec<bool>,
}

impl EntityStore {
    /// Creates an empty store with no registered component kinds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities currently alive (marked entities included).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// True if the store holds no entities.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// The per-entity presence bitsets, indexed by entity handle.
    #[inline]
    #[must_use]
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Read access to the registry (for diagnostics).
    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Registers component kind `C`, creating its column on first use.
    ///
    /// A column created after entities already exist is backfilled with
    /// default values so the lockstep invariant holds regardless of
    /// registration order. Idempotent.
    pub fn register<C: Component>(&mut self) -> ComponentId {
        let id = self.registry.id_of::<C>();
        if (id as usize) >= self.columns.len() {
            self.columns
                .push(Box::new(Column::<C>::with_len(self.signatures.len())));
        }
        id
    }

    /// Appends one default-valued slot to every column, a zero presence
    /// bitset and a cleared removal flag; returns the new dense index
    /// (always the previous count).
    pub fn push_slot(&mut self) -> Entity {
        for column in &mut self.columns {
            column.push_default();
        }
        self.signatures.push(Signature::EMPTY);
        self.marked.push(false);
        self.signatures.len() - 1
    }

    /// Writes `value` into kind `C`'s column at `entity` and sets the
    /// corresponding presence bit.
    ///
    /// Overwriting a component the entity already has is not an error.
    /// Registers `C` on first use.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] if `entity` is out of range.
    pub fn set<C: Component>(&mut self, entity: Entity, value: C) -> EcsResult<()> {
        let id = self.register::<C>();
        if entity >= self.signatures.len() {
            return Err(EcsError::InvalidEntity {
                entity,
                alive: self.signatures.len(),
            });
        }
        typed_slice_mut::<C>(self.columns[id as usize].as_mut())[entity] = value;
        self.signatures[entity].insert(id);
        Ok(())
    }

    /// Reads kind `C`'s slot for `entity`.
    ///
    /// The slot exists (and is returned) even when the entity does not
    /// "have" the component; absence is recorded only in the presence
    /// bitset, the slot is then semantically inert. Use [`has`](Self::has)
    /// to distinguish.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] if `entity` is out of range.
    ///
    /// # Panics
    ///
    /// Panics if `C` was never registered.
    pub fn get<C: Component>(&self, entity: Entity) -> EcsResult<&C> {
        let id = self.registered_id::<C>();
        if entity >= self.signatures.len() {
            return Err(EcsError::InvalidEntity {
                entity,
                alive: self.signatures.len(),
            });
        }
        Ok(&typed_slice::<C>(self.columns[id as usize].as_ref())[entity])
    }

    /// Mutable variant of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] if `entity` is out of range.
    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> EcsResult<&mut C> {
        let id = self.registered_id::<C>();
        if entity >= self.signatures.len() {
            return Err(EcsError::InvalidEntity {
                entity,
                alive: self.signatures.len(),
            });
        }
        Ok(&mut typed_slice_mut::<C>(self.columns[id as usize].as_mut())[entity])
    }

    /// Presence-bit query: does `entity` currently have component `C`?
    ///
    /// Returns false for out-of-range handles and unregistered kinds.
    #[must_use]
    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        match (self.registry.lookup::<C>(), self.signatures.get(entity)) {
            (Some(id), Some(sig)) => sig.contains(id),
            _ => false,
        }
    }

    /// Full column of kind `C` as a read-only slice, indexed by entity
    /// handle.
    ///
    /// # Panics
    ///
    /// Panics if `C` was never registered.
    #[must_use]
    pub fn column<C: Component>(&self) -> &[C] {
        let id = self.registered_id::<C>();
        typed_slice::<C>(self.columns[id as usize].as_ref())
    }

    /// Full column of kind `C` as a mutable slice. Registers `C` on first
    /// use.
    pub fn column_mut<C: Component>(&mut self) -> &mut [C] {
        let id = self.register::<C>();
        typed_slice_mut::<C>(self.columns[id as usize].as_mut())
    }

    /// Two columns, mutably, in one call.
    ///
    /// Systems iterate several parallel arrays in a single pass; this is
    /// the safe split-borrow that replaces the original's unchecked
    /// aliasing. Registers the kinds on first use.
    ///
    /// # Panics
    ///
    /// Panics if `A` and `B` are the same component kind.
    pub fn columns_mut2<A: Component, B: Component>(&mut self) -> (&mut [A], &mut [B]) {
        let ids = [self.register::<A>(), self.register::<B>()];
        let [a, b] = self.disjoint_columns_mut(ids);
        (typed_slice_mut::<A>(a), typed_slice_mut::<B>(b))
    }

    /// Three columns, mutably, in one call. See [`columns_mut2`](Self::columns_mut2).
    pub fn columns_mut3<A: Component, B: Component, C: Component>(
        &mut self,
    ) -> (&mut [A], &mut [B], &mut [C]) {
        let ids = [self.register::<A>(), self.register::<B>(), self.register::<C>()];
        let [a, b, c] = self.disjoint_columns_mut(ids);
        (
            typed_slice_mut::<A>(a),
            typed_slice_mut::<B>(b),
            typed_slice_mut::<C>(c),
        )
    }

    /// Four columns, mutably, in one call. See [`columns_mut2`](Self::columns_mut2).
    pub fn columns_mut4<A: Component, B: Component, C: Component, D: Component>(
        &mut self,
    ) -> (&mut [A], &mut [B], &mut [C], &mut [D]) {
        let ids = [
            self.register::<A>(),
            self.register::<B>(),
            self.register::<C>(),
            self.register::<D>(),
        ];
        let [a, b, c, d] = self.disjoint_columns_mut(ids);
        (
            typed_slice_mut::<A>(a),
            typed_slice_mut::<B>(b),
            typed_slice_mut::<C>(c),
            typed_slice_mut::<D>(d),
        )
    }

    /// Sets the removal flag for `entity`. Never mutates any array, so
    /// systems running later in the same frame still see a consistent,
    /// fully populated entity.
    ///
    /// Marking an already-marked entity is an explicit no-op.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] if `entity` is out of range.
    pub fn mark_for_removal(&mut self, entity: Entity) -> EcsResult<()> {
        match self.marked.get_mut(entity) {
            Some(flag) => {
                *flag = true;
                Ok(())
            }
            None => Err(EcsError::InvalidEntity {
                entity,
                alive: self.signatures.len(),
            }),
        }
    }

    /// True if `entity` is flagged for the next flush.
    #[must_use]
    pub fn is_marked(&self, entity: Entity) -> bool {
        self.marked.get(entity).copied().unwrap_or(false)
    }

    /// All currently flagged entities, in ascending index order.
    #[must_use]
    pub fn marked_entities(&self) -> Vec<Entity> {
        self.marked
            .iter()
            .enumerate()
            .filter_map(|(e, &m)| m.then_some(e))
            .collect()
    }

    /// Physically destroys `entity` right now: swap-removes its slot from
    /// every column, the presence bitsets and the removal flags.
    ///
    /// Every array performs the identical swap-and-pop, so index alignment
    /// is preserved: the former last entity now lives at `entity`.
    ///
    /// Callers normally go through the deferred path
    /// ([`World::flush_removals`](super::world::World::flush_removals));
    /// this is the primitive underneath it.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] if `entity` is out of range.
    pub fn remove_now(&mut self, entity: Entity) -> EcsResult<()> {
        if entity >= self.signatures.len() {
            return Err(EcsError::InvalidEntity {
                entity,
                alive: self.signatures.len(),
            });
        }
        for column in &mut self.columns {
            column.swap_remove(entity);
        }
        self.signatures.swap_remove(entity);
        self.marked.swap_remove(entity);
        Ok(())
    }

    /// Debug check of the lockstep invariant.
    #[must_use]
    pub fn columns_aligned(&self) -> bool {
        let n = self.signatures.len();
        self.marked.len() == n && self.columns.iter().all(|c| c.len() == n)
    }

    fn registered_id<C: Component>(&self) -> ComponentId {
        self.registry
            .lookup::<C>()
            .unwrap_or_else(|| panic!("component {} was never registered", type_name::<C>()))
    }

    /// Hands out disjoint mutable borrows of N distinct columns.
    ///
    /// Walks the column list once with `iter_mut`, so the borrows are
    /// provably non-overlapping without any unsafe code.
    fn disjoint_columns_mut<const N: usize>(
        &mut self,
        ids: [ComponentId; N],
    ) -> [&mut dyn AnyColumn; N] {
        debug_assert!(
            ids.iter()
                .enumerate()
                .all(|(i, a)| !ids[..i].contains(a)),
            "duplicate component kind in split borrow"
        );

        let mut found: [Option<&mut dyn AnyColumn>; N] = std::array::from_fn(|_| None);
        for (index, column) in self.columns.iter_mut().enumerate() {
            if let Some(slot) = ids.iter().position(|&id| id as usize == index) {
                found[slot] = Some(column.as_mut());
            }
        }
        found.map(|column| {
            column.unwrap_or_else(|| panic!("split borrow of unregistered component column"))
        })
    }
}
