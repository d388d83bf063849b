//! # ECS World
//!
//! Ties the entity store and the group cache together and enforces the
//! invalidation rules between them: every structural change (create,
//! remove) and every presence change flips the whole cache.
//!
//! Lifecycle state machine per entity:
//! `ALIVE -> (mark) PENDING_REMOVAL -> (flush) GONE`.
//! Marking never mutates arrays; the flush at the frame boundary performs
//! the batched swap-removes.

use super::component::{Component, ComponentId, Signature};
use super::error::EcsResult;
use super::query::GroupCache;
use super::storage::{Entity, EntityStore};

/// The ECS world: entity store plus group cache.
///
/// Both fields are public so a system can split-borrow them in one pass -
/// fetch its entity list from `groups` while indexing component columns
/// through `store`:
///
/// ```rust,ignore
/// let entities = world.groups.matching(sig, world.store.signatures());
/// let (positions, velocities) = world.store.columns_mut2::<Position, Velocity>();
/// for &e in entities {
///     positions[e].x += velocities[e].x * dt;
/// }
/// ```
///
/// Go through the `World` methods for anything structural, so the cache
/// invalidation rules hold.
#[derive(Default)]
pub struct World {
    /// Component columns, presence bitsets and removal flags.
    pub store: EntityStore,
    /// Memoized query results.
    pub groups: GroupCache,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities currently alive (marked entities included until
    /// the flush).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True if the world holds no entities.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Creates a new entity with no components and returns its dense
    /// index (always the previous count).
    ///
    /// Invalidates every cached query: a new entity may satisfy any of
    /// them (in particular the empty query).
    pub fn spawn(&mut self) -> Entity {
        let entity = self.store.push_slot();
        self.groups.invalidate_all();
        entity
    }

    /// Writes a component value and sets its presence bit, then
    /// invalidates the cache.
    ///
    /// The invalidation is deliberately conservative: only queries whose
    /// signature just became satisfied for this entity would strictly need
    /// it, but tracking that per entity per query is a correctness bug
    /// waiting to happen. Structural writes are rare next to per-frame
    /// reads, so the coarse policy costs little.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`](super::error::EcsError::InvalidEntity)
    /// if `entity` is out of range.
    pub fn set<C: Component>(&mut self, entity: Entity, value: C) -> EcsResult<()> {
        self.store.set(entity, value)?;
        self.groups.invalidate_all();
        Ok(())
    }

    /// Registers `C` (if new) and returns its id, for building system
    /// signatures once at startup.
    pub fn component_id<C: Component>(&mut self) -> ComponentId {
        self.store.register::<C>()
    }

    /// One-shot query: entities matching `query`, ascending, memoized.
    ///
    /// Convenient for tests and setup code. Systems that also need column
    /// access in the same pass split-borrow the public fields instead (see
    /// the type-level docs).
    pub fn matching(&mut self, query: Signature) -> &[Entity] {
        self.groups.matching(query, self.store.signatures())
    }

    /// Flags `entity` for the next flush. No array is mutated and no
    /// cache entry is invalidated: every query keeps seeing the entity
    /// until [`flush_removals`](Self::flush_removals) runs.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`](super::error::EcsError::InvalidEntity)
    /// if `entity` is out of range. Re-marking is a no-op.
    pub fn mark_for_removal(&mut self, entity: Entity) -> EcsResult<()> {
        self.store.mark_for_removal(entity)
    }

    /// Destroys every marked entity and returns how many were removed.
    ///
    /// Marked indices are collected first, then removed in descending
    /// index order: swap-remove only ever relocates an entity from a
    /// higher slot into the vacated one, and every higher marked slot has
    /// already been processed, so no survivor is skipped or
    /// double-removed.
    ///
    /// If nothing was marked this is a complete no-op and the cache stays
    /// untouched - a quiet frame does not pay for an invalidation storm.
    pub fn flush_removals(&mut self) -> usize {
        let marked = self.store.marked_entities();
        if marked.is_empty() {
            return 0;
        }

        for &entity in marked.iter().rev() {
            // In range by construction: descending order and nothing else
            // shrinks the store between collect and remove.
            let _ = self.store.remove_now(entity);
        }
        self.groups.invalidate_all();
        marked.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::error::EcsError;

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct A(f32);
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct B(f32);
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct C(f32);

    /// Builds the reference population: bitsets {A,B}, {A}, {A,B,C}.
    fn reference_world() -> (World, Signature) {
        let mut world = World::new();

        let e0 = world.spawn();
        world.set(e0, A(0.0)).unwrap();
        world.set(e0, B(0.0)).unwrap();

        let e1 = world.spawn();
        world.set(e1, A(1.0)).unwrap();

        let e2 = world.spawn();
        world.set(e2, A(2.0)).unwrap();
        world.set(e2, B(2.0)).unwrap();
        world.set(e2, C(2.0)).unwrap();

        let ab = Signature::EMPTY
            .with(world.component_id::<A>())
            .with(world.component_id::<B>());
        (world, ab)
    }

    #[test]
    fn test_query_returns_matching_entities() {
        let (mut world, ab) = reference_world();
        assert_eq!(world.matching(ab), &[0, 2]);
    }

    #[test]
    fn test_mark_does_not_change_queries_until_flush() {
        let (mut world, ab) = reference_world();

        world.mark_for_removal(0).unwrap();
        assert_eq!(world.matching(ab), &[0, 2]);

        assert_eq!(world.flush_removals(), 1);
        assert_eq!(world.matching(ab), &[0]);

        // The entity formerly at index 2 was swapped into slot 0.
        assert_eq!(*world.store.get::<A>(0).unwrap(), A(2.0));
        assert_eq!(*world.store.get::<B>(0).unwrap(), B(2.0));
        assert!(world.store.has::<C>(0));
    }

    #[test]
    fn test_componentless_entity_matches_empty_query() {
        let mut world = World::new();
        let e = world.spawn();
        assert_eq!(world.matching(Signature::EMPTY), &[e]);
    }

    #[test]
    fn test_spawn_invalidates_cached_queries() {
        let mut world = World::new();
        let e0 = world.spawn();
        world.set(e0, A(0.0)).unwrap();
        let qa = Signature::EMPTY.with(world.component_id::<A>());

        assert_eq!(world.matching(qa), &[0]);

        let e1 = world.spawn();
        world.set(e1, A(1.0)).unwrap();
        assert_eq!(world.matching(qa), &[0, 1]);
    }

    #[test]
    fn test_presence_change_invalidates_cached_queries() {
        let mut world = World::new();
        let e0 = world.spawn();
        world.set(e0, A(0.0)).unwrap();
        let e1 = world.spawn();
        world.set(e1, B(0.0)).unwrap();

        let qa = Signature::EMPTY.with(world.component_id::<A>());
        assert_eq!(world.matching(qa), &[e0]);

        // e1 gains A; the cached result must not go stale.
        world.set(e1, A(1.0)).unwrap();
        assert_eq!(world.matching(qa), &[e0, e1]);
    }

    #[test]
    fn test_quiet_flush_leaves_cache_valid() {
        let (mut world, ab) = reference_world();

        world.matching(ab);
        let before = world.groups.stats();
        assert!(before.valid > 0);

        assert_eq!(world.flush_removals(), 0);

        // No marked entities: no invalidation, no rescan on the next ask.
        assert_eq!(world.groups.stats(), before);
        world.matching(ab);
        assert_eq!(world.groups.stats().rebuilds, before.rebuilds);
    }

    #[test]
    fn test_flush_with_multiple_marked_entities() {
        let mut world = World::new();
        for i in 0..6 {
            let e = world.spawn();
            world.set(e, A(i as f32)).unwrap();
        }

        // Mark 1, 3, 4; survivors carry values 0, 2, 5.
        world.mark_for_removal(1).unwrap();
        world.mark_for_removal(3).unwrap();
        world.mark_for_removal(4).unwrap();
        assert_eq!(world.flush_removals(), 3);

        assert_eq!(world.len(), 3);
        let mut values: Vec<f32> = (0..3)
            .map(|e| world.store.get::<A>(e).unwrap().0)
            .collect();
        values.sort_by(f32::total_cmp);
        assert_eq!(values, vec![0.0, 2.0, 5.0]);
        assert!(world.store.columns_aligned());
    }

    #[test]
    fn test_double_mark_removes_once() {
        let mut world = World::new();
        world.spawn();
        world.spawn();

        world.mark_for_removal(0).unwrap();
        world.mark_for_removal(0).unwrap();
        assert_eq!(world.flush_removals(), 1);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_marking_out_of_range_fails_fast() {
        let mut world = World::new();
        world.spawn();
        assert_eq!(
            world.mark_for_removal(9),
            Err(EcsError::InvalidEntity { entity: 9, alive: 1 })
        );
    }

    #[test]
    fn test_handles_are_reassigned_after_flush() {
        // The documented narrower contract: a handle held across a flush
        // names whatever entity the swap put there, so re-query.
        let mut world = World::new();
        let e0 = world.spawn();
        world.set(e0, A(0.0)).unwrap();
        let e1 = world.spawn();
        world.set(e1, A(1.0)).unwrap();

        world.mark_for_removal(e0).unwrap();
        world.flush_removals();

        assert_eq!(*world.store.get::<A>(e0).unwrap(), A(1.0));
    }
}
