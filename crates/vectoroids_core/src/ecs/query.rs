//! # Group Cache
//!
//! Maps a query signature to the list of entities currently satisfying
//! it. Per frame there are a handful of distinct system queries but
//! potentially hundreds of entities, so the win is re-scanning once per
//! query per frame instead of once per entity per query per frame.
//!
//! Invalidation is coarse: any structural change flips every entry's
//! validity flag. Correctness over precision - structural changes are
//! batched to frame boundaries and queries are cheap to recompute.

use std::collections::HashMap;

use super::component::Signature;
use super::storage::Entity;

/// One memoized query result.
#[derive(Debug, Default)]
pub struct Group {
    /// Matching entities in ascending index order, no duplicates.
    entities: Vec<Entity>,
    /// True guarantees `entities` exactly equals the set of entities whose
    /// presence bitset is a superset of the query, as of the last
    /// structural change.
    valid: bool,
}

impl Group {
    /// The cached entity list. Meaningful only while the group is valid.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Whether the cached list is current.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Diagnostic counters for the group cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupCacheStats {
    /// Distinct query signatures seen so far.
    pub entries: usize,
    /// Entries whose cached list is currently valid.
    pub valid: usize,
    /// Total full rescans performed since creation.
    pub rebuilds: u64,
}

/// Memoized query results, keyed by query signature.
#[derive(Debug, Default)]
pub struct GroupCache {
    groups: HashMap<Signature, Group>,
    rebuilds: u64,
}

impl GroupCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entities whose presence bitset is a superset of
    /// `query`, in ascending index order.
    ///
    /// Never-seen or invalidated queries trigger a full scan of
    /// `signatures`; valid entries are returned without rescanning. Either
    /// way the answer is identical - caching changes the cost, never the
    /// result.
    ///
    /// The returned slice aliases cache storage, not a copy. Treat it as
    /// read-only for the duration of the current system's pass and do not
    /// mutate the entity population while holding it.
    pub fn matching(&mut self, query: Signature, signatures: &[Signature]) -> &[Entity] {
        let group = self.groups.entry(query).or_default();
        if !group.valid {
            group.entities.clear();
            for (entity, signature) in signatures.iter().enumerate() {
                if signature.contains_all(query) {
                    group.entities.push(entity);
                }
            }
            group.valid = true;
            self.rebuilds += 1;
        }
        &self.groups[&query].entities
    }

    /// Flips every entry's validity flag. Called on any structural change
    /// (entity created or removed) and on any presence change.
    pub fn invalidate_all(&mut self) {
        for group in self.groups.values_mut() {
            group.valid = false;
        }
    }

    /// Current cache counters.
    #[must_use]
    pub fn stats(&self) -> GroupCacheStats {
        GroupCacheStats {
            entries: self.groups.len(),
            valid: self.groups.values().filter(|g| g.valid).count(),
            rebuilds: self.rebuilds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(bits: &[u8]) -> Signature {
        let mut s = Signature::EMPTY;
        for &b in bits {
            s.insert(b);
        }
        s
    }

    #[test]
    fn test_matching_is_exact_and_ordered() {
        // Entities 0..4 with presence {A,B}, {A}, {A,B,C}, {B}.
        let signatures = vec![sig(&[0, 1]), sig(&[0]), sig(&[0, 1, 2]), sig(&[1])];
        let mut cache = GroupCache::new();

        assert_eq!(cache.matching(sig(&[0, 1]), &signatures), &[0, 2]);
        assert_eq!(cache.matching(sig(&[0]), &signatures), &[0, 1, 2]);
        assert_eq!(cache.matching(sig(&[2]), &signatures), &[2]);
    }

    #[test]
    fn test_empty_query_matches_all() {
        let signatures = vec![Signature::EMPTY, sig(&[3])];
        let mut cache = GroupCache::new();
        assert_eq!(cache.matching(Signature::EMPTY, &signatures), &[0, 1]);
    }

    #[test]
    fn test_valid_hit_does_not_rescan() {
        let signatures = vec![sig(&[0]), sig(&[0, 1])];
        let mut cache = GroupCache::new();

        cache.matching(sig(&[0]), &signatures);
        assert_eq!(cache.stats().rebuilds, 1);

        cache.matching(sig(&[0]), &signatures);
        assert_eq!(cache.stats().rebuilds, 1);
    }

    #[test]
    fn test_invalidation_forces_rescan() {
        let mut signatures = vec![sig(&[0])];
        let mut cache = GroupCache::new();

        assert_eq!(cache.matching(sig(&[0]), &signatures), &[0]);

        signatures.push(sig(&[0]));
        cache.invalidate_all();
        assert_eq!(cache.stats().valid, 0);

        assert_eq!(cache.matching(sig(&[0]), &signatures), &[0, 1]);
        assert_eq!(cache.stats().rebuilds, 2);
    }

    #[test]
    fn test_caching_never_changes_the_answer() {
        let signatures = vec![sig(&[0, 1]), sig(&[1]), sig(&[0, 1, 2])];
        let query = sig(&[0, 1]);

        let mut cold = GroupCache::new();
        let cold_answer: Vec<_> = cold.matching(query, &signatures).to_vec();

        let mut warm = GroupCache::new();
        warm.matching(query, &signatures);
        let warm_answer: Vec<_> = warm.matching(query, &signatures).to_vec();

        assert_eq!(cold_answer, warm_answer);
    }
}
