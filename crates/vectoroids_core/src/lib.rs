//! # Vectoroids Core
//!
//! A minimal, data-oriented Entity Component System:
//! - Per-entity component data lives in parallel dense arrays (one column
//!   per component kind), all kept the same length at all times.
//! - Which components an entity has is recorded in a per-entity presence
//!   bitset, not by sentinel values in the columns.
//! - Queries are bitset subset tests, memoized in a group cache that is
//!   coarsely invalidated on any structural change.
//! - Removal is deferred: entities are marked during the frame and
//!   swap-removed in a single flush at the frame boundary.
//!
//! ## Architecture Rules
//!
//! 1. **Columns move in lockstep** - every create/remove touches all arrays
//! 2. **Components are plain data** - `Copy + Default`, behavior is external
//! 3. **Structural mutation only at frame boundaries** - systems iterate,
//!    the lifecycle flush deletes
//!
//! ## Example
//!
//! ```rust,ignore
//! use vectoroids_core::{World, Signature};
//!
//! let mut world = World::new();
//! let e = world.spawn();
//! world.set(e, Health(100))?;
//! ```

#![warn(missing_docs)]

pub mod ecs;

pub use ecs::{
    Component, ComponentId, ComponentRegistry, EcsError, EcsResult, Entity, EntityStore, Group,
    GroupCache, GroupCacheStats, Signature, World, MAX_COMPONENTS,
};
