//! # Entity Component System
//!
//! The small in-memory database at the heart of the game.
//!
//! ## Design Philosophy
//!
//! - One growable dense array per component kind, resized and swap-removed
//!   in lockstep behind a single store type
//! - Entity handles are raw dense indices, valid only until the next
//!   removal flush
//! - Query results are cached per signature and invalidated wholesale on
//!   any structural change: correctness over precision

mod component;
mod error;
mod query;
mod registry;
mod storage;
mod world;

pub use component::{Component, ComponentId, Signature, MAX_COMPONENTS};
pub use error::{EcsError, EcsResult};
pub use query::{Group, GroupCache, GroupCacheStats};
pub use registry::ComponentRegistry;
pub use storage::{Entity, EntityStore};
pub use world::World;
