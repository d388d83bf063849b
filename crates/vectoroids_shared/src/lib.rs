//! # Vectoroids Shared
//!
//! Math types and tuning constants used across the game crates.
//! Pure data, no ECS knowledge, no I/O.

#![warn(missing_docs)]

pub mod constants;
pub mod math;

pub use math::{wrap_angle, Vec2};
