//! # Vectoroids
//!
//! A wireframe asteroids game built on the dense-array ECS in
//! `vectoroids_core`. This crate owns the gameplay layer: component types,
//! the per-frame systems, spawning, the shape batching pipeline and the
//! frame driver.
//!
//! Presentation is abstracted behind [`render::LineRenderer`]; the crate
//! itself never opens a window. The `demo` binary drives a full game with
//! scripted input and a recording renderer.

#![warn(missing_docs)]

pub mod components;
pub mod config;
pub mod game;
pub mod input;
pub mod pacing;
pub mod render;
pub mod shapes;
pub mod spawn;
pub mod systems;

pub use config::{ConfigError, GameConfig};
pub use game::{FrameStats, Game};
pub use input::{InputState, Key};
pub use pacing::FrameLimiter;
pub use render::{LineRenderer, RecordingRenderer};
