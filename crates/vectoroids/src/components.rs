//! # Component Types
//!
//! Plain-data components stored in the ECS columns. Every type here is
//! `Copy + Default` so the store can backfill inert slots for entities
//! that never receive the component.

use bytemuck::{Pod, Zeroable};
use vectoroids_shared::Vec2;

use crate::shapes::ShapeKind;

/// World-space position in pixels.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Position {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

/// Linear velocity in pixels per second.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Velocity {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

/// Uniform scale applied to an entity's shape.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Scale {
    /// Multiplier applied to model-space vertices.
    pub factor: f32,
}

/// Orientation and angular velocity.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Rotation {
    /// Angular velocity in radians per second.
    pub speed: f32,
    /// Current heading in radians, kept in [-PI, PI].
    pub angle: f32,
}

/// Wireframe shape assignment plus the entity's vertex range in the
/// current frame's batch. `from..to` is rewritten every frame by the
/// shape batching system.
#[derive(Clone, Copy, Debug, Default)]
pub struct Shape {
    /// Which vertex table to draw.
    pub kind: ShapeKind,
    /// Line color, 0xRRGGBBAA.
    pub color: u32,
    /// Start index into the batch vertex buffer (inclusive).
    pub from: usize,
    /// End index into the batch vertex buffer (exclusive).
    pub to: usize,
}

/// Player steering parameters. Presence of this component marks the
/// entity as player-controlled.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ShipControl {
    /// Thrust acceleration in pixels per second squared.
    pub accel: f32,
    /// Turn rate in radians per second.
    pub turn_rate: f32,
}

/// Marks the engine flame entity that shadows the ship. The flame shape
/// is swapped in and out based on thrust input.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExhaustFlame {
    /// Whether the flame is currently drawn.
    pub visible: bool,
}

/// Bullet trail state. Bullets render as a segment from last frame's
/// position to the current one.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct Bullet {
    /// Position at the start of the previous simulation step.
    pub last: Vec2,
    /// Trail color, 0xRRGGBBAA.
    pub color: u32,
}

/// Remaining time to live. When it runs out the entity is marked for
/// removal at the next flush.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Lifetime {
    /// Seconds left.
    pub remaining: f32,
}

/// Edge-trigger state for the fire key. A shot is spawned on the
/// press transition only; holding the key does not repeat.
#[derive(Clone, Copy, Debug, Default)]
pub struct FireControl {
    /// True while the fire key is held down.
    pub held: bool,
}
