//! # Per-Frame Systems
//!
//! Each system owns the query signature it was built with (built once at
//! startup, so the registry is warm before the first frame) and follows
//! the same split-borrow shape: fetch the entity list from the group
//! cache, then index the component columns it needs.
//!
//! Systems that spawn or mark entities finish their iteration first and
//! apply the structural changes afterwards, so no cached entity list is
//! alive while the store mutates.

use vectoroids_core::{EcsResult, Signature, World};
use vectoroids_shared::constants::{
    MUZZLE_OFFSET, SHIP_DRAG, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use vectoroids_shared::{wrap_angle, Vec2};

use crate::components::{
    Bullet, ExhaustFlame, FireControl, Lifetime, Position, Rotation, Scale, Shape, ShipControl,
    Velocity,
};
use crate::config::BulletConfig;
use crate::input::{InputState, Key};
use crate::shapes::{ShapeBatch, ShapeKind};
use crate::spawn::spawn_bullet;

/// Counts down [`Lifetime`] components and marks expired entities for
/// the next flush.
pub struct LifetimeSystem {
    query: Signature,
}

impl LifetimeSystem {
    /// Builds the system's query against `world`'s registry.
    pub fn new(world: &mut World) -> Self {
        let query = Signature::EMPTY.with(world.component_id::<Lifetime>());
        Self { query }
    }

    /// Decrements lifetimes by `dt`; expired entities are marked, not
    /// removed, so every later system this frame still sees them.
    ///
    /// # Errors
    ///
    /// Propagates store errors from marking.
    pub fn run(&self, world: &mut World, dt: f32) -> EcsResult<()> {
        let mut expired = Vec::new();
        let entities = world.groups.matching(self.query, world.store.signatures());
        let lifetimes = world.store.column_mut::<Lifetime>();
        for &e in entities {
            lifetimes[e].remaining -= dt;
            if lifetimes[e].remaining < 0.0 {
                expired.push(e);
            }
        }
        for e in expired {
            world.mark_for_removal(e)?;
        }
        Ok(())
    }
}

/// Records each bullet's position before the movement step, for the
/// trail segment drawn at render time.
pub struct BulletTrailSystem {
    query: Signature,
}

impl BulletTrailSystem {
    /// Builds the system's query against `world`'s registry.
    pub fn new(world: &mut World) -> Self {
        let query = Signature::EMPTY
            .with(world.component_id::<Bullet>())
            .with(world.component_id::<Position>());
        Self { query }
    }

    /// Copies current positions into the bullets' trail anchors.
    pub fn run(&self, world: &mut World) {
        let entities = world.groups.matching(self.query, world.store.signatures());
        let (bullets, positions) = world.store.columns_mut2::<Bullet, Position>();
        for &e in entities {
            bullets[e].last = Vec2::new(positions[e].x, positions[e].y);
        }
    }
}

/// Integrates velocity into position with toroidal screen wrap.
pub struct MovementSystem {
    query: Signature,
}

impl MovementSystem {
    /// Builds the system's query against `world`'s registry.
    pub fn new(world: &mut World) -> Self {
        let query = Signature::EMPTY
            .with(world.component_id::<Position>())
            .with(world.component_id::<Velocity>());
        Self { query }
    }

    /// Steps positions by `velocity * dt` and wraps them across the
    /// playfield edges.
    pub fn run(&self, world: &mut World, dt: f32) {
        let entities = world.groups.matching(self.query, world.store.signatures());
        let (positions, velocities) = world.store.columns_mut2::<Position, Velocity>();
        for &e in entities {
            positions[e].x += velocities[e].x * dt;
            positions[e].y += velocities[e].y * dt;

            if positions[e].x > WINDOW_WIDTH {
                positions[e].x -= WINDOW_WIDTH;
            } else if positions[e].x < 0.0 {
                positions[e].x += WINDOW_WIDTH;
            }
            if positions[e].y > WINDOW_HEIGHT {
                positions[e].y -= WINDOW_HEIGHT;
            } else if positions[e].y < 0.0 {
                positions[e].y += WINDOW_HEIGHT;
            }
        }
    }
}

/// Integrates angular velocity into heading, normalized to [-PI, PI].
pub struct RotationSystem {
    query: Signature,
}

impl RotationSystem {
    /// Builds the system's query against `world`'s registry.
    pub fn new(world: &mut World) -> Self {
        let query = Signature::EMPTY.with(world.component_id::<Rotation>());
        Self { query }
    }

    /// Steps headings by `speed * dt`.
    pub fn run(&self, world: &mut World, dt: f32) {
        let entities = world.groups.matching(self.query, world.store.signatures());
        let rotations = world.store.column_mut::<Rotation>();
        for &e in entities {
            rotations[e].angle = wrap_angle(rotations[e].angle + rotations[e].speed * dt);
        }
    }
}

/// Applies player input to every controlled entity: turn, thrust, drag.
///
/// The hull and the flame both carry [`ShipControl`], so one pass keeps
/// them integrating identically and flying in formation.
pub struct ShipControlSystem {
    query: Signature,
}

impl ShipControlSystem {
    /// Builds the system's query against `world`'s registry.
    pub fn new(world: &mut World) -> Self {
        let query = Signature::EMPTY
            .with(world.component_id::<Velocity>())
            .with(world.component_id::<Rotation>())
            .with(world.component_id::<ShipControl>());
        Self { query }
    }

    /// Sets angular velocity from the turn keys, accelerates along the
    /// heading while thrusting, and applies per-frame drag.
    pub fn run(&self, world: &mut World, input: &InputState, dt: f32) {
        let turn_left = input.is_down(Key::TurnLeft);
        let turn_right = input.is_down(Key::TurnRight);
        let thrust = input.is_down(Key::Thrust);

        let entities = world.groups.matching(self.query, world.store.signatures());
        let (velocities, rotations, controls) =
            world.store.columns_mut3::<Velocity, Rotation, ShipControl>();
        for &e in entities {
            rotations[e].speed = if turn_left {
                -controls[e].turn_rate
            } else if turn_right {
                controls[e].turn_rate
            } else {
                0.0
            };

            if thrust {
                let accel = Vec2::from_angle(rotations[e].angle) * (controls[e].accel * dt);
                velocities[e].x += accel.x;
                velocities[e].y += accel.y;
            }

            velocities[e].x *= SHIP_DRAG;
            velocities[e].y *= SHIP_DRAG;
        }
    }
}

/// Toggles the engine flame shape with the thrust key.
pub struct FlameSystem {
    query: Signature,
}

impl FlameSystem {
    /// Builds the system's query against `world`'s registry.
    pub fn new(world: &mut World) -> Self {
        let query = Signature::EMPTY
            .with(world.component_id::<ExhaustFlame>())
            .with(world.component_id::<Shape>());
        Self { query }
    }

    /// Swaps the flame between [`ShapeKind::Flame`] and
    /// [`ShapeKind::None`] based on the thrust key.
    pub fn run(&self, world: &mut World, input: &InputState) {
        let visible = input.is_down(Key::Thrust);
        let entities = world.groups.matching(self.query, world.store.signatures());
        let (flames, shapes) = world.store.columns_mut2::<ExhaustFlame, Shape>();
        for &e in entities {
            flames[e].visible = visible;
            shapes[e].kind = if visible {
                ShapeKind::Flame
            } else {
                ShapeKind::None
            };
        }
    }
}

/// Edge-triggered firing: one bullet per press of the fire key, spawned
/// at the muzzle ahead of the hull.
pub struct FiringSystem {
    query: Signature,
}

impl FiringSystem {
    /// Builds the system's query against `world`'s registry.
    pub fn new(world: &mut World) -> Self {
        let query = Signature::EMPTY
            .with(world.component_id::<FireControl>())
            .with(world.component_id::<Position>())
            .with(world.component_id::<Rotation>())
            .with(world.component_id::<Scale>());
        Self { query }
    }

    /// Detects press transitions and spawns the resulting bullets.
    ///
    /// Shots are collected during the iteration and spawned after it, so
    /// the cached entity list is gone before the store grows.
    ///
    /// # Errors
    ///
    /// Propagates store errors from bullet spawning.
    pub fn run(&self, world: &mut World, input: &InputState, config: &BulletConfig) -> EcsResult<()> {
        let fire = input.is_down(Key::Fire);
        let mut shots: Vec<(f32, f32, f32)> = Vec::new();

        let entities = world.groups.matching(self.query, world.store.signatures());
        let (fire_controls, positions, rotations, scales) = world
            .store
            .columns_mut4::<FireControl, Position, Rotation, Scale>();
        for &e in entities {
            if fire && !fire_controls[e].held {
                fire_controls[e].held = true;
                let heading = rotations[e].angle;
                let muzzle = Vec2::from_angle(heading) * (MUZZLE_OFFSET * scales[e].factor);
                shots.push((positions[e].x + muzzle.x, positions[e].y + muzzle.y, heading));
            } else if !fire {
                fire_controls[e].held = false;
            }
        }

        for (x, y, heading) in shots {
            spawn_bullet(world, x, y, heading, config)?;
        }
        Ok(())
    }
}

/// Collects every visible shape into the frame's batch, in model space.
pub struct ShapeBatchSystem {
    query: Signature,
}

impl ShapeBatchSystem {
    /// Builds the system's query against `world`'s registry.
    pub fn new(world: &mut World) -> Self {
        let query = Signature::EMPTY
            .with(world.component_id::<Shape>())
            .with(world.component_id::<Position>())
            .with(world.component_id::<Scale>())
            .with(world.component_id::<Rotation>());
        Self { query }
    }

    /// Appends each entity's shape and records the vertex range back
    /// into its [`Shape`] component.
    pub fn run(&self, world: &mut World, batch: &mut ShapeBatch) {
        let entities = world.groups.matching(self.query, world.store.signatures());
        let (shapes, positions, scales, rotations) = world
            .store
            .columns_mut4::<Shape, Position, Scale, Rotation>();
        for &e in entities {
            let (from, to) = batch.push_shape(
                shapes[e].kind,
                scales[e].factor,
                rotations[e].angle,
                positions[e].x,
                positions[e].y,
                shapes[e].color,
            );
            shapes[e].from = from;
            shapes[e].to = to;
        }
    }
}

/// Appends bullet trail segments to the frame's batch, in world space.
///
/// Must run after the batch transform pass: segments are pushed with an
/// identity transform and already-final coordinates.
pub struct BulletBatchSystem {
    query: Signature,
}

impl BulletBatchSystem {
    /// Builds the system's query against `world`'s registry.
    pub fn new(world: &mut World) -> Self {
        let query = Signature::EMPTY
            .with(world.component_id::<Bullet>())
            .with(world.component_id::<Position>());
        Self { query }
    }

    /// Draws each bullet as a segment from last frame's position to the
    /// current one. A segment longer than half the playfield means the
    /// bullet wrapped this frame; it is skipped rather than drawn as a
    /// streak across the whole screen.
    pub fn run(&self, world: &mut World, batch: &mut ShapeBatch) {
        let entities = world.groups.matching(self.query, world.store.signatures());
        let bullets = world.store.column::<Bullet>();
        let positions = world.store.column::<Position>();
        for &e in entities {
            let last = bullets[e].last;
            let wrapped = (last.x - positions[e].x).abs() > WINDOW_WIDTH / 2.0
                || (last.y - positions[e].y).abs() > WINDOW_HEIGHT / 2.0;
            if !wrapped {
                batch.push_segment(
                    last.x,
                    last.y,
                    positions[e].x,
                    positions[e].y,
                    bullets[e].color,
                );
            }
        }
    }
}
