//! # Entity Spawning
//!
//! Factory functions for the three entity archetypes. All spawning goes
//! through the `World` methods so the group cache sees every structural
//! change.

use rand::Rng;

use vectoroids_core::{EcsResult, Entity, World};
use vectoroids_shared::constants::{
    ASTEROID_SPEED_MAX, ASTEROID_SPEED_MIN, ASTEROID_SPIN_MAX, COLOR_ASTEROID, COLOR_BULLET,
    COLOR_FLAME, COLOR_SHIP, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use vectoroids_shared::Vec2;

use crate::components::{
    Bullet, ExhaustFlame, FireControl, Lifetime, Position, Rotation, Scale, Shape, ShipControl,
    Velocity,
};
use crate::config::{BulletConfig, ShipConfig};
use crate::shapes::{ShapeKind, ASTEROID_KINDS};

/// Spawns the player ship at screen center, heading up, plus its engine
/// flame. Returns the hull entity.
///
/// The flame is a separate entity that flies in formation with the hull:
/// it carries the same control component so the steering system
/// integrates both identically every frame. Its shape starts as
/// [`ShapeKind::None`] and is swapped in while thrusting.
pub fn spawn_ship(world: &mut World, config: &ShipConfig) -> EcsResult<Entity> {
    let center = Position {
        x: WINDOW_WIDTH / 2.0,
        y: WINDOW_HEIGHT / 2.0,
    };
    let heading = -std::f32::consts::FRAC_PI_2;
    let control = ShipControl {
        accel: config.accel,
        turn_rate: config.turn_rate,
    };

    let flame = world.spawn();
    world.set(flame, center)?;
    world.set(flame, Velocity::default())?;
    world.set(flame, Scale { factor: config.scale })?;
    world.set(flame, Rotation { speed: 0.0, angle: heading })?;
    world.set(
        flame,
        Shape {
            kind: ShapeKind::None,
            color: COLOR_FLAME,
            from: 0,
            to: 0,
        },
    )?;
    world.set(flame, control)?;
    world.set(flame, ExhaustFlame { visible: false })?;

    let ship = world.spawn();
    world.set(ship, center)?;
    world.set(ship, Velocity::default())?;
    world.set(ship, Scale { factor: config.scale })?;
    world.set(ship, Rotation { speed: 0.0, angle: heading })?;
    world.set(
        ship,
        Shape {
            kind: ShapeKind::Ship,
            color: COLOR_SHIP,
            from: 0,
            to: 0,
        },
    )?;
    world.set(ship, control)?;
    world.set(ship, FireControl::default())?;

    Ok(ship)
}

/// Spawns one asteroid with a random shape, speed, drift direction and
/// spin, placed on the playfield edge.
///
/// Placement draws a single factor in [-1, 1): non-negative picks a point
/// along the top edge, negative picks one along the left edge.
pub fn spawn_asteroid<R: Rng>(world: &mut World, rng: &mut R, scale: f32) -> EcsResult<Entity> {
    let speed = rng.gen_range(ASTEROID_SPEED_MIN..ASTEROID_SPEED_MAX);
    let direction = rng.gen_range(0.0..std::f32::consts::TAU);
    let spin = rng.gen_range(-ASTEROID_SPIN_MAX..ASTEROID_SPIN_MAX);
    let kind = ASTEROID_KINDS[rng.gen_range(0..ASTEROID_KINDS.len())];

    let factor: f32 = rng.gen_range(-1.0..1.0);
    let (x, y) = if factor >= 0.0 {
        (factor * WINDOW_WIDTH, 0.0)
    } else {
        (0.0, -factor * WINDOW_HEIGHT)
    };
    let velocity = Vec2::from_angle(direction) * speed;

    let asteroid = world.spawn();
    world.set(asteroid, Position { x, y })?;
    world.set(
        asteroid,
        Velocity {
            x: velocity.x,
            y: velocity.y,
        },
    )?;
    world.set(asteroid, Scale { factor: scale })?;
    world.set(asteroid, Rotation { speed: spin, angle: 0.0 })?;
    world.set(
        asteroid,
        Shape {
            kind,
            color: COLOR_ASTEROID,
            from: 0,
            to: 0,
        },
    )?;

    Ok(asteroid)
}

/// Spawns a bullet at the given muzzle position, flying along `heading`.
pub fn spawn_bullet(
    world: &mut World,
    x: f32,
    y: f32,
    heading: f32,
    config: &BulletConfig,
) -> EcsResult<Entity> {
    let velocity = Vec2::from_angle(heading) * config.speed;

    let bullet = world.spawn();
    world.set(bullet, Position { x, y })?;
    world.set(
        bullet,
        Velocity {
            x: velocity.x,
            y: velocity.y,
        },
    )?;
    world.set(
        bullet,
        Bullet {
            last: Vec2::new(x, y),
            color: COLOR_BULLET,
        },
    )?;
    world.set(
        bullet,
        Lifetime {
            remaining: config.lifetime,
        },
    )?;

    Ok(bullet)
}
