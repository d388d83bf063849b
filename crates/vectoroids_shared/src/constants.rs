//! # Gameplay & Display Constants
//!
//! Default tuning values for the game. The TOML config can override the
//! gameplay values; the palette and window size are baked in.

// =============================================================================
// DISPLAY
// =============================================================================

/// Playfield width in pixels.
pub const WINDOW_WIDTH: f32 = 640.0;

/// Playfield height in pixels.
pub const WINDOW_HEIGHT: f32 = 480.0;

/// Target simulation rate (frames per second).
pub const TICK_RATE: u32 = 60;

// =============================================================================
// PALETTE (0xRRGGBBAA)
// =============================================================================

/// Ship hull color.
pub const COLOR_SHIP: u32 = 0x00FF_00FF;

/// Engine flame color.
pub const COLOR_FLAME: u32 = 0xFF00_00FF;

/// Bullet trail color.
pub const COLOR_BULLET: u32 = 0xFFFF_00FF;

/// Asteroid wireframe color.
pub const COLOR_ASTEROID: u32 = 0xFFFF_FFFF;

// =============================================================================
// SHIP TUNING
// =============================================================================

/// Thrust acceleration in pixels per second squared.
pub const SHIP_ACCEL: f32 = 600.0;

/// Turn rate in radians per second while a turn key is held.
pub const SHIP_TURN_RATE: f32 = 5.0;

/// Uniform ship scale factor.
pub const SHIP_SCALE: f32 = 3.0;

/// Per-frame velocity damping factor.
pub const SHIP_DRAG: f32 = 0.99;

/// Muzzle offset along the heading, in model units (scaled by ship scale).
pub const MUZZLE_OFFSET: f32 = 6.0;

// =============================================================================
// BULLET TUNING
// =============================================================================

/// Bullet speed in pixels per second.
pub const BULLET_SPEED: f32 = 1000.0;

/// Seconds a bullet lives before expiring.
pub const BULLET_LIFETIME: f32 = 0.5;

// =============================================================================
// ASTEROID TUNING
// =============================================================================

/// Minimum asteroid speed in pixels per second.
pub const ASTEROID_SPEED_MIN: f32 = 50.0;

/// Maximum asteroid speed in pixels per second.
pub const ASTEROID_SPEED_MAX: f32 = 150.0;

/// Maximum asteroid spin magnitude in radians per second.
pub const ASTEROID_SPIN_MAX: f32 = 3.0;
