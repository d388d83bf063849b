//! # Game Configuration
//!
//! Startup tuning loaded from TOML. Every field has a default matching
//! the built-in balance, so a partial (or absent) file is fine.

use serde::Deserialize;
use thiserror::Error;

use vectoroids_shared::constants::{
    BULLET_LIFETIME, BULLET_SPEED, SHIP_ACCEL, SHIP_SCALE, SHIP_TURN_RATE, TICK_RATE,
};

/// Errors from loading or parsing a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file was not valid TOML or had a wrong shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level game configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Target frame rate for the real-time loop.
    pub target_fps: u32,
    /// Seed for the spawn RNG. Same seed, same asteroid field.
    pub rng_seed: u64,
    /// Ship tuning.
    pub ship: ShipConfig,
    /// Bullet tuning.
    pub bullet: BulletConfig,
    /// Initial asteroid waves, spawned in order at startup.
    pub asteroid_waves: Vec<AsteroidWave>,
}

/// Ship handling parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShipConfig {
    /// Thrust acceleration in pixels per second squared.
    pub accel: f32,
    /// Turn rate in radians per second.
    pub turn_rate: f32,
    /// Uniform ship scale.
    pub scale: f32,
}

/// Bullet parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BulletConfig {
    /// Bullet speed in pixels per second.
    pub speed: f32,
    /// Seconds a bullet lives before expiring.
    pub lifetime: f32,
}

/// One wave of same-sized asteroids spawned at startup.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AsteroidWave {
    /// How many asteroids in the wave.
    pub count: u32,
    /// Scale factor shared by the wave.
    pub scale: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_fps: TICK_RATE,
            rng_seed: 0x5EED,
            ship: ShipConfig::default(),
            bullet: BulletConfig::default(),
            asteroid_waves: vec![
                AsteroidWave { count: 4, scale: 10.0 },
                AsteroidWave { count: 8, scale: 5.0 },
                AsteroidWave { count: 17, scale: 2.5 },
            ],
        }
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            accel: SHIP_ACCEL,
            turn_rate: SHIP_TURN_RATE,
            scale: SHIP_SCALE,
        }
    }
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            lifetime: BULLET_LIFETIME,
        }
    }
}

impl GameConfig {
    /// Parses a config from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a config from a TOML file on disk.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_waves_match_builtin_balance() {
        let config = GameConfig::default();
        assert_eq!(config.asteroid_waves.len(), 3);
        assert_eq!(config.asteroid_waves[0].count, 4);
        assert_eq!(config.asteroid_waves[2].scale, 2.5);
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            rng_seed = 7

            [ship]
            turn_rate = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.rng_seed, 7);
        assert_eq!(config.ship.turn_rate, 2.0);
        // Untouched fields keep their defaults.
        assert_eq!(config.ship.accel, SHIP_ACCEL);
        assert_eq!(config.bullet.lifetime, BULLET_LIFETIME);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = GameConfig::from_toml_str("warp_drive = true");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_waves_override_replaces_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            [[asteroid_waves]]
            count = 2
            scale = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(config.asteroid_waves.len(), 1);
        assert_eq!(config.asteroid_waves[0].count, 2);
    }
}
