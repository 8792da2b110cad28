//! Movement tuning

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::{constants, Vec3};

/// Avatar movement configuration
///
/// Speeds are per-tick displacements: acceleration and deceleration are
/// scaled by the frame time, the resulting velocity is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Downward acceleration
    pub gravity: f32,

    /// Look rotation per unit of mouse movement, in radians
    pub rotation_speed: f32,

    /// Run acceleration while walking normally
    pub run_acceleration: f32,

    /// Fraction of horizontal velocity removed per second on the ground
    pub run_deceleration_rate: f32,

    /// Speed cap while walking normally
    pub max_run_speed: f32,

    /// Run acceleration while sneaking or crouching
    pub slow_run_acceleration: f32,

    /// Speed cap while sneaking or crouching
    pub slow_max_run_speed: f32,

    /// Vertical velocity added by a jump
    pub jump_impulse: f32,

    /// Length of the movement direction vector
    pub forward_speed: f32,

    /// Radius of every sphere in the avatar stack
    pub sphere_radius: f32,

    /// Pitch is clamped to +/- this angle
    pub pitch_limit: f32,

    /// Falling below this height resets the avatar
    pub world_floor: f32,

    /// Where the avatar starts and respawns
    pub start_position: Vec3,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            rotation_speed: constants::PI / 300.0,
            run_acceleration: 6.0 * constants::PI,
            run_deceleration_rate: 4.0 * constants::PI,
            max_run_speed: 1.2 * constants::PI,
            slow_run_acceleration: 2.5 * constants::PI,
            slow_max_run_speed: constants::HALF_PI,
            jump_impulse: constants::PI,
            forward_speed: constants::PI / 1.5,
            sphere_radius: 8.0,
            pitch_limit: 0.45 * constants::PI,
            world_floor: -2000.0,
            start_position: Vec3::new(0.0, 80.0, 0.0),
        }
    }
}

impl MovementConfig {
    /// Check that every value is usable by the integrator
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sphere_radius > 0.0) {
            return Err(invalid("sphere_radius", "must be positive"));
        }
        if !(self.gravity >= 0.0) {
            return Err(invalid("gravity", "must not be negative"));
        }
        if !(self.max_run_speed > 0.0) {
            return Err(invalid("max_run_speed", "must be positive"));
        }
        if !(self.slow_max_run_speed > 0.0) {
            return Err(invalid("slow_max_run_speed", "must be positive"));
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit < constants::HALF_PI) {
            return Err(invalid("pitch_limit", "must be between 0 and pi/2"));
        }
        if !self.start_position.iter().all(|c| c.is_finite()) {
            return Err(invalid("start_position", "must be finite"));
        }
        if !(self.start_position.y > self.world_floor) {
            return Err(invalid("world_floor", "must be below the start position"));
        }
        Ok(())
    }
}

impl Config for MovementConfig {}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = MovementConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.max_run_speed, 1.2 * std::f32::consts::PI);
        assert_eq!(config.start_position, Vec3::new(0.0, 80.0, 0.0));
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = MovementConfig { sphere_radius: 0.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "sphere_radius", .. })));

        let config = MovementConfig { pitch_limit: 2.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "pitch_limit", .. })));

        let config = MovementConfig { gravity: f32::NAN, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: MovementConfig = toml::from_str("gravity = 20.0\njump_impulse = 4.0\n").unwrap();
        assert_relative_eq!(config.gravity, 20.0);
        assert_relative_eq!(config.jump_impulse, 4.0);
        assert_relative_eq!(config.sphere_radius, 8.0);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = MovementConfig { forward_speed: 3.0, ..Default::default() };
        let text = ron::to_string(&config).unwrap();
        let parsed: MovementConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
