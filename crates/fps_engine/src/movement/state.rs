//! Avatar motion state

use crate::foundation::math::Vec3;
use super::config::MovementConfig;

/// Mutable per-avatar motion state, owned by the integrator
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    /// Displacement applied to the avatar at the end of each tick
    pub velocity: Vec3,

    /// Supporting surface normal from the last collision pass
    pub ground_normal: Option<Vec3>,

    /// No ground normal was reported by the last collision pass
    pub is_in_air: bool,

    /// Two-sphere stack and slow movement
    pub is_crouching: bool,

    /// Slow movement without crouching
    pub is_sneaking: bool,

    /// Acceleration currently in effect
    pub run_acceleration: f32,

    /// Speed cap currently in effect
    pub max_run_speed: f32,

    /// Absolute look yaw in [0, 2pi]
    pub yaw: f32,

    /// Absolute look pitch
    pub pitch: f32,
}

impl MotionState {
    /// Initial state: at rest, airborne until the first collision pass
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            velocity: Vec3::zeros(),
            ground_normal: None,
            is_in_air: true,
            is_crouching: false,
            is_sneaking: false,
            run_acceleration: config.run_acceleration,
            max_run_speed: config.max_run_speed,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Whether the avatar stood on something after the last tick
    pub fn is_grounded(&self) -> bool {
        !self.is_in_air
    }

    /// Switch acceleration and cap to the slow values
    pub fn use_slow_speeds(&mut self, config: &MovementConfig) {
        self.run_acceleration = config.slow_run_acceleration;
        self.max_run_speed = config.slow_max_run_speed;
    }

    /// Restore the normal acceleration and cap
    pub fn use_normal_speeds(&mut self, config: &MovementConfig) {
        self.run_acceleration = config.run_acceleration;
        self.max_run_speed = config.max_run_speed;
    }
}
