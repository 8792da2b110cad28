//! Frame-by-frame avatar integrator
//!
//! Combines input intent, gravity, ground damping and collision corrections
//! into one displacement per tick, then commits it to the camera.
//!
//! # Tick order
//! 1. Edge-triggered transitions: zoom, sneak, crouch
//! 2. Look: yaw and pitch from the mouse delta
//! 3. Velocity: run input (grounded only), jump, gravity, ground damping
//! 4. Collision: sphere stack at `eye + velocity` against the world
//! 5. Commit: camera moves by the corrected velocity, air state updates
//! 6. Recovery: below the world floor the avatar respawns

use crate::config::ConfigError;
use crate::foundation::math::{constants, utils, world_backward, world_up, Vec3};
use crate::input::{InputManager, KeyCode, MouseButton};
use crate::physics::collision::CollisionWorld;
use crate::render::camera::Camera;

use super::config::MovementConfig;
use super::direction::move_angle;
use super::sphere_stack::SphereStack;
use super::state::MotionState;

/// Horizontal velocity components below this are snapped to zero on the ground
pub const REST_THRESHOLD: f32 = 0.01;

/// Drives one avatar through a collision world
#[derive(Debug, Clone)]
pub struct MotionIntegrator {
    config: MovementConfig,
    state: MotionState,
}

impl MotionIntegrator {
    /// Create an integrator at rest
    pub fn new(config: MovementConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = MotionState::new(&config);
        Ok(Self { config, state })
    }

    /// Movement configuration
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Current motion state
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Mutable motion state
    pub fn state_mut(&mut self) -> &mut MotionState {
        &mut self.state
    }

    /// Run one full tick
    pub fn tick(&mut self, delta_time: f32, input: &InputManager, world: &CollisionWorld, camera: &mut Camera) {
        self.handle_transitions(input, camera);
        self.apply_look(input.mouse_delta());
        self.update_velocity(delta_time, input);
        self.resolve_and_commit(world, camera);
        self.recover_if_fallen(camera);
    }

    /// Apply zoom, sneak and crouch transitions on the frame they happen
    pub fn handle_transitions(&mut self, input: &InputManager, camera: &mut Camera) {
        if input.button_just_pressed(MouseButton::Right) {
            camera.projection.set_zoomed(true);
        } else if input.button_just_released(MouseButton::Right) {
            camera.projection.set_zoomed(false);
        }

        if input.just_pressed(KeyCode::LeftShift) {
            log::debug!("Sneak on");
            self.state.is_sneaking = true;
            self.state.use_slow_speeds(&self.config);
        } else if input.just_released(KeyCode::LeftShift) {
            log::debug!("Sneak off");
            self.state.is_sneaking = false;
            self.state.use_normal_speeds(&self.config);
        }

        let crouch_offset = Vec3::new(0.0, 2.0 * self.config.sphere_radius, 0.0);
        if input.just_pressed(KeyCode::LeftControl) {
            log::debug!("Crouch on");
            self.state.is_crouching = true;
            self.state.use_slow_speeds(&self.config);
            camera.update(-crouch_offset, self.state.yaw, self.state.pitch);
        } else if input.just_released(KeyCode::LeftControl) {
            log::debug!("Crouch off");
            self.state.is_crouching = false;
            self.state.use_normal_speeds(&self.config);
            camera.update(crouch_offset, self.state.yaw, self.state.pitch);
        }
    }

    /// Turn by a mouse delta
    ///
    /// Yaw decreases with rightward movement and is wrapped into [0, 2pi];
    /// pitch follows vertical movement and is clamped to the pitch limit.
    pub fn apply_look(&mut self, mouse_delta: (f32, f32)) {
        let (dx, dy) = mouse_delta;
        let speed = self.config.rotation_speed;

        self.state.yaw -= speed * dx;
        if self.state.yaw < 0.0 {
            self.state.yaw += constants::TAU;
        } else if self.state.yaw > constants::TAU {
            self.state.yaw -= constants::TAU;
        }

        let limit = self.config.pitch_limit;
        self.state.pitch = (self.state.pitch + speed * dy).clamp(-limit, limit);
    }

    /// Update the velocity from input, gravity and ground damping
    pub fn update_velocity(&mut self, delta_time: f32, input: &InputManager) {
        let grounded = self.state.is_grounded();

        if grounded {
            if let Some(angle) = move_angle(input) {
                self.accelerate(angle, delta_time);
            }
        }

        if grounded && !self.state.is_crouching && input.is_down(KeyCode::Space) {
            self.state.velocity.y += self.config.jump_impulse;
        }

        self.state.velocity.y -= self.config.gravity * delta_time;

        if grounded {
            self.damp(delta_time);
        }
    }

    /// Push the velocity along a movement angle, unless that breaks the cap
    fn accelerate(&mut self, angle: f32, delta_time: f32) {
        let direction = utils::rotate_about(world_backward(), world_up(), angle + self.state.yaw)
            * self.config.forward_speed;
        let candidate = self.state.velocity + direction * self.state.run_acceleration * delta_time;

        if candidate.norm() <= self.state.max_run_speed {
            self.state.velocity = candidate;
        }
    }

    fn damp(&mut self, delta_time: f32) {
        let factor = 1.0 - self.config.run_deceleration_rate * delta_time;
        let velocity = &mut self.state.velocity;
        velocity.x *= factor;
        velocity.z *= factor;

        if velocity.x.abs() < REST_THRESHOLD {
            velocity.x = 0.0;
        }
        if velocity.z.abs() < REST_THRESHOLD {
            velocity.z = 0.0;
        }
    }

    /// Collide the projected sphere stack and move the camera
    pub fn resolve_and_commit(&mut self, world: &CollisionWorld, camera: &mut Camera) {
        let mut stack = SphereStack::new(
            camera.position() + self.state.velocity,
            self.config.sphere_radius,
            self.state.is_crouching,
        );

        let ground_normal = world.resolve(stack.spheres_mut(), &mut self.state.velocity);
        camera.update(self.state.velocity, self.state.yaw, self.state.pitch);

        let was_in_air = self.state.is_in_air;
        self.state.ground_normal = ground_normal;
        self.state.is_in_air = ground_normal.is_none();

        if was_in_air && !self.state.is_in_air {
            log::debug!("Landed at {:?}", camera.position());
        } else if !was_in_air && self.state.is_in_air {
            log::debug!("Left the ground at {:?}", camera.position());
        }
    }

    /// Respawn at the start position after falling out of the world
    ///
    /// Returns whether a reset happened.
    pub fn recover_if_fallen(&mut self, camera: &mut Camera) -> bool {
        if camera.position().y >= self.config.world_floor {
            return false;
        }

        log::info!(
            "Avatar fell below {} at {:?}, respawning at {:?}",
            self.config.world_floor, camera.position(), self.config.start_position
        );
        self.state.velocity = Vec3::zeros();
        self.state.yaw = 0.0;
        self.state.pitch = 0.0;
        camera.orientation.set_position(self.config.start_position);
        camera.update(Vec3::zeros(), 0.0, 0.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn integrator() -> MotionIntegrator {
        MotionIntegrator::new(MovementConfig::default()).unwrap()
    }

    fn grounded_integrator() -> MotionIntegrator {
        let mut integrator = integrator();
        integrator.state_mut().is_in_air = false;
        integrator.state_mut().ground_normal = Some(world_up());
        integrator
    }

    fn input_with(keys: &[KeyCode]) -> InputManager {
        let mut state = InputState::new();
        for &key in keys {
            state.press(key);
        }
        let mut input = InputManager::new();
        input.begin_frame(state);
        input
    }

    fn camera() -> Camera {
        Camera::new(MovementConfig::default().start_position, &Default::default())
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = MovementConfig { sphere_radius: -1.0, ..Default::default() };
        assert!(MotionIntegrator::new(config).is_err());
    }

    #[test]
    fn test_forward_input_accelerates_forward() {
        let mut integrator = grounded_integrator();
        integrator.update_velocity(DT, &input_with(&[KeyCode::W]));

        let velocity = integrator.state().velocity;
        assert!(velocity.z < 0.0);
        assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_speed_cap_rejects_instead_of_clamping() {
        let max = MovementConfig::default().max_run_speed;

        let mut with_input = grounded_integrator();
        with_input.state_mut().velocity = Vec3::new(0.0, 0.0, -max);
        with_input.update_velocity(DT, &input_with(&[KeyCode::W]));

        let mut without_input = grounded_integrator();
        without_input.state_mut().velocity = Vec3::new(0.0, 0.0, -max);
        without_input.update_velocity(DT, &input_with(&[]));

        assert_eq!(with_input.state().velocity, without_input.state().velocity);
        assert!(with_input.state().velocity.z.abs() <= max);
    }

    #[test]
    fn test_damping_snaps_small_components() {
        let mut integrator = grounded_integrator();
        integrator.state_mut().velocity = Vec3::new(0.006, 0.0, -2.0);
        integrator.update_velocity(0.01, &input_with(&[]));

        let velocity = integrator.state().velocity;
        assert_eq!(velocity.x, 0.0);
        let factor = 1.0 - 4.0 * constants::PI * 0.01;
        assert_relative_eq!(velocity.z, -2.0 * factor, epsilon = 1e-6);
    }

    #[test]
    fn test_airborne_ignores_run_input_and_damping() {
        let mut integrator = integrator();
        integrator.state_mut().velocity = Vec3::new(0.5, 0.0, 0.0);
        integrator.update_velocity(DT, &input_with(&[KeyCode::W, KeyCode::Space]));

        let velocity = integrator.state().velocity;
        assert_relative_eq!(velocity.x, 0.5);
        assert_relative_eq!(velocity.z, 0.0);
        assert_relative_eq!(velocity.y, -9.81 * DT, epsilon = 1e-6);
    }

    #[test]
    fn test_jump_is_level_triggered_on_ground() {
        let mut integrator = grounded_integrator();
        integrator.update_velocity(DT, &input_with(&[KeyCode::Space]));
        assert_relative_eq!(integrator.state().velocity.y, constants::PI - 9.81 * DT, epsilon = 1e-5);

        // Still grounded with the key held: the impulse is added again
        integrator.update_velocity(DT, &input_with(&[KeyCode::Space]));
        assert_relative_eq!(integrator.state().velocity.y, 2.0 * (constants::PI - 9.81 * DT), epsilon = 1e-5);
    }

    #[test]
    fn test_no_jump_while_crouching() {
        let mut integrator = grounded_integrator();
        integrator.state_mut().is_crouching = true;
        integrator.update_velocity(DT, &input_with(&[KeyCode::Space]));
        assert!(integrator.state().velocity.y < 0.0);
    }

    #[test]
    fn test_look_wraps_yaw_and_clamps_pitch() {
        let mut integrator = integrator();
        let speed = integrator.config().rotation_speed;

        integrator.apply_look((10.0, 0.0));
        assert_relative_eq!(integrator.state().yaw, constants::TAU - 10.0 * speed, epsilon = 1e-5);

        integrator.apply_look((-20.0, 0.0));
        assert_relative_eq!(integrator.state().yaw, 10.0 * speed, epsilon = 1e-4);

        integrator.apply_look((0.0, 10_000.0));
        assert_relative_eq!(integrator.state().pitch, 0.45 * constants::PI);
        integrator.apply_look((0.0, -100_000.0));
        assert_relative_eq!(integrator.state().pitch, -0.45 * constants::PI);
    }

    #[test]
    fn test_crouch_transition_moves_camera_once() {
        let mut integrator = integrator();
        let mut camera = camera();
        let mut input = InputManager::new();

        input.begin_frame(InputState::new().with_key(KeyCode::LeftControl));
        integrator.handle_transitions(&input, &mut camera);
        assert!(integrator.state().is_crouching);
        assert_relative_eq!(camera.position().y, 64.0);
        assert_relative_eq!(integrator.state().max_run_speed, constants::HALF_PI);

        // Holding the key does nothing more
        input.begin_frame(InputState::new().with_key(KeyCode::LeftControl));
        integrator.handle_transitions(&input, &mut camera);
        assert_relative_eq!(camera.position().y, 64.0);

        input.begin_frame(InputState::new());
        integrator.handle_transitions(&input, &mut camera);
        assert!(!integrator.state().is_crouching);
        assert_relative_eq!(camera.position().y, 80.0);
        assert_relative_eq!(integrator.state().max_run_speed, 1.2 * constants::PI);
    }

    #[test]
    fn test_sneak_and_zoom_transitions() {
        let mut integrator = integrator();
        let mut camera = camera();
        let mut input = InputManager::new();

        input.begin_frame(InputState::new().with_key(KeyCode::LeftShift).with_button(MouseButton::Right));
        integrator.handle_transitions(&input, &mut camera);
        assert!(integrator.state().is_sneaking);
        assert_relative_eq!(integrator.state().run_acceleration, 2.5 * constants::PI);
        assert!(camera.projection.is_zoomed());

        input.begin_frame(InputState::new());
        integrator.handle_transitions(&input, &mut camera);
        assert!(!integrator.state().is_sneaking);
        assert_relative_eq!(integrator.state().run_acceleration, 6.0 * constants::PI);
        assert!(!camera.projection.is_zoomed());
    }

    #[test]
    fn test_fall_recovery() {
        let mut integrator = integrator();
        let mut camera = camera();
        camera.orientation.set_position(Vec3::new(40.0, -2500.0, 12.0));
        integrator.state_mut().velocity = Vec3::new(1.0, -30.0, 2.0);
        integrator.state_mut().yaw = 1.0;

        integrator.tick(DT, &input_with(&[]), &CollisionWorld::default(), &mut camera);

        assert_eq!(integrator.state().velocity, Vec3::zeros());
        assert_eq!(integrator.state().yaw, 0.0);
        assert_eq!(integrator.state().pitch, 0.0);
        assert_eq!(camera.position(), Vec3::new(0.0, 80.0, 0.0));
        assert_relative_eq!(camera.direction(), crate::foundation::math::world_forward(), epsilon = 1e-6);
    }

    #[test]
    fn test_free_fall_without_geometry() {
        let mut integrator = integrator();
        let mut camera = camera();

        integrator.tick(DT, &input_with(&[]), &CollisionWorld::default(), &mut camera);

        assert!(integrator.state().is_in_air);
        assert!(integrator.state().ground_normal.is_none());
        assert_relative_eq!(camera.position().y, 80.0 - 9.81 * DT, epsilon = 1e-4);
    }
}
