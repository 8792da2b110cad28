//! Scenarios for an avatar walking through small hand-built levels
//!
//! Each scenario builds a scene, feeds the engine input snapshots at a fixed
//! 60 Hz step and checks where the avatar ends up.

use crate::engine::{Engine, EngineConfig};
use crate::foundation::math::{utils, world_backward, world_right, world_up, Vec3};
use crate::input::{InputState, KeyCode};
use crate::physics::collision::CollisionSurface;
use crate::scene::{HeldProp, Scene, SurfaceModel};

const DT: f32 = 1.0 / 60.0;

/// Eye height above a floor when standing: three spheres of radius 8
const STANDING_EYE_HEIGHT: f32 = 40.0;

fn floor(y: f32) -> CollisionSurface {
    CollisionSurface::new(Vec3::new(0.0, y, 0.0), world_up(), world_backward(), 600.0, 600.0).unwrap()
}

fn engine_with(surfaces: Vec<CollisionSurface>) -> Engine {
    let mut scene = Scene::new();
    for (i, surface) in surfaces.into_iter().enumerate() {
        scene.add(SurfaceModel::new(format!("surface{i}"), surface, "stonefloor", (256.0, 256.0)));
    }
    scene.add(HeldProp::new("pistol"));

    let mut engine = Engine::new(EngineConfig::default()).unwrap();
    engine.load_scene(scene);
    engine
}

fn step(engine: &mut Engine, frames: usize, input: &InputState) {
    for _ in 0..frames {
        engine.tick(DT, input.clone());
    }
}

fn settle(engine: &mut Engine) {
    step(engine, 120, &InputState::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_falls_and_lands_on_floor() {
        let mut engine = engine_with(vec![floor(0.0)]);
        assert!(engine.motion().is_in_air);

        settle(&mut engine);

        assert!(!engine.motion().is_in_air);
        assert_relative_eq!(engine.motion().ground_normal.unwrap(), world_up());
        assert_abs_diff_eq!(engine.camera.position().y, STANDING_EYE_HEIGHT, epsilon = 1e-3);
        assert_abs_diff_eq!(engine.motion().velocity.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_walks_forward_within_speed_cap() {
        let mut engine = engine_with(vec![floor(0.0)]);
        settle(&mut engine);
        let start = engine.camera.position();

        let max_speed = engine.integrator().config().max_run_speed;
        for _ in 0..60 {
            engine.tick(DT, InputState::new().with_key(KeyCode::W));
            assert!(engine.motion().velocity.norm() <= max_speed + 1e-4);
        }

        let end = engine.camera.position();
        assert!(end.z < start.z - 10.0);
        assert_abs_diff_eq!(end.x, start.x, epsilon = 1e-3);
        assert_abs_diff_eq!(end.y, STANDING_EYE_HEIGHT, epsilon = 1e-3);
    }

    #[test]
    fn test_wall_stops_the_avatar() {
        let wall = CollisionSurface::new(Vec3::new(0.0, 50.0, -50.0), world_backward(), world_up(), 600.0, 100.0)
            .unwrap();
        let mut engine = engine_with(vec![floor(0.0), wall]);
        settle(&mut engine);

        step(&mut engine, 300, &InputState::new().with_key(KeyCode::W));

        // Sphere radius keeps the eye one radius in front of the wall
        assert!(engine.camera.position().z > -50.0 + 8.0 - 0.01);
        assert!(!engine.motion().is_in_air);
    }

    #[test]
    fn test_jump_leaves_and_returns_to_ground() {
        let mut engine = engine_with(vec![floor(0.0)]);
        settle(&mut engine);

        engine.tick(DT, InputState::new().with_key(KeyCode::Space));
        assert!(engine.motion().is_in_air);

        let mut peak = engine.camera.position().y;
        for _ in 0..200 {
            engine.tick(DT, InputState::new());
            peak = peak.max(engine.camera.position().y);
        }

        assert!(peak > STANDING_EYE_HEIGHT + 15.0);
        assert!(!engine.motion().is_in_air);
        assert_abs_diff_eq!(engine.camera.position().y, STANDING_EYE_HEIGHT, epsilon = 1e-3);
    }

    #[test]
    fn test_crouch_lowers_eye_and_keeps_feet_on_floor() {
        let mut engine = engine_with(vec![floor(0.0)]);
        settle(&mut engine);

        let crouch = InputState::new().with_key(KeyCode::LeftControl);
        step(&mut engine, 60, &crouch);
        assert!(engine.motion().is_crouching);
        assert!(!engine.motion().is_in_air);
        assert_abs_diff_eq!(engine.camera.position().y, STANDING_EYE_HEIGHT - 16.0, epsilon = 1e-3);

        settle(&mut engine);
        assert!(!engine.motion().is_crouching);
        assert_abs_diff_eq!(engine.camera.position().y, STANDING_EYE_HEIGHT, epsilon = 1e-3);
    }

    #[test]
    fn test_avatar_rests_on_slope_without_sliding() {
        // Gentle ramp like the reference level's, rising toward -Z
        let normal = Vec3::new(0.0, 1.0, utils::cot_deg(70.0));
        let ramp = CollisionSurface::new(Vec3::zeros(), normal, world_right(), 200.0, 200.0).unwrap();
        let mut engine = engine_with(vec![ramp]);
        settle(&mut engine);

        let position = engine.camera.position();
        assert!(!engine.motion().is_in_air);
        assert_relative_eq!(engine.motion().ground_normal.unwrap(), world_up());
        assert_eq!(position.x, 0.0);
        assert_eq!(position.z, 0.0);
        assert_abs_diff_eq!(position.y, STANDING_EYE_HEIGHT, epsilon = 1e-3);
    }

    #[test]
    fn test_falling_out_of_the_world_respawns() {
        let mut engine = engine_with(vec![]);
        let mut respawned = false;

        for _ in 0..600 {
            engine.tick(DT, InputState::new());
            if engine.camera.position() == Vec3::new(0.0, 80.0, 0.0) {
                respawned = true;
                break;
            }
        }

        assert!(respawned);
        assert_eq!(engine.motion().velocity, Vec3::zeros());
    }

    #[test]
    fn test_held_prop_tracks_the_camera() {
        let mut engine = engine_with(vec![floor(0.0)]);
        settle(&mut engine);

        let expected = engine.camera.position() + engine.camera.direction() * 10.0 + engine.camera.right() * 4.0
            - engine.camera.up() * 4.0;
        let world = engine.scene.find("pistol").unwrap().world_transform();
        assert_relative_eq!(Vec3::new(world[(0, 3)], world[(1, 3)], world[(2, 3)]), expected, epsilon = 1e-4);
    }
}
