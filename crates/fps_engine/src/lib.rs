//! # FPS Engine
//!
//! First-person avatar motion and bounding-sphere collision against static
//! quad geometry.
//!
//! ## Features
//!
//! - **Surface Collision**: finite quads push a stack of spheres out of
//!   their faces, with slope and border handling
//! - **Motion Integrator**: run, jump, gravity, damping, crouch and sneak
//! - **Drift-free Camera**: view built from absolute yaw and pitch
//! - **Scene Models**: capability-based static surfaces and animated props
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fps_engine::prelude::*;
//!
//! struct Walk;
//!
//! impl Application for Walk {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let floor = CollisionSurface::new(Vec3::zeros(), Vec3::y(), Vec3::z(), 600.0, 600.0)
//!             .map_err(EngineError::from)?;
//!         let mut scene = Scene::new();
//!         scene.add(SurfaceModel::new("floor", floor, "stonefloor", (256.0, 256.0)));
//!         engine.load_scene(scene);
//!         Ok(())
//!     }
//!
//!     fn poll_input(&mut self, _engine: &Engine) -> Result<InputState, AppError> {
//!         Ok(InputState::new().with_key(KeyCode::W))
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     Engine::run(EngineConfig::default(), &mut Walk)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod physics;
pub mod movement;
pub mod render;
pub mod input;
pub mod scene;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineConfig, EngineError};

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError,
        config::{Config, ConfigError},
        foundation::{
            math::{Vec3, Mat4, Mat4Ext},
            time::Timer,
        },
        physics::collision::{
            BoundingSphere, CollisionSurface, CollisionWorld, EdgeCase, SurfaceDefinition, SurfaceError,
        },
        movement::{MotionIntegrator, MotionState, MovementConfig},
        render::{Camera, CameraConfig, Mesh},
        input::{InputManager, InputState, KeyCode, MouseButton},
        scene::{HeldProp, Model, ModelCapabilities, Scene, SpinningProp, SurfaceModel},
    };
}
