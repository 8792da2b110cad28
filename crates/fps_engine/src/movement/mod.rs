//! Avatar movement
//!
//! The integrator owns the avatar's motion state and drives the camera; the
//! collision world only corrects the velocity it proposes.

pub mod config;
pub mod direction;
pub mod integrator;
pub mod sphere_stack;
pub mod state;

pub use config::MovementConfig;
pub use direction::move_angle;
pub use integrator::MotionIntegrator;
pub use sphere_stack::SphereStack;
pub use state::MotionState;
