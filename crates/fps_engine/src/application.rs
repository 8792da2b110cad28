//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::input::InputState;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive the engine. The application is the input
/// source: each frame it hands the engine a snapshot of the keys and mouse.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the engine is created. Load the level into the
    /// engine here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Sample the input source for the coming frame
    fn poll_input(&mut self, engine: &Engine) -> Result<InputState, AppError>;

    /// Update the application
    ///
    /// Called every frame after the engine ticked.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Fixed frame time for headless runs; `None` samples the wall clock
    fn fixed_time_step(&self) -> Option<f32> {
        None
    }

    /// Cleanup the application
    ///
    /// Called when the run loop ends.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}
