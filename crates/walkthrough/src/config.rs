//! Game configuration
//!
//! Stored as TOML next to the binary. Every section is optional; missing
//! values fall back to the engine defaults.

use fps_engine::config::Config;
use fps_engine::movement::MovementConfig;
use fps_engine::render::CameraConfig;
use fps_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Default configuration file name
pub const CONFIG_FILE: &str = "walkthrough.toml";

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Avatar movement tuning
    pub movement: MovementConfig,

    /// Camera lens
    pub camera: CameraConfig,

    /// Headless demo settings
    pub demo: DemoConfig,
}

impl GameConfig {
    /// The engine part of the configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            movement: self.movement.clone(),
            camera: self.camera.clone(),
        }
    }
}

impl Config for GameConfig {}

/// Headless demo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frames to run before stopping
    pub frames: u32,

    /// Fixed frame time in seconds
    pub time_step: f32,

    /// Log the avatar state every this many frames
    pub log_interval: u32,

    /// Mouse units per frame while the script turns
    pub turn_rate: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 900,
            time_step: 1.0 / 60.0,
            log_interval: 60,
            turn_rate: 5.0,
        }
    }
}
