//! # Walkthrough
//!
//! The reference level for `fps_engine`, its configuration file and a
//! scripted tour that drives the engine without a window.

#![warn(missing_docs)]

pub mod config;
pub mod level;
pub mod script;

pub use config::{DemoConfig, GameConfig, CONFIG_FILE};
pub use script::{ScriptStep, ScriptedWalk};
