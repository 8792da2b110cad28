//! Headless walkthrough of the reference level
//!
//! Runs the scripted tour for a fixed number of frames and logs where the
//! avatar goes. Set `RUST_LOG=info` (or `debug` for state transitions) to
//! see the output.

use std::path::PathBuf;

use clap::Parser;
use fps_engine::config::Config;
use fps_engine::foundation::logging;
use fps_engine::Engine;
use walkthrough::{GameConfig, ScriptedWalk, CONFIG_FILE};

/// Walk the reference level from a script
#[derive(Parser, Debug)]
#[command(name = "walkthrough", version, about)]
struct Args {
    /// Configuration file (TOML or RON)
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Frames to run, overriding the configuration
    #[arg(short, long)]
    frames: Option<u32>,

    /// Fixed frame time in seconds, overriding the configuration
    #[arg(long)]
    dt: Option<f32>,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args = Args::parse();
    let mut config = GameConfig::load_or_default(&args.config)?;

    if let Some(frames) = args.frames {
        config.demo.frames = frames;
    }
    if let Some(dt) = args.dt {
        if !(dt > 0.0) {
            return Err(format!("--dt must be positive, got {dt}").into());
        }
        config.demo.time_step = dt;
    }

    if args.write_config {
        config.save_to_file(&args.config)?;
        log::info!("Wrote configuration to {}", args.config.display());
        return Ok(());
    }

    log::info!(
        "Starting walkthrough: {} frames at {:.4}s per frame",
        config.demo.frames,
        config.demo.time_step
    );

    let mut walk = ScriptedWalk::new(config.demo.clone());
    Engine::run(config.engine_config(), &mut walk)?;
    Ok(())
}
