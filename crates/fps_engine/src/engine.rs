//! Core engine implementation

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    application::Application,
    config::{Config, ConfigError},
    foundation::time::Timer,
    input::{InputManager, InputState, KeyCode},
    movement::{MotionIntegrator, MotionState, MovementConfig},
    physics::collision::{CollisionWorld, SurfaceError},
    render::camera::{Camera, CameraConfig},
    scene::{DrawItem, Scene},
};

/// Main engine struct
///
/// Owns the level, the avatar and its camera, and steps them one frame at a
/// time. Rendering and device input live outside the engine.
pub struct Engine {
    /// Models of the loaded level
    pub scene: Scene,

    /// Collision surfaces of the loaded level
    pub world: CollisionWorld,

    /// The avatar's eye
    pub camera: Camera,

    /// Input snapshots for the current and previous frame
    pub input: InputManager,

    /// Avatar motion
    integrator: MotionIntegrator,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance with an empty level
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        let integrator = MotionIntegrator::new(config.movement.clone())?;
        let camera = Camera::new(config.movement.start_position, &config.camera);

        Ok(Self {
            scene: Scene::new(),
            world: CollisionWorld::default(),
            camera,
            input: InputManager::new(),
            integrator,
            timer: Timer::new(),
            config,
            running: true,
        })
    }

    /// Replace the level and rebuild its collision world
    pub fn load_scene(&mut self, scene: Scene) {
        self.world = scene.build_collision_world();
        self.scene = scene;
        log::info!(
            "Loaded scene with {} models and {} collision surfaces",
            self.scene.len(),
            self.world.len()
        );
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        while engine.running {
            let delta_time = match app.fixed_time_step() {
                Some(step) => engine.timer.advance(step),
                None => engine.timer.update(),
            };

            let input = app.poll_input(&engine)
                .map_err(|e| EngineError::ApplicationError(format!("App input: {}", e)))?;
            engine.tick(delta_time, input);

            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;
        }

        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps average)",
            engine.timer.frame_count(),
            engine.timer.average_fps()
        );
        Ok(())
    }

    /// Step one frame
    ///
    /// Input transitions and look come first, then the avatar moves and
    /// collides, then animated models follow the new camera. Holding Escape
    /// stops the run loop after this frame.
    pub fn tick(&mut self, delta_time: f32, input: InputState) {
        self.input.begin_frame(input);
        self.integrator.tick(delta_time, &self.input, &self.world, &mut self.camera);
        self.scene.update(delta_time, &self.camera);

        if self.input.is_down(KeyCode::Escape) {
            log::info!("Escape held, stopping");
            self.quit();
        }
    }

    /// Request the run loop to stop after the current frame
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Whether the run loop continues
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Avatar motion state
    pub fn motion(&self) -> &MotionState {
        self.integrator.state()
    }

    /// Avatar integrator
    pub fn integrator(&self) -> &MotionIntegrator {
        &self.integrator
    }

    /// Mutable avatar integrator
    pub fn integrator_mut(&mut self) -> &mut MotionIntegrator {
        &mut self.integrator
    }

    /// Draw list for the renderer
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        self.scene.draw_list()
    }

    /// Frame timer
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Time of the last frame
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Avatar movement tuning
    pub movement: MovementConfig,

    /// Camera lens
    pub camera: CameraConfig,
}

impl Config for EngineConfig {}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Level geometry error
    #[error("Invalid surface: {0}")]
    Surface(#[from] SurfaceError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
